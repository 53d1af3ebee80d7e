//! Background network worker.
//!
//! HTTP requests run on a dedicated thread with its own single-threaded
//! tokio runtime so the frame loop never blocks. Requests go in over one
//! channel and responses come back over another; the app polls for them
//! once per frame.

use bevy::prelude::*;
use rescue_sync::{ClientError, HttpSimServer, ServerConfig, SimServer};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Mutex;

/// Work for the network thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetRequest {
    Step,
    Reset,
}

/// Completed request.
#[derive(Debug)]
pub enum NetResponse {
    /// Raw step body, undecoded.
    Step(Result<String, ClientError>),
    Reset(Result<(), ClientError>),
}

/// Channel pair to the network thread.
#[derive(Resource)]
pub struct NetBridge {
    requests: Sender<NetRequest>,
    /// Receiver for responses (wrapped for thread safety).
    responses: Mutex<Receiver<NetResponse>>,
}

impl NetBridge {
    /// Starts a worker talking HTTP to the configured endpoints.
    pub fn spawn(config: &ServerConfig) -> anyhow::Result<Self> {
        let server = HttpSimServer::new(config)?;
        tracing::info!(
            "Network worker using step URL {} and reset URL {}",
            server.step_url(),
            server.reset_url()
        );
        Self::spawn_with(server)
    }

    /// Starts a worker around any server implementation.
    pub fn spawn_with<C>(server: C) -> anyhow::Result<Self>
    where
        C: SimServer + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<NetRequest>();
        let (response_tx, response_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        std::thread::Builder::new()
            .name("rescue-net".to_string())
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    let response = match request {
                        NetRequest::Step => {
                            NetResponse::Step(runtime.block_on(server.fetch_step()))
                        }
                        NetRequest::Reset => {
                            NetResponse::Reset(runtime.block_on(server.reset()))
                        }
                    };
                    if response_tx.send(response).is_err() {
                        break;
                    }
                }
                tracing::debug!("Network worker stopped");
            })?;

        Ok(Self {
            requests: request_tx,
            responses: Mutex::new(response_rx),
        })
    }

    /// Queues a request. Returns false if the worker is gone.
    pub fn send(&self, request: NetRequest) -> bool {
        match self.requests.send(request) {
            Ok(()) => true,
            Err(_) => {
                tracing::error!("Network worker is not running; dropped {:?}", request);
                false
            }
        }
    }

    /// Takes every response that has arrived so far.
    pub fn drain(&self) -> Vec<NetResponse> {
        let mut out = Vec::new();
        let Ok(rx) = self.responses.lock() else {
            return out;
        };
        loop {
            match rx.try_recv() {
                Ok(response) => out.push(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("Network worker disconnected");
                    break;
                }
            }
        }
        out
    }
}
