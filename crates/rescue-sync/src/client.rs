//! HTTP access to the simulation server.

use std::future::Future;
use std::time::Duration;

use rescue_events::DecodeError;

use crate::config::ServerConfig;

/// Source of simulation steps.
///
/// `fetch_step` returns the raw body; decoding is left to the driver so that
/// network and payload failures stay distinguishable.
pub trait SimServer {
    fn fetch_step(&self) -> impl Future<Output = Result<String, ClientError>> + Send;

    fn reset(&self) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// [`SimServer`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSimServer {
    client: reqwest::Client,
    step_url: String,
    reset_url: String,
}

impl HttpSimServer {
    /// Builds a client for the configured endpoints.
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
            step_url: config.step_url.clone(),
            reset_url: config.reset_url.clone(),
        })
    }

    pub fn step_url(&self) -> &str {
        &self.step_url
    }

    pub fn reset_url(&self) -> &str {
        &self.reset_url
    }
}

impl SimServer for HttpSimServer {
    async fn fetch_step(&self) -> Result<String, ClientError> {
        let response = self.client.get(&self.step_url).send().await?;
        let response = check_status(response)?;
        Ok(response.text().await?)
    }

    async fn reset(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .post(&self.reset_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body("")
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}

/// Failure of one step or reset attempt.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("bad step payload: {0}")]
    Decode(#[from] DecodeError),
}

impl ClientError {
    /// Whether the failure happened before a usable response arrived.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Status { .. })
    }
}
