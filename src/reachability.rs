//! Reachability check run before cloning.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Upper bound for the check, so unreachable hosts fail fast.
pub const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reachability: Send + Sync {
    /// Whether the host behind `url` answers at all.
    async fn is_reachable(&self, url: &str) -> bool;
}

/// Sends a `HEAD` request; any HTTP response counts as reachable.
#[derive(Clone)]
pub struct HttpReachability {
    client: Client,
}

impl HttpReachability {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REACHABILITY_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent("gitget-cli")
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Reachability for HttpReachability {
    #[tracing::instrument(skip(self))]
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                debug!("{} answered with {}", url, response.status());
                true
            }
            Err(e) => {
                debug!("{} is unreachable: {}", url, e);
                false
            }
        }
    }
}
