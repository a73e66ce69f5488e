use std::sync::Arc;

use tokio::time::interval;

use crate::core::config::RedispatchConfig;
use crate::core::error::Result;
use crate::features::requests::services::RequestService;

/// Background worker that retries dispatch for requests nobody was notified about
///
/// Covers requests created while every provider was out of range or offline,
/// and rounds lost to a directory outage.
pub struct RedispatchWorker {
    request_service: Arc<RequestService>,
    config: RedispatchConfig,
}

impl RedispatchWorker {
    pub fn new(request_service: Arc<RequestService>, config: RedispatchConfig) -> Self {
        Self {
            request_service,
            config,
        }
    }

    /// Run the worker in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting redispatch worker (interval={:?}, batch={}, max_attempts={})",
            self.config.interval,
            self.config.batch_size,
            self.config.max_attempts
        );

        let mut interval = interval(self.config.interval);

        loop {
            interval.tick().await;

            if let Err(e) = self.process_batch().await {
                tracing::error!("Error processing redispatch batch: {:?}", e);
            }
        }
    }

    /// Run one matching round for each unmatched pending request
    async fn process_batch(&self) -> Result<usize> {
        let requests = self
            .request_service
            .fetch_unmatched(self.config.max_attempts, self.config.batch_size)
            .await?;

        if requests.is_empty() {
            return Ok(0);
        }

        tracing::info!("Redispatching {} unmatched request(s)", requests.len());

        let mut matched = 0;
        for request in requests {
            match self.request_service.dispatch(&request).await {
                Ok(matches) if !matches.is_empty() => matched += 1,
                Ok(_) => {
                    if request.dispatch_attempts + 1 >= self.config.max_attempts {
                        tracing::warn!(
                            "Giving up on {} after {} dispatch attempts",
                            request.reference_number,
                            request.dispatch_attempts + 1
                        );
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to redispatch request {}: {:?}",
                        request.reference_number,
                        e
                    );
                }
            }
        }

        Ok(matched)
    }
}
