// src/services/fetcher.rs

//! Page fetching with bounded retry and a politeness delay.

use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, ProgramSeed};
use crate::utils::http;
use crate::utils::log;

/// Fetches program pages with retry and rate-limiting courtesy.
pub struct PageFetcher {
    client: reqwest::Client,
    config: CrawlerConfig,
}

impl PageFetcher {
    /// Create a new fetcher with the given crawler configuration.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetch one page, retrying on transient failure.
    ///
    /// Attempts up to `retry_attempts` times with a fixed sleep between
    /// attempts, then returns the last error.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let attempts = self.config.retry_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match http::fetch_text(&self.client, url).await {
                Ok(body) => return Ok(body),
                Err(error) => {
                    log::warn(&format!(
                        "Fetch attempt {}/{} failed for {}: {}",
                        attempt, attempts, url, error
                    ));
                    last_error = Some(error);
                    if attempt < attempts {
                        tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms))
                            .await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::fetch(url, "retries exhausted")))
    }

    /// Fetch every seed's page with bounded concurrency, yielding one
    /// result per seed in seed order.
    ///
    /// A failed fetch becomes an `Err` entry for that program only; it
    /// never aborts the batch. The politeness delay spaces out completions
    /// as a rate-limiting courtesy.
    pub async fn fetch_all(&self, seeds: &[ProgramSeed]) -> Vec<(ProgramSeed, Result<String>)> {
        let delay = Duration::from_millis(self.config.request_delay_ms);
        let concurrency = self.config.max_concurrent.max(1);
        let base_url = self.config.base_url.clone();

        let mut fetched = Vec::with_capacity(seeds.len());
        let mut page_stream = stream::iter(seeds.iter().cloned())
            .map(|seed| {
                let url = seed.url(&base_url);
                async move {
                    let result = self.fetch(&url).await;
                    (seed, result)
                }
            })
            .buffered(concurrency);

        while let Some((seed, result)) = page_stream.next().await {
            if let Err(error) = &result {
                log::warn(&format!("Failed to fetch {}: {}", seed.key, error));
            }
            fetched.push((seed, result));

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        fetched
    }
}
