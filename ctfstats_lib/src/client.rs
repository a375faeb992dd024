//! Caching and retrying wrapper around the page fetcher.

use std::time::Duration;

use ctftime_api::Client;
use rand::Rng;

use crate::cache::DiskCache;
use crate::error::CtfStatsError;

/// Page fetcher wrapper that adds an on-disk response cache and retries.
///
/// Cache hits bypass the network entirely. On cache misses, transient
/// failures (transport errors, HTTP 429 and 5xx) are retried with jittered
/// exponential backoff. Successful bodies are written back to the cache.
pub struct CachedClient {
    inner: Client,
    cache: Option<DiskCache>,
    retry: RetryConfig,
}

/// Backoff settings for retried fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 2000,
            max_delay_ms: 30000,
        }
    }
}

impl RetryConfig {
    /// Reads `CTFSTATS_RETRY_MAX`, `CTFSTATS_RETRY_BASE_MS` and
    /// `CTFSTATS_RETRY_MAX_MS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("CTFSTATS_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("CTFSTATS_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("CTFSTATS_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

impl CachedClient {
    /// Creates a new client using the production site URL.
    pub fn new(cache: Option<DiskCache>) -> Self {
        Self {
            inner: Client::new(),
            cache,
            retry: RetryConfig::from_env(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, cache: Option<DiskCache>) -> Self {
        Self {
            inner: Client::with_base_url(base_url),
            cache,
            retry: RetryConfig::from_env(),
        }
    }

    /// Replaces the backoff settings read from the environment.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn with_retry_loop<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, CtfStatsError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, CtfStatsError>>,
    {
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !is_retryable(&err) {
                        return Err(err);
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        label,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Fetches a team's profile page, returning the cached body when available.
    pub async fn get_team_page(&self, team_id: &str) -> Result<String, CtfStatsError> {
        let cache_key = self.inner.team_url(team_id)?.to_string();

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&cache_key)) {
            tracing::info!("Using cached page for {}", cache_key);
            return Ok(cached);
        }

        let body = self
            .with_retry_loop("team page", || async {
                Ok(self.inner.get_team_page(team_id).await?)
            })
            .await?;
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&cache_key, &body) {
                tracing::warn!("Failed to cache {}: {}", cache_key, e);
            }
        }
        Ok(body)
    }
}

fn is_retryable(err: &CtfStatsError) -> bool {
    match err {
        CtfStatsError::Api(api_err) => match api_err {
            ctftime_api::Error::RequestFailed => true,
            ctftime_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        },
        _ => false,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}
