//! Client configuration and retry behavior.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::error::OpenAIError;

/// Default `OpenAI` REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// TogetherAI's `OpenAI`-compatible endpoint.
pub const TOGETHER_BASE_URL: &str = "https://api.together.xyz/v1";
/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Dimension of the default embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// How the API key is transmitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>` (`OpenAI`, TogetherAI).
    Bearer,
    /// `api-key: <key>` header (Azure `OpenAI`).
    ApiKeyHeader,
}

/// Configuration for request retry behavior.
///
/// Delay grows exponentially per attempt:
/// `initial_delay * backoff_factor^attempt`, capped at `max_delay`, then
/// randomized by up to ±`jitter` fraction so simultaneous clients do not
/// retry in lockstep. After `max_retries` failed retries the final error is
/// returned to the caller.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound applied before jitter.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_factor: f64,
    /// Jitter fraction in `[0.0, 1.0)`; 0.1 means ±10%.
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(32),
            backoff_factor: 2.0,
            jitter: 0.1,
        }
    }
}

impl RetryConfig {
    /// Create a config with no retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Deterministic delay for a given attempt number (0-indexed), before
    /// jitter.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn base_delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }

    /// Delay for a given attempt with jitter applied.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.base_delay_for_attempt(attempt);
        if self.jitter <= 0.0 {
            return base;
        }
        let factor = 1.0 + rand::thread_rng().gen_range(-self.jitter..self.jitter);
        Duration::from_millis((base.as_millis() as f64 * factor) as u64)
    }
}

/// Resolved client configuration.
#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) auth_style: AuthStyle,
    pub(crate) embedding_model: String,
    pub(crate) embedding_dimensions: usize,
    pub(crate) retry: RetryConfig,
    pub(crate) http: reqwest::Client,
}

impl Config {
    pub(crate) fn request_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// `OpenAI`-compatible embedding client.
///
/// One configurable surface covers `OpenAI` itself plus the
/// Azure-`OpenAI`- and TogetherAI-style compatible endpoints: pick a preset
/// constructor or override the base URL and auth style by hand.
#[derive(Clone, Debug)]
pub struct OpenAI {
    inner: Arc<Config>,
}

impl OpenAI {
    /// Create a new client using the provided API key and default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).build()
    }

    /// Create a client configured for TogetherAI's `OpenAI`-compatible
    /// endpoint.
    pub fn together(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).base_url(TOGETHER_BASE_URL).build()
    }

    /// Create a client configured for an Azure `OpenAI` deployment
    /// endpoint. `endpoint` should point at the deployment base, e.g.
    /// `https://{resource}.openai.azure.com/openai/deployments/{name}`.
    pub fn azure(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::builder(api_key)
            .base_url(endpoint)
            .auth_style(AuthStyle::ApiKeyHeader)
            .build()
    }

    /// Start building an [`OpenAI`] client with custom configuration.
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> Builder {
        Builder::new(api_key)
    }

    pub(crate) fn config(&self) -> Arc<Config> {
        Arc::clone(&self.inner)
    }
}

/// Builder for [`OpenAI`] clients.
#[derive(Debug)]
pub struct Builder {
    api_key: String,
    base_url: String,
    auth_style: AuthStyle,
    embedding_model: String,
    embedding_dimensions: Option<usize>,
    retry: RetryConfig,
}

impl Builder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_style: AuthStyle::Bearer,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimensions: None,
            retry: RetryConfig::default(),
        }
    }

    /// Override the REST base URL (useful for `OpenAI`-compatible
    /// endpoints).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override how the API key is transmitted.
    #[must_use]
    pub const fn auth_style(mut self, style: AuthStyle) -> Self {
        self.auth_style = style;
        self
    }

    /// Override the embedding model identifier.
    #[must_use]
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Override the embedding dimension (defaults depend on the model).
    #[must_use]
    pub const fn embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.embedding_dimensions = Some(dimensions);
        self
    }

    /// Override retry behavior.
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> OpenAI {
        let embedding_dimensions = self
            .embedding_dimensions
            .or_else(|| infer_embedding_dim(&self.embedding_model))
            .unwrap_or(DEFAULT_EMBEDDING_DIM);
        OpenAI {
            inner: Arc::new(Config {
                api_key: self.api_key,
                base_url: self.base_url,
                auth_style: self.auth_style,
                embedding_model: self.embedding_model,
                embedding_dimensions,
                retry: self.retry,
                http: reqwest::Client::new(),
            }),
        }
    }
}

/// Known dimensions for common embedding models.
fn infer_embedding_dim(model: &str) -> Option<usize> {
    match model {
        "text-embedding-3-small" | "text-embedding-ada-002" => Some(1536),
        "text-embedding-3-large" => Some(3072),
        _ => None,
    }
}

/// Run `make_request` with the config's retry policy, sleeping between
/// retryable failures.
pub(crate) async fn request_with_retry<T, F, Fut>(
    retry: &RetryConfig,
    make_request: F,
) -> Result<T, OpenAIError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, OpenAIError>>,
{
    let mut attempt = 0;
    loop {
        match make_request().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt < retry.max_retries && err.is_retryable() {
                    let delay = retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = retry.max_retries,
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                } else {
                    return Err(err);
                }
            }
        }
    }
}
