//! The connector handle — one configured client for the whole process.
//!
//! [`OpenAiConnector`] owns the `reqwest` client (shared,
//! connection-pooled), the API base, and the bearer credential. It is
//! constructed once from [`Config`] and injected wherever calls are made;
//! there is no ambient global handle. The endpoint methods live in the
//! capability modules (`chat`, `audio`, `moderation`, `assistants`) as
//! `impl OpenAiConnector` blocks; this module provides the shared request
//! plumbing they all go through.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

use murmur_core::config::schema::ModelsConfig;
use murmur_core::utils::truncate_string;
use murmur_core::Config;

use crate::error::{Error, Result};
use crate::observer::{CallObserver, TracingObserver};

/// Standard OpenAI API base.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Header required on all assistants-beta endpoints.
const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v1");

// ─────────────────────────────────────────────
// OpenAiConnector
// ─────────────────────────────────────────────

/// A typed connector to the OpenAI HTTP API.
///
/// Every capability (chat, audio, moderation, assistants) shares this one
/// handle. Credentials come from config; the key is never logged or
/// included in `Debug` output.
pub struct OpenAiConnector {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Extra headers to send with each request.
    extra_headers: HeaderMap,
    /// Default model per capability.
    pub(crate) models: ModelsConfig,
    /// Optional per-call latency observer.
    observer: Option<Arc<dyn CallObserver>>,
}

impl std::fmt::Debug for OpenAiConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConnector")
            .field("api_base", &self.api_base)
            .field("chat_model", &self.models.chat)
            .finish()
    }
}

impl OpenAiConnector {
    /// Create a connector from a loaded config.
    ///
    /// When `config.timing` is set, a [`TracingObserver`] is installed so
    /// every remote call logs its wall-clock latency.
    pub fn new(config: &Config) -> Self {
        let api_base = config
            .openai
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        // Build extra headers
        let mut extra_headers = HeaderMap::new();
        if let Some(ref headers) = config.openai.extra_headers {
            for (key, value) in headers {
                if let (Ok(name), Ok(val)) = (
                    HeaderName::from_bytes(key.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    extra_headers.insert(name, val);
                } else {
                    warn!("Invalid header: {}={}", key, value);
                }
            }
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        let observer: Option<Arc<dyn CallObserver>> = if config.timing {
            Some(Arc::new(TracingObserver))
        } else {
            None
        };

        OpenAiConnector {
            client,
            api_base,
            api_key: config.openai.api_key.clone(),
            extra_headers,
            models: config.models.clone(),
            observer,
        }
    }

    /// Create a connector from `~/.murmur/config.json` + env vars
    /// (`OPENAI_API_KEY` et al.).
    pub fn from_env() -> Self {
        Self::new(&murmur_core::load_config(None))
    }

    /// Replace the latency observer.
    pub fn with_observer(mut self, observer: Arc<dyn CallObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Whether an API key is present. An unconfigured connector still
    /// works against keyless endpoints (mock servers); real calls get the
    /// provider's 401.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Build the full URL for an endpoint path (which starts with `/`).
    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}{}", base, path)
    }

    fn observe(&self, operation: &'static str, started: Instant) {
        if let Some(obs) = &self.observer {
            obs.record(operation, started.elapsed());
        }
    }

    fn request(&self, method: reqwest::Method, url: &str, beta: bool) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .headers(self.extra_headers.clone());
        if beta {
            req = req.header(BETA_HEADER.0, BETA_HEADER.1);
        }
        req
    }

    /// Turn a non-success response into [`Error::Api`], carrying the body
    /// verbatim (only the log line truncates it).
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        error!(
            status = %status,
            body = %truncate_string(&body, 500),
            "API error"
        );
        Err(Error::Api { status, body })
    }

    // ── Shared request helpers (used by the capability modules) ──

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        beta: bool,
    ) -> Result<T> {
        let url = self.url(path);
        let started = Instant::now();
        let out = async {
            let response = self
                .request(reqwest::Method::GET, &url, beta)
                .send()
                .await?;
            self.check(response).await?.json::<T>().await.map_err(Error::from)
        }
        .await;
        self.observe(operation, started);
        out
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
        beta: bool,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let started = Instant::now();
        let out = async {
            let response = self
                .request(reqwest::Method::POST, &url, beta)
                .json(body)
                .send()
                .await?;
            self.check(response).await?.json::<T>().await.map_err(Error::from)
        }
        .await;
        self.observe(operation, started);
        out
    }

    /// POST a JSON body, return the raw response bytes (audio synthesis).
    pub(crate) async fn post_binary<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<Vec<u8>> {
        let url = self.url(path);
        let started = Instant::now();
        let out = async {
            let response = self
                .request(reqwest::Method::POST, &url, false)
                .json(body)
                .send()
                .await?;
            let bytes = self.check(response).await?.bytes().await?;
            Ok(bytes.to_vec())
        }
        .await;
        self.observe(operation, started);
        out
    }

    /// POST a multipart form (audio uploads).
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.url(path);
        let started = Instant::now();
        let out = async {
            let response = self
                .request(reqwest::Method::POST, &url, false)
                .multipart(form)
                .send()
                .await?;
            self.check(response).await?.json::<T>().await.map_err(Error::from)
        }
        .await;
        self.observe(operation, started);
        out
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
