//! Shared HTTP plumbing for the OpenRouteService adapters.
//!
//! [`OrsConfig`] carries the endpoint, credentials and timeouts;
//! `OrsClient` owns the `reqwest` client and a Tokio runtime so the
//! synchronous collaborator traits can block on async requests.

use std::future::Future;
use std::time::Duration;

use hos_core::RoutingError;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Error type for HTTP adapter construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Public OpenRouteService endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default user agent for OpenRouteService requests.
pub const DEFAULT_USER_AGENT: &str = "hos-planner/0.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration shared by [`crate::HttpRouteProvider`] and
/// [`crate::HttpGeocoder`].
#[derive(Clone)]
pub struct OrsConfig {
    /// Base URL for the service (e.g., `"https://api.openrouteservice.org"`).
    pub base_url: String,
    /// API key sent in the `Authorization` header, if any.
    pub api_key: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OrsConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Join `path` onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// HTTP client plus the runtime used to drive it from synchronous code.
///
/// When called from outside any Tokio runtime, requests run on the stored
/// `current_thread` runtime. Inside a multi-threaded runtime the caller's
/// handle is used with [`tokio::task::block_in_place`] to avoid nested
/// runtime panics. Inside a `current_thread` runtime the stored runtime is
/// used, which may deadlock if the caller's runtime drives IO this request
/// depends on.
pub(crate) struct OrsClient {
    http: Client,
    config: OrsConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OrsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsClient")
            .field("http", &self.http)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl OrsClient {
    pub(crate) fn new(config: OrsConfig) -> Result<Self, ProviderBuildError> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            http,
            config,
            runtime,
        })
    }

    pub(crate) const fn config(&self) -> &OrsConfig {
        &self.config
    }

    pub(crate) fn get(&self, url: &str) -> RequestBuilder {
        self.authorise(self.http.get(url))
    }

    pub(crate) fn post(&self, url: &str) -> RequestBuilder {
        self.authorise(self.http.post(url))
    }

    fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header(AUTHORIZATION, key.as_str()),
            None => request,
        }
    }

    /// Run `future` to completion from synchronous code.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    /// Convert a reqwest error to a `RoutingError`.
    pub(crate) fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_builder_pattern() {
        let config = OrsConfig::new("http://example.com")
            .with_api_key("secret")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    #[case("http://ors.example.com", "geocode/search")]
    #[case("http://ors.example.com/", "geocode/search")]
    #[case("http://ors.example.com/", "/geocode/search")]
    fn endpoint_joins_with_a_single_slash(#[case] base: &str, #[case] path: &str) {
        let config = OrsConfig::new(base);
        assert_eq!(
            config.endpoint(path),
            "http://ors.example.com/geocode/search"
        );
    }

    #[rstest]
    fn debug_output_hides_the_api_key() {
        let config = OrsConfig::default().with_api_key("secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn client_builds_from_defaults() {
        let client = OrsClient::new(OrsConfig::default()).expect("client should build");
        assert_eq!(client.config().base_url, DEFAULT_BASE_URL);
    }
}
