use std::time::Duration;

use super::RequestError;

/// The production REST endpoint for GitHub.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// The default maximum time to wait on 202 Accepted responses.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30);

/// The default delay between two attempts of a request answered with 202 Accepted.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// The default timeout of a single HTTP exchange.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration of the API client.
///
/// A configuration is built once before the first request and handed to the
/// executor, which owns it for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The API username.
    pub(crate) user: String,

    /// The API access token or password.
    pub(crate) token: String,

    /// The API base URL, prefixed to relative request URLs.
    pub(crate) api_base: String,

    /// The maximum time to wait on 202 Accepted responses.
    pub(crate) max_wait: Duration,

    /// The delay between two attempts on 202 Accepted responses.
    pub(crate) retry_interval: Duration,

    /// The timeout of a single HTTP exchange.
    pub(crate) http_timeout: Duration,

    /// Log URLs as they're requested.
    pub(crate) debug_url: bool,

    /// Log the body of responses.
    pub(crate) debug_body: bool,
}

impl ClientConfig {
    /// Creates a new `ClientConfig` with the given credentials and default settings.
    pub fn new(user: &str, token: &str) -> Self {
        Self {
            user: user.to_string(),
            token: token.to_string(),
            api_base: GITHUB_API_ENDPOINT.to_string(),
            max_wait: DEFAULT_MAX_WAIT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            debug_url: false,
            debug_body: false,
        }
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Sets the maximum time to wait on 202 Accepted responses.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Sets the delay between two attempts on 202 Accepted responses.
    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    /// Sets the timeout of a single HTTP exchange.
    pub fn with_http_timeout(mut self, http_timeout: Duration) -> Self {
        self.http_timeout = http_timeout;
        self
    }

    /// Enables or disables the logging of requested URLs.
    pub fn with_debug_url(mut self, debug_url: bool) -> Self {
        self.debug_url = debug_url;
        self
    }

    /// Enables or disables the logging of response bodies.
    pub fn with_debug_body(mut self, debug_body: bool) -> Self {
        self.debug_body = debug_body;
        self
    }

    /// Retrieves the API username.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Retrieves the API access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Retrieves the API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Retrieves the maximum time to wait on 202 Accepted responses.
    pub fn max_wait(&self) -> Duration {
        self.max_wait
    }

    /// Retrieves the delay between two attempts on 202 Accepted responses.
    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Retrieves the timeout of a single HTTP exchange.
    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    /// The User-Agent header sent with every request.
    pub fn user_agent(&self) -> String {
        format!(
            "{}/{} (user={})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.user
        )
    }

    /// Checks that the credentials are set.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.user.is_empty() || self.token.is_empty() {
            return Err(RequestError::Configuration(
                "both a user and a token must be set".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolves a request URL: absolute URLs are kept, relative ones are
    /// appended to the API base URL.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("https://") || url.starts_with("http://") {
            return url.to_string();
        }

        format!("{}/{}", self.api_base, url.trim_start_matches('/'))
    }

    /// Creates a dummy `ClientConfig` instance for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy(api_base: &str) -> Self {
        Self::new("user-1", "token-1")
            .with_api_base(api_base)
            .with_max_wait(Duration::from_millis(200))
            .with_retry_interval(Duration::from_millis(10))
            .with_http_timeout(Duration::from_secs(5))
    }
}
