use std::{fmt::Display, time::Duration};

use reqwest::Method;
use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// An error raised while executing a request against the API.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The client is not configured correctly (e.g. missing credentials).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The URL could not be parsed.
    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// The parser error.
        source: url::ParseError,
    },

    /// The request failed below the HTTP layer (DNS, connection, timeout...).
    #[error("Transport error for {method} {url}: {source}")]
    Transport {
        /// The HTTP method.
        method: Method,
        /// The requested URL.
        url: String,
        /// The underlying client error.
        source: reqwest::Error,
    },

    /// The server kept answering 202 Accepted for longer than allowed.
    #[error(
        "Waited longer than {waited:?} and still getting 202 Accepted for {method} {url}"
    )]
    WaitTimeout {
        /// The HTTP method.
        method: Method,
        /// The requested URL.
        url: String,
        /// The time spent waiting.
        waited: Duration,
    },

    /// The response body did not match the target shape.
    #[error("Decode error for {method} {url}: {source}")]
    Decode {
        /// The HTTP method.
        method: Method,
        /// The requested URL.
        url: String,
        /// The JSON error.
        source: serde_json::Error,
    },

    /// The server answered with a status code of 400 or higher.
    #[error("Code {status_text} for {method} {url}")]
    Status {
        /// The HTTP method.
        method: Method,
        /// The requested URL.
        url: String,
        /// The status line text, e.g. "404 Not Found".
        status_text: String,
        /// The numeric status code.
        status_code: u16,
    },

    /// One or more pages of a paginated run failed.
    #[error(transparent)]
    Aggregate(#[from] PaginationError),

    /// A page task panicked or was cancelled before completing.
    #[error("Page task {page} failed: {message}")]
    Task {
        /// The page handled by the task.
        page: u32,
        /// The join error message.
        message: String,
    },
}

impl RequestError {
    /// Returns the HTTP status code carried by a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns true if the error is a wait timeout on 202 Accepted.
    pub fn is_wait_timeout(&self) -> bool {
        matches!(self, RequestError::WaitTimeout { .. })
    }
}

/// The failure of a single page in a paginated run.
#[derive(Debug)]
pub struct PageError {
    /// The page number.
    pub page: u32,

    /// The error raised while fetching the page.
    pub error: RequestError,
}

impl Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}: {}", self.page, self.error)
    }
}

/// The failures gathered during a paginated run.
#[derive(Debug, Default)]
pub struct PaginationError {
    errors: Vec<PageError>,
}

impl PaginationError {
    /// Creates a new `PaginationError` from the given page errors.
    pub fn new(errors: Vec<PageError>) -> Self {
        Self { errors }
    }

    /// Records the failure of a page.
    pub fn push(&mut self, page: u32, error: RequestError) {
        self.errors.push(PageError { page, error });
    }

    /// Retrieves the page errors.
    pub fn errors(&self) -> &[PageError] {
        &self.errors
    }

    /// Returns true if no page failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failed pages.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Converts the aggregate into a result, `Ok` when no page failed.
    pub fn into_result(self) -> Result<(), RequestError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RequestError::Aggregate(self))
        }
    }
}

impl Display for PaginationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let errors = self
            .errors
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{} page(s) failed: [{errors}]", self.errors.len())
    }
}

impl std::error::Error for PaginationError {}
