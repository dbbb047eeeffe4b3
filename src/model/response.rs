use std::{fmt::Display, time::Duration};

use reqwest::StatusCode;

use super::RequestError;

/// A raw HTTP response whose body has been fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub(crate) status: StatusCode,

    /// The response body.
    pub(crate) body: Vec<u8>,
}

impl RawResponse {
    /// Creates a new `RawResponse` instance.
    pub fn new(status: StatusCode, body: &[u8]) -> Self {
        Self {
            status,
            body: body.to_vec(),
        }
    }

    /// Retrieves the HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Retrieves the response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Classifies the response.
    pub fn class(&self) -> ResponseClass {
        ResponseClass::from(self.status)
    }
}

/// The classification of a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// The body holds the result and must be decoded.
    Success,

    /// 204 No Content: there is nothing to decode.
    NoContent,

    /// 202 Accepted: the result is being computed, the request must be re-issued later.
    Retry,

    /// 4xx or 5xx: the request failed.
    ClientOrServerError,
}

impl From<StatusCode> for ResponseClass {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::ACCEPTED => ResponseClass::Retry,
            StatusCode::NO_CONTENT => ResponseClass::NoContent,
            status if status.as_u16() >= 400 => ResponseClass::ClientOrServerError,
            _ => ResponseClass::Success,
        }
    }
}

/// Metadata of an executed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMeta {
    /// The status of the final response.
    pub(crate) status: StatusCode,

    /// The number of attempts, more than one if the server answered 202 Accepted.
    pub(crate) attempts: u32,

    /// The wall-clock time spent since the first attempt.
    pub(crate) elapsed: Duration,
}

impl ResponseMeta {
    /// Creates a new `ResponseMeta` instance.
    pub fn new(status: StatusCode, attempts: u32, elapsed: Duration) -> Self {
        Self {
            status,
            attempts,
            elapsed,
        }
    }

    /// Retrieves the status of the final response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Retrieves the status line text, e.g. "404 Not Found".
    pub fn status_text(&self) -> String {
        self.status.to_string()
    }

    /// Retrieves the number of attempts.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Retrieves the wall-clock time spent since the first attempt.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Display for ResponseMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Response: status={}, attempts={}, elapsed={:?}",
            self.status, self.attempts, self.elapsed
        )
    }
}

/// The items collected by a listing, with the error that interrupted it if any.
///
/// A listing with an error may still hold the items of the pages that succeeded.
#[derive(Debug)]
pub struct Listing<T> {
    /// The collected items.
    pub(crate) items: Vec<T>,

    /// The error raised while listing.
    pub(crate) error: Option<RequestError>,
}

impl<T> Listing<T> {
    /// Creates a new `Listing` instance.
    pub fn new(items: Vec<T>, error: Option<RequestError>) -> Self {
        Self { items, error }
    }

    /// Retrieves the collected items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Retrieves the error raised while listing.
    pub fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }

    /// Splits the listing into its items and error.
    pub fn into_parts(self) -> (Vec<T>, Option<RequestError>) {
        (self.items, self.error)
    }

    /// Converts the listing into a result, discarding partial items on error.
    pub fn into_result(self) -> Result<Vec<T>, RequestError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.items),
        }
    }
}
