use crate::{ApiRequest, RawResponse, RequestError};

/// A trait for sending one HTTP request to the API.
///
/// Implementations read the whole response body before returning, so no
/// connection is left half-consumed whatever the caller does with the response.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ApiTransport: Sync + Send {
    /// Sends the request and returns the raw response.
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, RequestError>;
}
