use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::{debug, info, warn};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    ApiRequest, ApiTransport, ClientConfig, RawResponse, ReqwestTransport, RequestError,
    ResponseClass, ResponseMeta,
};

/// Executes requests against a REST API and decodes their JSON body.
///
/// Requests answered with 202 Accepted are re-issued every retry interval
/// until the server returns the result, or until the maximum wait is exceeded.
pub struct RestExecutor {
    /// The client configuration, immutable once the executor is built.
    config: ClientConfig,

    /// The transport used to send requests.
    transport: Arc<dyn ApiTransport>,
}

impl RestExecutor {
    /// Creates a new `RestExecutor` sending requests over HTTP.
    pub fn try_new(config: ClientConfig) -> Result<Self, RequestError> {
        let transport = Arc::new(ReqwestTransport::try_new(&config)?);

        Self::try_new_with_transport(config, transport)
    }

    /// Creates a new `RestExecutor` with the given transport.
    pub fn try_new_with_transport(
        config: ClientConfig,
        transport: Arc<dyn ApiTransport>,
    ) -> Result<Self, RequestError> {
        config.validate()?;

        Ok(Self { config, transport })
    }

    /// Retrieves the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Executes a request and decodes the response body into `target`.
    ///
    /// - 204 No Content leaves `target` unchanged.
    /// - 202 Accepted is retried until the configured maximum wait is exceeded.
    /// - A status of 400 or higher returns a [`RequestError::Status`], even if
    ///   the body could be decoded into `target`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        target: &mut T,
        method: Method,
        url: &str,
    ) -> Result<ResponseMeta, RequestError> {
        self.execute_with_max_wait(target, method, url, self.config.max_wait())
            .await
    }

    /// Executes a request like [`RestExecutor::execute`] with a specific maximum wait.
    ///
    /// Useful for statistics endpoints, which can take minutes to compute.
    pub async fn execute_with_max_wait<T: DeserializeOwned>(
        &self,
        target: &mut T,
        method: Method,
        url: &str,
        max_wait: Duration,
    ) -> Result<ResponseMeta, RequestError> {
        let request = ApiRequest::new(method, &self.config.resolve_url(url));

        self.execute_request(target, &request, max_wait).await
    }

    pub(crate) async fn execute_request<T: DeserializeOwned>(
        &self,
        target: &mut T,
        request: &ApiRequest,
        max_wait: Duration,
    ) -> Result<ResponseMeta, RequestError> {
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            attempts += 1;
            if self.config.debug_url {
                info!("{request}");
            }
            let response = self.transport.send(request).await?;
            if self.config.debug_body {
                info!("{}", String::from_utf8_lossy(response.body()));
            }
            let meta = ResponseMeta::new(response.status(), attempts, start.elapsed());

            match response.class() {
                ResponseClass::Retry => {
                    let waited = start.elapsed();
                    if waited > max_wait {
                        warn!("Still getting 202 Accepted after {waited:?} for {request}");
                        return Err(RequestError::WaitTimeout {
                            method: request.method().clone(),
                            url: request.url().to_string(),
                            waited,
                        });
                    }
                    debug!(
                        "Attempt #{attempts} got 202 Accepted for {request}, retrying in {:?}",
                        self.config.retry_interval()
                    );
                    sleep(self.config.retry_interval()).await;
                }
                ResponseClass::NoContent => return Ok(meta),
                ResponseClass::Success => {
                    *target = decode(&response, request)?;
                    return Ok(meta);
                }
                ResponseClass::ClientOrServerError => {
                    // The status is the root cause, a decode failure is not reported.
                    if let Ok(decoded) = decode(&response, request) {
                        *target = decoded;
                    }
                    return Err(RequestError::Status {
                        method: request.method().clone(),
                        url: request.url().to_string(),
                        status_text: meta.status_text(),
                        status_code: meta.status().as_u16(),
                    });
                }
            }
        }
    }
}

fn decode<T: DeserializeOwned>(
    response: &RawResponse,
    request: &ApiRequest,
) -> Result<T, RequestError> {
    serde_json::from_slice(response.body()).map_err(|source| RequestError::Decode {
        method: request.method().clone(),
        url: request.url().to_string(),
        source,
    })
}
