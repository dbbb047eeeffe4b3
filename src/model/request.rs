use std::fmt::Display;

use reqwest::Method;
use url::Url;

use super::RequestError;

/// An HTTP request sent to the API.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ApiRequest {
    /// The HTTP method.
    pub(crate) method: Method,

    /// The absolute URL.
    pub(crate) url: String,
}

impl ApiRequest {
    /// Creates a new `ApiRequest` with the given method and absolute URL.
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
        }
    }

    /// Retrieves the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Retrieves the absolute URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Creates a dummy `ApiRequest` for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy() -> Self {
        Self::new(Method::GET, "https://api.github.com/repos/org-1/repository-1")
    }
}

impl Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A request for one page of an index endpoint.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PageRequest {
    /// The HTTP method.
    pub(crate) method: Method,

    /// The absolute URL of the index endpoint.
    pub(crate) endpoint: String,

    /// The page number, starting at 1.
    pub(crate) page: u32,

    /// The number of items per page, if the server default is not wanted.
    pub(crate) per_page: Option<u32>,
}

impl PageRequest {
    /// Creates a new `PageRequest` for the given endpoint and page.
    pub fn new(method: Method, endpoint: &str, page: u32, per_page: Option<u32>) -> Self {
        Self {
            method,
            endpoint: endpoint.to_string(),
            page,
            per_page,
        }
    }

    /// Retrieves the page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Builds the URL of the page by appending the pagination query parameters
    /// to the endpoint URL.
    pub fn url(&self) -> Result<String, RequestError> {
        let mut url = Url::parse(&self.endpoint).map_err(|source| RequestError::InvalidUrl {
            url: self.endpoint.clone(),
            source,
        })?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(per_page) = self.per_page {
                query.append_pair("per_page", &per_page.to_string());
            }
            query.append_pair("page", &self.page.to_string());
        }

        Ok(url.to_string())
    }

    /// Converts the page request into an API request.
    pub fn to_api_request(&self) -> Result<ApiRequest, RequestError> {
        Ok(ApiRequest::new(self.method.clone(), &self.url()?))
    }
}

impl Display for PageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PageRequest: method={}, endpoint={}, page={}, per_page={:?}",
            self.method, self.endpoint, self.page, self.per_page
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_appends_page_parameter() {
        let request = PageRequest::new(
            Method::GET,
            "https://api.github.com/users/user-1/repos",
            3,
            None,
        );

        assert_eq!(
            "https://api.github.com/users/user-1/repos?page=3",
            request.url().unwrap()
        );
    }

    #[test]
    fn page_url_keeps_existing_query() {
        let request = PageRequest::new(
            Method::GET,
            "https://api.github.com/users/user-1/repos?type=owner",
            1,
            Some(100),
        );

        assert_eq!(
            "https://api.github.com/users/user-1/repos?type=owner&per_page=100&page=1",
            request.url().unwrap()
        );
    }

    #[test]
    fn page_url_fails_on_relative_endpoint() {
        let request = PageRequest::new(Method::GET, "/users/user-1/repos", 1, None);

        let error = request.url().expect_err("Expected an invalid URL error");

        assert!(matches!(error, RequestError::InvalidUrl { .. }));
    }
}
