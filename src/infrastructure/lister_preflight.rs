use std::sync::Arc;

use log::info;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::{Listing, MAX_ITEMS_PER_PAGE, OwnerSummary, Paginator, RestExecutor};

/// Lists every repository of a user or organization.
///
/// The owner summary is fetched first to learn the number of repositories, then
/// all the pages are fetched concurrently.
pub struct PreflightLister {
    executor: Arc<RestExecutor>,
    paginator: Paginator,
}

impl PreflightLister {
    /// Creates a new `PreflightLister` instance with the given executor.
    pub fn new(executor: Arc<RestExecutor>) -> Self {
        let paginator = Paginator::new(Arc::clone(&executor)).with_per_page(MAX_ITEMS_PER_PAGE);

        Self {
            executor,
            paginator,
        }
    }

    /// Lists all the repositories of a resource, e.g. `users/octocat` or `orgs/rust-lang`.
    ///
    /// The listing holds the repositories of the pages that succeeded, even when
    /// some pages failed.
    pub async fn list_all<T>(&self, resource: &str) -> Listing<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let resource = resource.trim_matches('/');
        let mut summary = OwnerSummary::default();
        if let Err(e) = self
            .executor
            .execute(&mut summary, Method::GET, &format!("/{resource}"))
            .await
        {
            return Listing::new(vec![], Some(e));
        }

        let page_count = summary.page_count(MAX_ITEMS_PER_PAGE);
        info!(
            "Listing {} repositories of {resource} in {page_count} pages",
            summary.total_repos()
        );
        if page_count == 0 {
            return Listing::new(vec![], None);
        }

        let mut items = Vec::new();
        let result = self
            .paginator
            .paginate(
                &mut items,
                Method::GET,
                &format!("/{resource}/repos"),
                page_count,
            )
            .await;

        Listing::new(items, result.err())
    }
}
