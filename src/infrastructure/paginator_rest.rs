use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{PageRequest, PaginationError, RequestError, RestExecutor};

/// The maximum number of pages fetched serially, a guard against servers that never
/// return an empty page.
pub const MAX_SERIAL_PAGES: u32 = 999;

/// The items and errors shared by the page tasks of a concurrent run.
struct PageAccumulator<T> {
    items: Vec<T>,
    errors: PaginationError,
}

/// Walks the pages of an index endpoint and accumulates their items.
#[derive(Clone)]
pub struct Paginator {
    executor: Arc<RestExecutor>,
    per_page: Option<u32>,
}

impl Paginator {
    /// Creates a new `Paginator` instance with the given executor.
    pub fn new(executor: Arc<RestExecutor>) -> Self {
        Self {
            executor,
            per_page: None,
        }
    }

    /// Sets the number of items requested per page.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Fetches the pages of an index endpoint and appends their items to `target`.
    ///
    /// If `page_count` is higher than zero, exactly that number of pages is fetched
    /// concurrently, and the order of items across pages is not guaranteed. If it
    /// is zero, pages are fetched serially until an empty page is returned.
    ///
    /// Items of the pages that succeeded are kept in `target` when an error is returned.
    pub async fn paginate<T>(
        &self,
        target: &mut Vec<T>,
        method: Method,
        url: &str,
        page_count: u32,
    ) -> Result<(), RequestError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let endpoint = self.executor.config().resolve_url(url);
        if page_count == 0 {
            self.paginate_serial(target, method, &endpoint).await
        } else {
            self.paginate_concurrent(target, method, &endpoint, page_count)
                .await
        }
    }

    async fn paginate_serial<T: DeserializeOwned>(
        &self,
        target: &mut Vec<T>,
        method: Method,
        endpoint: &str,
    ) -> Result<(), RequestError> {
        let mut errors = PaginationError::default();
        for page in 1..=MAX_SERIAL_PAGES {
            let page_request = PageRequest::new(method.clone(), endpoint, page, self.per_page);
            match fetch_page::<T>(&self.executor, &page_request).await {
                Ok(items) if items.is_empty() => {
                    debug!("Empty page {page} for {endpoint}, stopping");
                    return errors.into_result();
                }
                Ok(mut items) => {
                    debug!("Fetched {} items from page {page} of {endpoint}", items.len());
                    target.append(&mut items);
                }
                Err(e) => {
                    warn!("Fetching page {page} of {endpoint} failed: {e}");
                    errors.push(page, e);
                    return errors.into_result();
                }
            }
        }
        warn!("Reached the limit of {MAX_SERIAL_PAGES} pages for {endpoint}");

        errors.into_result()
    }

    async fn paginate_concurrent<T>(
        &self,
        target: &mut Vec<T>,
        method: Method,
        endpoint: &str,
        page_count: u32,
    ) -> Result<(), RequestError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let accumulator = Arc::new(Mutex::new(PageAccumulator {
            items: Vec::new(),
            errors: PaginationError::default(),
        }));

        let mut handles = Vec::new();
        for page in 1..=page_count {
            let page_request = PageRequest::new(method.clone(), endpoint, page, self.per_page);
            let executor = Arc::clone(&self.executor);
            let accumulator = Arc::clone(&accumulator);
            let handle = tokio::spawn(async move {
                let result = fetch_page::<T>(&executor, &page_request).await;
                let mut accumulator = accumulator.lock().await;
                match result {
                    Ok(mut items) => accumulator.items.append(&mut items),
                    Err(e) => {
                        warn!("Fetching page {page} of {} failed: {e}", page_request.endpoint);
                        accumulator.errors.push(page, e);
                    }
                }
            });
            handles.push((page, handle));
        }
        info!("Started {page_count} page tasks for {endpoint}");

        let mut task_errors = Vec::new();
        for (page, handle) in handles {
            if let Err(e) = handle.await {
                task_errors.push((page, e.to_string()));
            }
        }

        let mut accumulator = accumulator.lock().await;
        for (page, message) in task_errors {
            accumulator
                .errors
                .push(page, RequestError::Task { page, message });
        }
        target.append(&mut accumulator.items);

        std::mem::take(&mut accumulator.errors).into_result()
    }
}

async fn fetch_page<T: DeserializeOwned>(
    executor: &RestExecutor,
    page_request: &PageRequest,
) -> Result<Vec<T>, RequestError> {
    let request = page_request.to_api_request()?;
    let mut items = Vec::new();
    executor
        .execute_request(&mut items, &request, executor.config().max_wait())
        .await?;

    Ok(items)
}
