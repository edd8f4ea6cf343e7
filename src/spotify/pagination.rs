use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::{LibraryError, Result},
    types::Page,
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Fetches `start` and every page reachable through its `next` links.
    ///
    /// Items are concatenated in page order. Pages are requested strictly one
    /// after another since each URL comes from the previous response.
    ///
    /// # Errors
    ///
    /// The first failing page aborts the listing; nothing collected so far is
    /// returned:
    /// - transport errors as [`LibraryError::Request`]
    /// - non-2xx statuses as [`LibraryError::Upstream`]
    /// - unparsable bodies as [`LibraryError::Decode`]
    /// - more than `max_pages` pages as [`LibraryError::PaginationLimitExceeded`]
    ///
    /// An empty `token` is sent as-is; the provider rejects it with a status
    /// error.
    pub async fn fetch_all<T: DeserializeOwned>(&self, start: Url, token: &str) -> Result<Vec<T>> {
        let mut items: Vec<T> = Vec::new();
        let mut next_url = Some(start.to_string());
        let mut pages_fetched = 0;

        while let Some(url) = next_url {
            if pages_fetched >= self.max_pages {
                warn!(url = %url, limit = self.max_pages, "Pagination limit reached");
                return Err(LibraryError::PaginationLimitExceeded {
                    url,
                    limit: self.max_pages,
                });
            }

            let page: Page<T> = self.get_page(&url, token).await?;
            pages_fetched += 1;

            debug!(
                url = %url,
                page = pages_fetched,
                items = page.items.len(),
                has_next = page.next.is_some(),
                "Fetched page"
            );

            items.extend(page.items);
            next_url = page.next.filter(|next| !next.is_empty());
        }

        Ok(items)
    }

    async fn get_page<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<Page<T>> {
        let response = self.http.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LibraryError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| LibraryError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
