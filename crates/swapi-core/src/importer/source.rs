//! Paginated SWAPI client.

use super::{ImportResult, Resource};
use crate::config::Settings;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Anything that can produce every record of a resource.
pub trait RecordSource {
    /// Fetch all records of `resource`. Transport failures end the fetch
    /// early and yield what was collected so far.
    fn fetch_all(&self, resource: Resource) -> Vec<serde_json::Value>;
}

/// One page of a SWAPI collection.
#[derive(Debug, Deserialize)]
struct Page {
    results: Vec<serde_json::Value>,
    next: Option<String>,
}

/// Blocking HTTP client for the remote API.
pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSource {
    /// Create a client rooted at `base_url` (e.g. `https://swapi.dev/api/`).
    pub fn new(base_url: &str, timeout: Duration, accept_invalid_certs: bool) -> ImportResult<Self> {
        if accept_invalid_certs {
            warn!(base_url = %base_url, "TLS certificate verification is disabled for SWAPI requests");
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_settings(settings: &Settings) -> ImportResult<Self> {
        Self::new(
            &settings.swapi_base_url,
            settings.request_timeout(),
            settings.accept_invalid_certs,
        )
    }

    /// First-page URL of a resource.
    pub fn resource_url(&self, resource: Resource) -> String {
        format!("{}{}/", self.base_url, resource.path())
    }

    /// Follow `next` links from `url`, accumulating every page's results.
    pub fn fetch_from(&self, url: &str) -> Vec<serde_json::Value> {
        let mut results = Vec::new();
        let mut next = Some(url.to_string());

        while let Some(url) = next.take() {
            match self.fetch_page(&url) {
                Ok(page) => {
                    debug!(url = %url, records = page.results.len(), "Fetched page");
                    results.extend(page.results);
                    next = page.next;
                }
                Err(e) => {
                    error!(url = %url, error = %e, "Error fetching page");
                    break;
                }
            }
        }

        results
    }

    fn fetch_page(&self, url: &str) -> reqwest::Result<Page> {
        self.client.get(url).send()?.error_for_status()?.json()
    }
}

impl RecordSource for HttpSource {
    fn fetch_all(&self, resource: Resource) -> Vec<serde_json::Value> {
        self.fetch_from(&self.resource_url(resource))
    }
}
