//! HTTP client for the MediaWiki Action API.
//!
//! [`WikiClient`] fetches the raw wikitext body of pages by title via
//! `action=query&prop=revisions&rvprop=content` and unwraps the JSON
//! envelope. No retries, no caching; failures map onto the shared
//! error type so callers can tell transport faults, API complaints,
//! and missing pages apart.

pub mod envelope;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use wikiharvest_shared::{ApiConfig, Result, WikiHarvestError};

use crate::envelope::QueryResponse;

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("wikiharvest/", env!("CARGO_PKG_VERSION"));

/// A configured MediaWiki API client.
#[derive(Debug)]
pub struct WikiClient {
    client: Client,
    endpoint: Url,
}

impl WikiClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            WikiHarvestError::config(format!("invalid api endpoint '{}': {e}", config.endpoint))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WikiHarvestError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Fetch the raw wikitext body of a page by title.
    #[instrument(skip_all, fields(title = %title))]
    pub async fn fetch_page(&self, title: &str) -> Result<String> {
        debug!("fetching page");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("format", "json"),
                ("action", "query"),
                ("titles", title),
                ("prop", "revisions"),
                ("rvprop", "content"),
            ])
            .send()
            .await
            .map_err(|e| WikiHarvestError::network(format!("{title}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiHarvestError::network(format!(
                "{title}: HTTP {status}"
            )));
        }

        let decoded: QueryResponse = response
            .json()
            .await
            .map_err(|e| WikiHarvestError::api(format!("{title}: undecodable response: {e}")))?;

        let content = envelope::extract_content(decoded, title)?;
        debug!(bytes = content.len(), "page fetched");
        Ok(content)
    }
}
