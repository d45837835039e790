//! MediaWiki Action API response envelope.
//!
//! A revisions query answers with the page body buried three levels
//! deep: `query.pages.<pageid>.revisions[0]."*"`. These structs model
//! just the members needed to dig it out; everything else in the
//! response is ignored.

use std::collections::HashMap;

use serde::Deserialize;

use wikiharvest_shared::{Result, WikiHarvestError};

/// Top-level response of a `action=query` request.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<Query>,
    /// Present instead of `query` when the API rejects the request.
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// The `query` member.
#[derive(Debug, Deserialize)]
pub struct Query {
    /// Pages keyed by page id (`"-1"` for titles that do not exist).
    pub pages: HashMap<String, Page>,
}

/// One entry of the `pages` map.
#[derive(Debug, Deserialize)]
pub struct Page {
    /// Set (to an empty string) when the title does not exist.
    #[serde(default)]
    pub missing: Option<String>,
    #[serde(default)]
    pub revisions: Option<Vec<Revision>>,
}

/// One revision; the body lives under the `*` key.
#[derive(Debug, Deserialize)]
pub struct Revision {
    #[serde(rename = "*")]
    pub content: String,
}

/// MediaWiki error object.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub info: String,
}

/// Unwrap a decoded response down to the raw wikitext body.
///
/// Queries here always name a single title, so the sole entry of the
/// `pages` map is the one that counts.
pub fn extract_content(response: QueryResponse, title: &str) -> Result<String> {
    if let Some(error) = response.error {
        return Err(WikiHarvestError::api(format!(
            "{}: {}",
            error.code, error.info
        )));
    }

    let query = response
        .query
        .ok_or_else(|| WikiHarvestError::api("response has no query member"))?;

    let page = query
        .pages
        .into_values()
        .next()
        .ok_or_else(|| WikiHarvestError::api("response has an empty pages map"))?;

    if page.missing.is_some() {
        return Err(WikiHarvestError::page_missing(title));
    }

    page.revisions
        .and_then(|revisions| revisions.into_iter().next())
        .map(|revision| revision.content)
        .ok_or_else(|| WikiHarvestError::page_missing(title))
}
