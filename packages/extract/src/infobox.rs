//! Infobox extraction.
//!
//! Finds the page's infobox template and reads the subject's name and
//! life dates from it. A missing infobox or name is a hard failure; a
//! date field that is absent or unresolvable degrades to `None` without
//! affecting the rest of the record.

use chrono::NaiveDate;
use tracing::debug;

use wikiharvest_shared::{InfoboxRecord, Result, WikiHarvestError};
use wikiharvest_wikitext::{Document, Template};

use crate::dates::resolve_date;

/// Extract the biographical record from a parsed page.
///
/// The infobox is the first top-level template whose name contains
/// `"infobox"` in any casing. The subject name comes from the
/// `birth_name` field when present, otherwise `name`.
pub fn extract_infobox(doc: &Document) -> Result<InfoboxRecord> {
    let infobox = doc
        .templates()
        .find(|t| t.name().to_ascii_lowercase().contains("infobox"))
        .ok_or(WikiHarvestError::MissingInfobox)?;

    let name = infobox
        .get("birth_name")
        .or_else(|| infobox.get("name"))
        .ok_or(WikiHarvestError::MissingName)?
        .trim()
        .to_string();

    Ok(InfoboxRecord {
        name,
        birth_date: date_field(infobox, "birth_date"),
        death_date: date_field(infobox, "death_date"),
    })
}

/// Resolve one date field, swallowing per-field failures.
fn date_field(infobox: &Template, field: &str) -> Option<NaiveDate> {
    let raw = infobox.get(field)?;
    match resolve_date(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(field, error = %err, "date field unresolved");
            None
        }
    }
}
