//! Core domain types for WikiHarvest records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InfoboxRecord
// ---------------------------------------------------------------------------

/// Biographical facts extracted from a page's infobox template.
///
/// The name is mandatory; each date is independently optional because a
/// malformed or absent date field degrades that field alone, never the
/// whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoboxRecord {
    /// Subject name (`birth_name` field preferred over `name`).
    pub name: String,
    /// Date of birth, if the field was present and resolvable.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Date of death, if the field was present and resolvable.
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// RosterEntry
// ---------------------------------------------------------------------------

/// One squad member extracted from a roster template.
///
/// Never partially valid: an entry either carries both fields or was
/// dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Cleaned player name (link markup and annotations stripped).
    pub name: String,
    /// Completed years of age at the roster's reference date.
    pub age_years: i32,
}

// ---------------------------------------------------------------------------
// SectionScoping
// ---------------------------------------------------------------------------

/// How a section filter decides that the target section has ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionScoping {
    /// Any following titled heading closes the section, regardless of
    /// level. Matches the historical page layouts where each squad sits
    /// under a sibling heading.
    #[default]
    Flat,
    /// Only a heading at or above the activation level closes the
    /// section; deeper sub-headings (positions, staff) stay inside it.
    Nested,
}

impl std::fmt::Display for SectionScoping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Nested => write!(f, "nested"),
        }
    }
}

impl std::str::FromStr for SectionScoping {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "nested" => Ok(Self::Nested),
            other => Err(format!("unknown scoping '{other}': expected 'flat' or 'nested'")),
        }
    }
}
