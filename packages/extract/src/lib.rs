//! Record extraction from parsed wikitext.
//!
//! Three extractors operate on a [`wikiharvest_wikitext::Document`]:
//! - [`resolve_date`] reads a calendar date out of a nested date template
//! - [`extract_infobox`] builds the subject's biographical record
//! - [`extract_roster`] / [`roster_entries`] walk a squads page and
//!   collect the target section's players with their computed ages

pub mod dates;
pub mod infobox;
pub mod roster;

pub use dates::resolve_date;
pub use infobox::extract_infobox;
pub use roster::{extract_roster, roster_entries};
