//! Wikitext parsing for WikiHarvest.
//!
//! Turns raw wiki markup into a flat [`Document`] of typed nodes:
//! headings, templates, and literal text. Only those three constructs
//! are modeled; everything else (links, formatting, tables) flows
//! through as text or as raw template parameter values. Rendering via
//! `Display` emits canonical wikitext that re-parses to an equivalent
//! tree, and nested markup inside parameter values is surfaced by
//! calling [`parse`] on the raw value again.

pub mod nodes;
pub mod parser;

pub use nodes::{Document, MarkupNode, Param, Template};
pub use parser::parse;
