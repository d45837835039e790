//! Shared types, error model, and configuration for WikiHarvest.
//!
//! This crate is the foundation depended on by all other WikiHarvest crates.
//! It provides:
//! - [`WikiHarvestError`], the unified error type
//! - Domain records ([`InfoboxRecord`], [`RosterEntry`], [`SectionScoping`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ApiConfig, AppConfig, FetchConfig, SquadsConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{Result, WikiHarvestError};
pub use types::{InfoboxRecord, RosterEntry, SectionScoping};
