//! Application identity from Cargo.toml.
//!
//! Single source of truth for the app name, version, and display title.

/// Application name (from Cargo.toml `package.name`).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Application version (from Cargo.toml `package.version`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Title shown on the help card.
pub const TITLE: &str = "Kimisa Bot - GBVSR Frame Data";
