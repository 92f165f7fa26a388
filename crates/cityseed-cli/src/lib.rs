//! cityseed-cli
//! ============
//!
//! Command-line interface for the `cityseed-core` dataset and seeder.
//!
//! This crate primarily provides a binary (`cityseed`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cityseed validate
//! cityseed --database-url sqlite://cities.db?mode=rwc reference
//! cityseed --database-url sqlite://cities.db?mode=rwc seed BY FI LT
//! cityseed seed --all --atomic
//! cityseed compile --out cities.bin.gz
//! ```
//!
//! Settings can also come from `cityseed.toml` or `CITYSEED__*` environment
//! variables; command-line flags win.
//!
//! For programmatic access use the `cityseed_core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
