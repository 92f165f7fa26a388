// crates/cityseed-core/src/lib.rs

//! Declarative city reference data and the seeder that writes it.
//!
//! ```no_run
//! use cityseed_core::{db, seed, Dataset, ReferenceData, SeedOptions};
//! use cityseed_core::settings::DatabaseSettings;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let conn = db::connect(&DatabaseSettings::default()).await?;
//! db::ensure_schema(&conn).await?;
//!
//! seed::seed_reference(&conn, &ReferenceData::embedded()?).await?;
//! let reports = seed::seed_dataset(&conn, Dataset::embedded()?, Some(&["BY"][..]), &SeedOptions::default()).await?;
//! for report in reports {
//!     println!("{report}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod db;
pub mod error;
pub mod loader; // files, bundles, embedded copy
pub mod model;
pub mod search; // CitySearch for Dataset
pub mod seed;
pub mod settings;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::{DatasetStats, FALLBACK_LOCALE};
pub use crate::error::{DatasetError, Result, SeedError};
pub use crate::loader::CompressionMode;
pub use crate::model::{
    CitySeed, CountryDataset, Dataset, ReferenceData, ResolvedTranslation, Translation,
};
pub use crate::seed::{SeedOptions, SeedReport, SeedStatus};
pub use crate::settings::Settings;
// the lookup trait must be in scope for `Dataset::country` and friends
pub use crate::traits::{CitySearch, NameMatch};
