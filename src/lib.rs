//! Workspace host crate. Re-exports [`cityseed_core`] so the demos can use
//! a single import.

pub use cityseed_core::*;

pub mod prelude {
    pub use cityseed_core::db;
    pub use cityseed_core::seed::{seed_country, seed_dataset, seed_reference};
    pub use cityseed_core::settings::{DatabaseSettings, Settings};
    pub use cityseed_core::{
        CitySearch, CitySeed, CountryDataset, Dataset, DatasetError, NameMatch, ReferenceData,
        SeedError, SeedOptions, SeedReport, SeedStatus,
    };
}
