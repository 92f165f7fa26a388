// crates/cityseed-core/src/model/mod.rs
pub mod convert;
pub mod domain;
pub mod raw;

pub use domain::{CitySeed, CountryDataset, Dataset, ResolvedTranslation, Translation};
pub use raw::{CityRaw, CountryFileRaw, CountryRef, ReferenceData, RegionRef, ZoneRef};

/// File suffix of a bincode bundle of this model.
#[cfg(not(feature = "compact"))]
pub const BUNDLE_SUFFIX: &str = ".bin";
#[cfg(feature = "compact")]
pub const BUNDLE_SUFFIX: &str = ".bin.gz";
