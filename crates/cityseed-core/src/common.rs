// crates/cityseed-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Locale every city is guaranteed to carry, and the one missing locales
/// fall back to.
pub const FALLBACK_LOCALE: &str = "en";

/// Hierarchy depth written for every seeded city.
pub const CITY_LEVEL: i32 = 1;

/// Sort order written for every seeded city.
pub const CITY_SORT_ORDER: i32 = 0;

/// Simple aggregate statistics for a loaded dataset.
///
/// Returned by [`Dataset::stats`](crate::Dataset::stats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub countries: usize,
    pub cities: usize,
    pub translations: usize,
    pub capitals: usize,
}
