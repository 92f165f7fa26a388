// crates/cityseed-core/src/model/raw.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw translation entry as it appears in a data file:
/// `{ "name": "Minskas", "description": "..." }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationRaw {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Raw city record as it comes from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CityRaw {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Region code, e.g. "FI-18".
    #[serde(default)]
    pub region: Option<String>,
    /// Zone code, e.g. "EU".
    #[serde(default)]
    pub zone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub population: i64,
    #[serde(default)]
    pub postal_codes: Vec<String>,
    #[serde(default)]
    pub is_capital: bool,
    #[serde(default)]
    pub is_default: bool,
    /// translations: { "en": {...}, "lt": {...} }
    #[serde(default)]
    pub translations: BTreeMap<String, TranslationRaw>,
}

/// One data file: all cities of a single country.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountryFileRaw {
    pub country: String,
    #[serde(default)]
    pub cities: Vec<CityRaw>,
}

// -----------------------------------------------------------------------------
// REFERENCE DATA (countries, regions, zones)
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ZoneRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountryRef {
    pub cca2: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegionRef {
    /// ISO2 of the owning country.
    pub country: String,
    pub code: String,
    pub name: String,
}

/// Prerequisite rows the city seeder resolves its parents against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub zones: Vec<ZoneRef>,
    #[serde(default)]
    pub countries: Vec<CountryRef>,
    #[serde(default)]
    pub regions: Vec<RegionRef>,
}
