// crates/cityseed-core/src/model/domain.rs
use crate::common::FALLBACK_LOCALE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The validated dataset: every country file, sorted by ISO2 code.
///
/// Built by [`crate::model::convert::from_raw`]; once a `Dataset` exists,
/// its city codes are globally unique and each country has at most one
/// capital and one default city.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub countries: Vec<CountryDataset>,
}

/// All cities of one country.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryDataset {
    /// ISO 3166-1 alpha-2, uppercase.
    pub country: String,
    pub cities: Vec<CitySeed>,
}

/// One localized text entry. Either half may be missing; see
/// [`CitySeed::translation`] for how gaps are filled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A city record ready to be written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CitySeed {
    pub code: String,
    pub name: String,
    pub slug: String,
    pub region: Option<String>, // e.g. "FI-18"
    pub zone: Option<String>,   // e.g. "EU"
    pub latitude: f64,
    pub longitude: f64,
    pub population: i64,
    pub postal_codes: Vec<String>,
    pub is_capital: bool,
    pub is_default: bool,
    pub translations: BTreeMap<String, Translation>,
}

/// Fully resolved text for one `(city, locale)` pair.
///
/// The text borrows from the city, the locale from the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTranslation<'c, 'l> {
    pub locale: &'l str,
    pub name: &'c str,
    pub description: &'c str,
}

impl CitySeed {
    /// Resolves the text for `locale`, field by field.
    ///
    /// Lookup order for the name: the locale's own entry, then the English
    /// entry, then the canonical [`CitySeed::name`]. The description falls
    /// back the same way but ends at an empty string.
    pub fn translation<'c, 'l>(&'c self, locale: &'l str) -> ResolvedTranslation<'c, 'l> {
        let own = self.translations.get(locale);
        let en = self.translations.get(FALLBACK_LOCALE);

        let name = own
            .and_then(|t| t.name.as_deref())
            .or_else(|| en.and_then(|t| t.name.as_deref()))
            .unwrap_or(&self.name);
        let description = own
            .and_then(|t| t.description.as_deref())
            .or_else(|| en.and_then(|t| t.description.as_deref()))
            .unwrap_or("");

        ResolvedTranslation {
            locale,
            name,
            description,
        }
    }

    /// Locales this city is written in: every requested locale, every locale
    /// the record carries itself, and always [`FALLBACK_LOCALE`].
    pub fn locales<'a>(&'a self, requested: &'a [String]) -> Vec<&'a str> {
        let mut out: Vec<&str> = requested
            .iter()
            .map(String::as_str)
            .chain(self.translations.keys().map(String::as_str))
            .chain(std::iter::once(FALLBACK_LOCALE))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// The name shown for `locale`, after fallback.
    pub fn name_in(&self, locale: &str) -> &str {
        self.translation(locale).name
    }
}

impl CountryDataset {
    pub fn iso2(&self) -> &str {
        &self.country
    }

    pub fn cities(&self) -> &[CitySeed] {
        &self.cities
    }

    /// The city flagged `is_capital`, if the file marks one.
    pub fn capital(&self) -> Option<&CitySeed> {
        self.cities.iter().find(|c| c.is_capital)
    }

    /// The city flagged `is_default`, if the file marks one.
    pub fn default_city(&self) -> Option<&CitySeed> {
        self.cities.iter().find(|c| c.is_default)
    }

    pub fn city(&self, code: &str) -> Option<&CitySeed> {
        self.cities.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }
}
