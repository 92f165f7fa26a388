// crates/cityseed-core/src/seed/mod.rs

//! # Seeder
//!
//! Writes a validated [`Dataset`] into the database.
//!
//! Every country goes through the same steps:
//! 1. resolve the parent country row by `cca2` (warn and skip if absent),
//! 2. upsert each city by its unique `code`,
//! 3. upsert one translation per `(city_id, locale)`.
//!
//! Statements are awaited one at a time; rerunning a seed is always safe.

use crate::error::SeedError;
use crate::model::{CountryDataset, Dataset};
use crate::settings::{SeedSettings, DEFAULT_LOCALES};
use crate::text::is_locale_key;
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::fmt;
use tracing::info;

pub mod city;
pub mod reference;

pub use city::seed_country;
pub use reference::{seed_reference, ReferenceReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Locales written for every city, on top of the ones the record carries.
    pub locales: Vec<String>,
    /// Fail with [`SeedError::MissingCountry`] instead of skipping.
    pub strict: bool,
    /// Wrap each country in its own transaction.
    pub atomic: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            locales: DEFAULT_LOCALES.iter().map(|s| s.to_string()).collect(),
            strict: false,
            atomic: false,
        }
    }
}

impl SeedOptions {
    /// Fails on the first configured locale that is not a locale key
    /// (`en`, `lt`, ...). Checked before anything is written.
    pub fn check_locales(&self) -> Result<(), SeedError> {
        match self.locales.iter().find(|l| !is_locale_key(l.as_str())) {
            Some(bad) => Err(SeedError::InvalidLocale(bad.clone())),
            None => Ok(()),
        }
    }
}

/// Locales from config files, the environment or `--locales` are trimmed
/// here; blank entries are kept so that [`SeedOptions::check_locales`]
/// rejects them.
impl From<&SeedSettings> for SeedOptions {
    fn from(settings: &SeedSettings) -> Self {
        Self {
            locales: settings.locales.iter().map(|l| l.trim().to_string()).collect(),
            strict: settings.strict,
            atomic: settings.atomic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStatus {
    Seeded,
    SkippedMissingCountry,
}

/// Outcome of seeding one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub country: String,
    pub status: SeedStatus,
    pub cities: usize,
    pub translations: usize,
    /// Region codes that had no row; the cities got a null `region_id`.
    pub unresolved_regions: Vec<String>,
    /// Zone codes that had no row; the cities got a null `zone_id`.
    pub unresolved_zones: Vec<String>,
}

impl SeedReport {
    pub(crate) fn new(country: &str) -> Self {
        Self {
            country: country.to_string(),
            status: SeedStatus::Seeded,
            cities: 0,
            translations: 0,
            unresolved_regions: Vec::new(),
            unresolved_zones: Vec::new(),
        }
    }

    pub(crate) fn skipped(country: &str) -> Self {
        Self {
            status: SeedStatus::SkippedMissingCountry,
            ..Self::new(country)
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.status == SeedStatus::SkippedMissingCountry
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            SeedStatus::SkippedMissingCountry => {
                write!(f, "{}: skipped (country not in database)", self.country)
            }
            SeedStatus::Seeded => write!(
                f,
                "{}: {} cities, {} translations",
                self.country, self.cities, self.translations
            ),
        }
    }
}

/// Seeds every country of `dataset`, or only those listed in `selection`
/// (in dataset order).
///
/// # Errors
///
/// * `SeedError::InvalidLocale` if a configured locale is not a locale key.
/// * `SeedError::Dataset` if `selection` names a country the dataset lacks.
/// * `SeedError::MissingCountry` in strict mode.
/// * `SeedError::Db` on any persistence failure. Countries seeded before the
///   failure stay written.
pub async fn seed_dataset<C>(
    db: &C,
    dataset: &Dataset,
    selection: Option<&[&str]>,
    opts: &SeedOptions,
) -> Result<Vec<SeedReport>, SeedError>
where
    C: ConnectionTrait + TransactionTrait,
{
    opts.check_locales()?;
    let countries: Vec<&CountryDataset> = match selection {
        Some(codes) => dataset.select(codes)?,
        None => dataset.countries.iter().collect(),
    };

    let mut reports = Vec::with_capacity(countries.len());
    for country in countries {
        reports.push(seed_country(db, country, opts).await?);
    }

    let skipped = reports.iter().filter(|r| r.is_skipped()).count();
    info!(
        countries = reports.len() - skipped,
        skipped,
        cities = reports.iter().map(|r| r.cities).sum::<usize>(),
        "seeding finished"
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_locales_are_trimmed() {
        let settings = SeedSettings {
            locales: vec!["en".into(), " lt".into(), "pl ".into()],
            ..SeedSettings::default()
        };
        let opts = SeedOptions::from(&settings);
        assert_eq!(opts.locales, ["en", "lt", "pl"]);
        assert!(opts.check_locales().is_ok());
    }

    #[test]
    fn bad_locales_are_rejected() {
        for bad in ["EN", "", "en-US", "e"] {
            let opts = SeedOptions {
                locales: vec!["en".into(), bad.into()],
                ..SeedOptions::default()
            };
            assert!(
                matches!(opts.check_locales(), Err(SeedError::InvalidLocale(l)) if l == bad),
                "{bad:?} accepted"
            );
        }
    }
}
