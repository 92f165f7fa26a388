// crates/cityseed-core/src/model/convert.rs
use super::domain::{CitySeed, CountryDataset, Dataset, Translation};
use super::raw::{CityRaw, CountryFileRaw};
use crate::error::{DatasetError, Result};
use crate::text::{has_control_chars, is_iso2, is_locale_key, slugify};
use std::collections::{BTreeMap, HashMap};

/// A parsed data file together with the name it was read from.
pub type SourceFile = (String, CountryFileRaw);

/// **Standard Converter:** Raw -> validated [`Dataset`].
///
/// Checks run in file order and stop at the first failure:
/// 1. country codes are ISO2 and appear in one file only;
/// 2. every city code carries its country prefix and is unique across
///    the *whole* dataset;
/// 3. coordinates, population, locale keys and text fields are sane;
/// 4. a country marks at most one capital and one default city.
///
/// Slugs are assigned last, since disambiguation needs every city.
pub fn from_raw(files: Vec<SourceFile>) -> Result<Dataset> {
    let mut countries: Vec<CountryDataset> = Vec::with_capacity(files.len());
    let mut country_files: HashMap<String, String> = HashMap::new();
    let mut code_files: HashMap<String, String> = HashMap::new();

    for (file, raw) in files {
        let iso2 = raw.country.trim().to_string();
        if !is_iso2(&iso2) {
            return Err(DatasetError::InvalidCountryCode {
                file,
                code: raw.country,
            });
        }
        if let Some(first) = country_files.insert(iso2.clone(), file.clone()) {
            return Err(DatasetError::DuplicateCountry {
                country: iso2,
                first,
                second: file,
            });
        }

        let mut cities = Vec::with_capacity(raw.cities.len());
        for city_raw in raw.cities {
            let city = convert_city(&iso2, city_raw)?;
            if let Some(first) = code_files.insert(city.code.clone(), file.clone()) {
                return Err(DatasetError::DuplicateCode {
                    code: city.code,
                    first,
                    second: file,
                });
            }
            cities.push(city);
        }

        check_single_flag(&cities, |c| c.is_capital).map_err(|(first, second)| {
            DatasetError::MultipleCapitals {
                country: iso2.clone(),
                first,
                second,
            }
        })?;
        check_single_flag(&cities, |c| c.is_default).map_err(|(first, second)| {
            DatasetError::MultipleDefaults {
                country: iso2.clone(),
                first,
                second,
            }
        })?;

        countries.push(CountryDataset {
            country: iso2,
            cities,
        });
    }

    countries.sort_by(|a, b| a.country.cmp(&b.country));
    let mut dataset = Dataset { countries };
    assign_slugs(&mut dataset);
    Ok(dataset)
}

fn convert_city(iso2: &str, raw: CityRaw) -> Result<CitySeed> {
    let code = raw.code.trim().to_string();
    if code.is_empty() {
        return Err(DatasetError::EmptyField {
            code: format!("{iso2}-?"),
            field: "code",
        });
    }
    let prefix_ok = code
        .split_once('-')
        .is_some_and(|(head, tail)| head == iso2 && !tail.is_empty());
    if !prefix_ok {
        return Err(DatasetError::ForeignCode {
            code,
            country: iso2.to_string(),
        });
    }

    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return Err(DatasetError::EmptyField {
            code,
            field: "name",
        });
    }

    let lat_ok = raw.latitude.is_finite() && (-90.0..=90.0).contains(&raw.latitude);
    let lng_ok = raw.longitude.is_finite() && (-180.0..=180.0).contains(&raw.longitude);
    if !lat_ok || !lng_ok {
        return Err(DatasetError::CoordinateOutOfRange {
            code,
            latitude: raw.latitude,
            longitude: raw.longitude,
        });
    }
    if raw.population < 0 {
        return Err(DatasetError::NegativePopulation {
            code,
            population: raw.population,
        });
    }

    check_text(&code, "name", &name)?;
    for postal in &raw.postal_codes {
        check_text(&code, "postal_codes", postal)?;
    }

    let mut translations = BTreeMap::new();
    for (locale, t) in raw.translations {
        if !is_locale_key(&locale) {
            return Err(DatasetError::InvalidLocale { code, locale });
        }
        if let Some(n) = &t.name {
            check_text(&code, &format!("translations.{locale}.name"), n)?;
        }
        if let Some(d) = &t.description {
            check_text(&code, &format!("translations.{locale}.description"), d)?;
        }
        translations.insert(
            locale,
            Translation {
                name: t.name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
                description: t
                    .description
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            },
        );
    }

    Ok(CitySeed {
        slug: raw
            .slug
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_default(),
        code,
        name,
        region: raw.region.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        zone: raw.zone.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        latitude: raw.latitude,
        longitude: raw.longitude,
        population: raw.population,
        postal_codes: raw.postal_codes,
        is_capital: raw.is_capital,
        is_default: raw.is_default,
        translations,
    })
}

fn check_text(code: &str, field: &str, value: &str) -> Result<()> {
    if has_control_chars(value) {
        return Err(DatasetError::ControlCharacter {
            code: code.to_string(),
            field: field.to_string(),
        });
    }
    Ok(())
}

fn check_single_flag(
    cities: &[CitySeed],
    flag: impl Fn(&CitySeed) -> bool,
) -> std::result::Result<(), (String, String)> {
    let mut flagged = cities.iter().filter(|&c| flag(c));
    match (flagged.next(), flagged.next()) {
        (Some(first), Some(second)) => Err((first.code.clone(), second.code.clone())),
        _ => Ok(()),
    }
}

/// Fills in derived slugs and disambiguates collisions.
///
/// Explicit slugs from the data file are kept verbatim. A derived slug that
/// collides with any other slug in the dataset gets `-<code>` appended.
fn assign_slugs(dataset: &mut Dataset) {
    let mut derived = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for city in dataset.countries.iter_mut().flat_map(|c| c.cities.iter_mut()) {
        derived.push(city.slug.is_empty());
        if city.slug.is_empty() {
            city.slug = slugify(&city.name);
        }
        if city.slug.is_empty() {
            // nothing transliterable in the name
            city.slug = city.code.to_ascii_lowercase();
        }
        *counts.entry(city.slug.clone()).or_default() += 1;
    }

    let cities = dataset.countries.iter_mut().flat_map(|c| c.cities.iter_mut());
    for (city, derived) in cities.zip(derived) {
        if derived && counts.get(&city.slug).copied().unwrap_or(0) > 1 {
            city.slug = format!("{}-{}", city.slug, city.code.to_ascii_lowercase());
        }
    }
}
