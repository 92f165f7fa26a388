// crates/cityseed-core/src/search.rs
use crate::common::DatasetStats;
use crate::model::{CountryDataset, Dataset};
use crate::text::fold_key;
use crate::traits::{CityContext, CitySearch, NameMatch};

impl CitySearch for Dataset {
    fn stats(&self) -> DatasetStats {
        let cities = self.countries.iter().flat_map(|c| c.cities.iter());
        let (mut count, mut translations, mut capitals) = (0, 0, 0);
        for city in cities {
            count += 1;
            translations += city.translations.len();
            capitals += usize::from(city.is_capital);
        }
        DatasetStats {
            countries: self.countries.len(),
            cities: count,
            translations,
            capitals,
        }
    }

    fn countries(&self) -> &[CountryDataset] {
        &self.countries
    }

    fn country(&self, iso2: &str) -> Option<&CountryDataset> {
        let iso2 = iso2.trim();
        self.countries
            .iter()
            .find(|c| c.country.eq_ignore_ascii_case(iso2))
    }

    fn city_by_code(&self, code: &str) -> Option<CityContext<'_>> {
        let code = code.trim();
        // The prefix names the country; skip straight to its file.
        let iso2 = code.split('-').next()?;
        let country = self.country(iso2)?;
        country.city(code).map(|city| (city, country))
    }

    fn find_cities(&self, query: &str) -> Vec<CityContext<'_>> {
        let mut out = Vec::new();
        if fold_key(query.trim()).is_empty() {
            return out;
        }
        for country in &self.countries {
            for city in &country.cities {
                if city.name_contains(query.trim()) {
                    out.push((city, country));
                }
            }
        }
        out
    }
}

impl Dataset {
    /// Restricts the dataset to the given ISO2 codes, keeping the order of
    /// the dataset. Unknown codes are reported as an error rather than
    /// silently dropped.
    pub fn select(&self, iso2: &[&str]) -> crate::Result<Vec<&CountryDataset>> {
        for code in iso2 {
            if self.country(code).is_none() {
                return Err(crate::DatasetError::UnknownCountry(code.to_string()));
            }
        }
        Ok(self
            .countries
            .iter()
            .filter(|c| iso2.iter().any(|s| c.country.eq_ignore_ascii_case(s.trim())))
            .collect())
    }
}
