// crates/cityseed-core/src/traits.rs
use crate::common::DatasetStats;
use crate::model::{CitySeed, CountryDataset};
use crate::text::fold_key;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes Unicode‑aware, accent-insensitive and case-insensitive
/// comparisons based on [`fold_key`]. Implementors provide a `&str` view of
/// their canonical name via [`NameMatch::name_str`], and get convenient helpers:
/// - [`NameMatch::is_named`]: equality on folded form
/// - [`NameMatch::name_contains`]: substring match on folded form
///
/// # Examples
/// ```rust
/// use cityseed_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Šiauliai").is_named("siauliai"));
/// assert!(Place("Jūrmala").name_contains("JURM"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Additional names (translations, aliases) that should also match.
    fn alt_names(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Accent-insensitive and case-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        let q = fold_key(q);
        fold_key(self.name_str()) == q || self.alt_names().iter().any(|n| fold_key(n) == q)
    }

    /// Accent-insensitive + case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        let q = fold_key(q);
        fold_key(self.name_str()).contains(&q)
            || self.alt_names().iter().any(|n| fold_key(n).contains(&q))
    }
}

impl NameMatch for CitySeed {
    fn name_str(&self) -> &str {
        &self.name
    }

    fn alt_names(&self) -> Vec<&str> {
        self.translations
            .values()
            .filter_map(|t| t.name.as_deref())
            .collect()
    }
}

/// A city together with the country file it belongs to.
pub type CityContext<'a> = (&'a CitySeed, &'a CountryDataset);

/// Read-side queries over a loaded dataset.
pub trait CitySearch {
    fn stats(&self) -> DatasetStats;

    /// All country datasets, sorted by ISO2 code.
    fn countries(&self) -> &[CountryDataset];

    /// Find a country by ISO2 code, case-insensitive (e.g. "LT", "fi").
    fn country(&self, iso2: &str) -> Option<&CountryDataset>;

    /// Find a city by its unique code, case-insensitive.
    fn city_by_code(&self, code: &str) -> Option<CityContext<'_>>;

    /// Cities whose canonical or translated name contains `query`
    /// (accent- and case-insensitive). An empty query matches nothing.
    fn find_cities(&self, query: &str) -> Vec<CityContext<'_>>;
}
