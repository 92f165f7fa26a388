// crates/cityseed-core/src/loader/embedded.rs
#![cfg(feature = "embedded")]

//! The bundled `data/` directory, compiled into the library.
//!
//! Adding a country means dropping `data/cities/<iso2>.json` next to the
//! others and listing it below.

macro_rules! city_files {
    ($($iso:literal),* $(,)?) => {
        &[$((
            concat!($iso, ".json"),
            include_str!(concat!("../../data/cities/", $iso, ".json")),
        )),*]
    };
}

/// `(file name, JSON text)` for every bundled country.
pub(crate) static CITY_FILES: &[(&str, &str)] = city_files![
    "at", "be", "bg", "by", "ca", "ch", "cz", "de", "dk", "ee", "es", "fi", "fr", "gb", "gr",
    "hu", "ie", "it", "lt", "lv", "nl", "no", "pl", "pt", "ro", "se", "sk", "tr", "ua", "us",
];

/// Zones, countries and regions the city files refer to.
pub(crate) static REFERENCE: &str = include_str!("../../data/reference.json");
