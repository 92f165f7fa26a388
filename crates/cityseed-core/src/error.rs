// crates/cityseed-core/src/error.rs
use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised while reading or validating the declarative dataset.
///
/// Every validation variant names the offending city `code` (or data file)
/// so a broken record can be found without a debugger.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {file}: {error}")]
    Json {
        file: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("bundle error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{file}: `{code}` is not an ISO 3166-1 alpha-2 country code")]
    InvalidCountryCode { file: String, code: String },

    #[error("country {country} is defined twice ({first} and {second})")]
    DuplicateCountry {
        country: String,
        first: String,
        second: String,
    },

    #[error("city code {code} is defined twice ({first} and {second})")]
    DuplicateCode {
        code: String,
        first: String,
        second: String,
    },

    #[error("city code {code} does not belong to country {country}")]
    ForeignCode { code: String, country: String },

    #[error("city {code}: field `{field}` must not be empty")]
    EmptyField { code: String, field: &'static str },

    #[error("city {code}: coordinates ({latitude}, {longitude}) are out of range")]
    CoordinateOutOfRange {
        code: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("city {code}: population {population} is negative")]
    NegativePopulation { code: String, population: i64 },

    #[error("country {country} marks both {first} and {second} as capital")]
    MultipleCapitals {
        country: String,
        first: String,
        second: String,
    },

    #[error("country {country} marks both {first} and {second} as default")]
    MultipleDefaults {
        country: String,
        first: String,
        second: String,
    },

    #[error("city {code}: `{field}` contains a control character")]
    ControlCharacter { code: String, field: String },

    #[error("city {code}: `{locale}` is not a valid locale key")]
    InvalidLocale { code: String, locale: String },

    #[error("country {0} is not part of the dataset")]
    UnknownCountry(String),
}

/// Errors raised while writing seed data into the database.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("country {0} has not been seeded; load reference data first")]
    MissingCountry(String),

    #[error("`{0}` is not a valid locale to seed")]
    InvalidLocale(String),

    #[error("city {0} was not found after its upsert")]
    CityNotFound(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

pub type Result<T, E = DatasetError> = std::result::Result<T, E>;
