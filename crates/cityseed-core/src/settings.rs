// crates/cityseed-core/src/settings.rs
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://cityseed.db?mode=rwc";
pub const DEFAULT_LOCALES: [&str; 2] = ["en", "lt"];

/// Runtime configuration.
///
/// Sources, later ones winning:
/// 1. built-in defaults,
/// 2. `cityseed.toml` (or `.json`/`.yaml`) in the working directory, if present,
/// 3. an explicit file passed to [`Settings::load`],
/// 4. `CITYSEED__*` environment variables, e.g.
///    `CITYSEED__DATABASE__URL=postgres://...` or `CITYSEED__SEED__LOCALES=en,lt,pl`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub seed: SeedSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    /// Seconds
    pub connect_timeout: Option<u64>,
    pub sqlx_logging: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    /// Data directory or bundle; `None` means the embedded dataset.
    pub data: Option<String>,
    /// Locales written for every city on top of the ones it carries.
    pub locales: Vec<String>,
    /// Treat a missing parent country as an error instead of a skip.
    pub strict: bool,
    /// One transaction per country.
    pub atomic: bool,
}

impl Settings {
    /// Builds settings from defaults, optional files and the environment.
    ///
    /// # Errors
    ///
    /// * `Err(ConfigError)` if `config_file` is given but unreadable, or a
    ///   value has the wrong type.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.max_connections", 5)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.sqlx_logging", false)?
            .set_default("seed.locales", DEFAULT_LOCALES.to_vec())?
            .set_default("seed.strict", false)?
            .set_default("seed.atomic", false)?
            .add_source(File::with_name("cityseed").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix("CITYSEED")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("seed.locales")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: Some(5),
            min_connections: None,
            connect_timeout: Some(10),
            sqlx_logging: false,
        }
    }
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            data: None,
            locales: DEFAULT_LOCALES.iter().map(|s| s.to_string()).collect(),
            strict: false,
            atomic: false,
        }
    }
}

impl DatabaseSettings {
    /// A private in-memory SQLite database. The pool is pinned to a single
    /// connection, since every SQLite `:memory:` connection is its own
    /// database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: Some(1),
            connect_timeout: Some(10),
            sqlx_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.seed.locales, vec!["en", "lt"]);
        assert!(!settings.seed.strict);
        assert_eq!(settings.database.max_connections, Some(5));
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.toml");
        std::fs::write(
            &path,
            "[database]\nurl = \"sqlite::memory:\"\n\n[seed]\nlocales = [\"en\", \"lt\", \"pl\"]\natomic = true\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.seed.locales, vec!["en", "lt", "pl"]);
        assert!(settings.seed.atomic);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/cityseed.toml"))).is_err());
    }
}
