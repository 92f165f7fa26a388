// crates/cityseed-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and delegates to the
//! converter for validation. A dataset can come from:
//! - a directory of `<iso2>.json` / `<iso2>.json.gz` files,
//! - a single data file,
//! - a bincode bundle (`*.bin`, `*.bin.gz`),
//! - the copy compiled into the library (`embedded` feature).

use crate::error::{DatasetError, Result};
use crate::model::convert::{from_raw, SourceFile};
use crate::model::{CountryFileRaw, Dataset, ReferenceData};
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod bundle;
pub mod common_io;
mod embedded;

pub use bundle::{read_bundle, write_bundle, CompressionMode};

#[cfg(feature = "embedded")]
static EMBEDDED_DATASET: once_cell::sync::OnceCell<Dataset> = once_cell::sync::OnceCell::new();

impl Dataset {
    /// Directory holding the bundled `cities/` folder and `reference.json`.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// The dataset compiled into the library, parsed and validated once per
    /// process.
    #[cfg(feature = "embedded")]
    pub fn embedded() -> Result<&'static Dataset> {
        EMBEDDED_DATASET.get_or_try_init(|| {
            let files = embedded::CITY_FILES
                .iter()
                .map(|(name, text)| parse_source(name, text))
                .collect::<Result<Vec<_>>>()?;
            from_raw(files)
        })
    }

    /// **Smart Load:** directory, bundle, or single data file.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            // `data/` itself, or `data/cities/`
            let cities = path.join("cities");
            let dir: &Path = if cities.is_dir() { &cities } else { path };
            return Self::load_dir(dir);
        }
        if bundle::is_bundle_path(path) {
            debug!(path = %path.display(), "loading bundle");
            return read_bundle(path);
        }
        let raw: CountryFileRaw = common_io::read_json(path)?;
        from_raw(vec![(common_io::display_name(path), raw)])
    }

    /// Loads every `*.json` / `*.json.gz` file directly inside `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let paths = common_io::list_data_files(dir)?;
        if paths.is_empty() {
            return Err(DatasetError::NotFound(format!(
                "no data files in {}",
                dir.display()
            )));
        }
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            debug!(file = %path.display(), "reading data file");
            let raw: CountryFileRaw = common_io::read_json(&path)?;
            files.push((common_io::display_name(&path), raw));
        }
        from_raw(files)
    }

    /// Parses data files that are already in memory, e.g. from a test or
    /// another crate's `include_str!`.
    pub fn from_json_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let files = sources
            .into_iter()
            .map(|(name, text)| parse_source(name, text))
            .collect::<Result<Vec<_>>>()?;
        from_raw(files)
    }

    pub fn save_as(&self, path: impl AsRef<Path>, compression: CompressionMode) -> Result<()> {
        write_bundle(self, path.as_ref(), compression)
    }
}

impl ReferenceData {
    /// The reference file compiled into the library.
    #[cfg(feature = "embedded")]
    pub fn embedded() -> Result<Self> {
        Self::from_json("reference.json", embedded::REFERENCE)
    }

    /// Reads a reference file, or `reference.json` inside a directory.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            return common_io::read_json(&path.join("reference.json"));
        }
        common_io::read_json(path)
    }

    pub fn from_json(name: &str, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|error| DatasetError::Json {
            file: name.to_string(),
            error,
        })
    }
}

fn parse_source(name: &str, text: &str) -> Result<SourceFile> {
    let raw: CountryFileRaw = serde_json::from_str(text).map_err(|error| DatasetError::Json {
        file: name.to_string(),
        error,
    })?;
    Ok((name.to_string(), raw))
}
