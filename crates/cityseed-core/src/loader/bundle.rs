// crates/cityseed-core/src/loader/bundle.rs

use crate::error::{DatasetError, Result};
use crate::model::Dataset;
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use {
    flate2::{read::GzDecoder, write::GzEncoder, Compression},
    std::io::Read,
};

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// Bumped whenever the serialized layout of [`Dataset`] changes.
pub const BUNDLE_VERSION: u32 = 1;

/// Upper bound on a decoded bundle; the full dataset is a few hundred KiB.
const BUNDLE_LIMIT: u64 = 64 * 1024 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl Default for CompressionMode {
    fn default() -> Self {
        if cfg!(feature = "compact") {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BundleFile {
    version: u32,
    dataset: Dataset,
}

#[derive(Serialize)]
struct BundleFileRef<'a> {
    version: u32,
    dataset: &'a Dataset,
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(BUNDLE_LIMIT)
        .allow_trailing_bytes()
}

// -----------------------------------------------------------------------------
// WRITER
// -----------------------------------------------------------------------------

/// Serializes an already validated dataset into a bincode bundle.
///
/// Loading a bundle skips JSON parsing and validation entirely, so only
/// ever write datasets that came out of [`crate::model::convert::from_raw`].
pub fn write_bundle(dataset: &Dataset, path: &Path, compression: CompressionMode) -> Result<()> {
    let file = File::create(path).map_err(DatasetError::Io)?;
    let writer = BufWriter::new(file);

    let mut encoder: Box<dyn Write> = match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Box::new(GzEncoder::new(writer, Compression::default()))
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(DatasetError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => Box::new(writer),
    };

    let bundle = BundleFileRef {
        version: BUNDLE_VERSION,
        dataset,
    };
    bincode_options()
        .serialize_into(&mut encoder, &bundle)
        .map_err(DatasetError::Bincode)?;
    encoder.flush().map_err(DatasetError::Io)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// READER
// -----------------------------------------------------------------------------

/// Reads a bundle written by [`write_bundle`]. Compression is detected from
/// the gzip magic bytes, not from the file name.
pub fn read_bundle(path: &Path) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|e| {
        DatasetError::NotFound(format!("Bundle not found at {}: {}", path.display(), e))
    })?;
    from_bundle_bytes(&bytes)
}

pub fn from_bundle_bytes(bytes: &[u8]) -> Result<Dataset> {
    let data: Vec<u8> = if bytes.starts_with(&GZIP_MAGIC) {
        #[cfg(feature = "compact")]
        {
            let mut out = Vec::new();
            GzDecoder::new(bytes)
                .take(BUNDLE_LIMIT)
                .read_to_end(&mut out)
                .map_err(DatasetError::Io)?;
            out
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(DatasetError::InvalidData(
                "bundle is gzip-compressed but 'compact' is disabled".into(),
            ));
        }
    } else {
        bytes.to_vec()
    };

    let bundle: BundleFile = bincode_options()
        .deserialize(&data)
        .map_err(DatasetError::Bincode)?;
    if bundle.version != BUNDLE_VERSION {
        return Err(DatasetError::InvalidData(format!(
            "bundle version {} is not supported (expected {})",
            bundle.version, BUNDLE_VERSION
        )));
    }
    Ok(bundle.dataset)
}

/// `true` if `path` looks like a bundle rather than a JSON data file.
pub fn is_bundle_path(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.ends_with(".bin") || name.ends_with(".bin.gz")
}
