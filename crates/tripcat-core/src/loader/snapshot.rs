// crates/tripcat-core/src/loader/snapshot.rs
use super::common_io;
use crate::error::{Result, TripError};
use crate::model::Catalog;
use crate::traits::CatalogBackend;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

// Decode limit for snapshot files.
const SNAPSHOT_LIMIT: u64 = 64 * 1024 * 1024;

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl SnapshotFormat {
    /// Pick format and compression from the file name:
    /// `*.bin[.gz]` is bincode, anything else JSON.
    pub fn from_path(path: &Path) -> (Self, CompressionMode) {
        let compression = if common_io::is_gzip(path) {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        };
        let inner = match compression {
            CompressionMode::Gzip => path.file_stem().map(Path::new),
            CompressionMode::None => Some(path),
        };
        let format = match inner.and_then(|p| p.extension()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => SnapshotFormat::Binary,
            _ => SnapshotFormat::Json,
        };
        (format, compression)
    }
}

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(SNAPSHOT_LIMIT)
}

// -----------------------------------------------------------------------------
// CATALOG SNAPSHOTS
// -----------------------------------------------------------------------------

impl<B: CatalogBackend> Catalog<B> {
    /// Write the catalog to `path`; format and compression follow the file
    /// name (see [`SnapshotFormat::from_path`]).
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (format, compression) = SnapshotFormat::from_path(path);
        write_generic(path, self, format, compression)?;
        info!(path = %path.display(), countries = self.len(), "catalog snapshot written");
        Ok(())
    }

    /// Read a snapshot back. The result is re-validated, so a hand-edited
    /// file still yields a sorted, deduplicated catalog.
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (format, _) = SnapshotFormat::from_path(path);
        let catalog: Catalog<B> = read_generic(path, format)?;
        Ok(Catalog::from_countries(catalog.into_countries()))
    }
}

// -----------------------------------------------------------------------------
// GENERIC READ / WRITE
// -----------------------------------------------------------------------------

/// Writes any serializable value to disk.
fn write_generic<T: Serialize>(
    path: &Path,
    value: &T,
    format: SnapshotFormat,
    compression: CompressionMode,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                encode(&mut encoder, value, format)?;
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(TripError::Unsupported(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => {
            encode(&mut writer, value, format)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn encode<W: Write, T: Serialize>(writer: W, value: &T, format: SnapshotFormat) -> Result<()> {
    match format {
        SnapshotFormat::Json => serde_json::to_writer_pretty(writer, value)?,
        SnapshotFormat::Binary => bincode_options().serialize_into(writer, value)?,
    }
    Ok(())
}

fn read_generic<T: DeserializeOwned>(path: &Path, format: SnapshotFormat) -> Result<T> {
    let mut reader = common_io::open_stream(path)?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    match format {
        SnapshotFormat::Json => Ok(serde_json::from_slice(&data)?),
        SnapshotFormat::Binary => bincode_options()
            .deserialize(&data)
            .map_err(TripError::Bincode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_the_file_name() {
        let cases = [
            ("catalog.json", SnapshotFormat::Json, CompressionMode::None),
            ("catalog.json.gz", SnapshotFormat::Json, CompressionMode::Gzip),
            ("catalog.bin", SnapshotFormat::Binary, CompressionMode::None),
            ("catalog.BIN.gz", SnapshotFormat::Binary, CompressionMode::Gzip),
            ("catalog", SnapshotFormat::Json, CompressionMode::None),
        ];
        for (name, format, compression) in cases {
            assert_eq!(
                SnapshotFormat::from_path(Path::new(name)),
                (format, compression),
                "{name}"
            );
        }
    }
}
