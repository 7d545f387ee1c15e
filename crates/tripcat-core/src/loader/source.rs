// crates/tripcat-core/src/loader/source.rs
use super::common_io;
use crate::error::Result;
use crate::raw::{decode_flags, decode_positions, RawFlagRecord, RawPositionRecord};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the two raw feeds come from.
///
/// `Sync` because the loader fetches both feeds at the same time.
pub trait FeedSource: Sync {
    fn flags(&self) -> Result<Vec<RawFlagRecord>>;
    fn positions(&self) -> Result<Vec<RawPositionRecord>>;
}

/// Local copies of both feeds, plain or gzipped JSON in the upstream
/// envelope format.
#[derive(Debug, Clone)]
pub struct FileFeed {
    flags_path: PathBuf,
    positions_path: PathBuf,
}

impl FileFeed {
    pub fn new(flags_path: impl Into<PathBuf>, positions_path: impl Into<PathBuf>) -> Self {
        Self {
            flags_path: flags_path.into(),
            positions_path: positions_path.into(),
        }
    }

    pub fn flags_path(&self) -> &Path {
        &self.flags_path
    }

    pub fn positions_path(&self) -> &Path {
        &self.positions_path
    }
}

impl FeedSource for FileFeed {
    fn flags(&self) -> Result<Vec<RawFlagRecord>> {
        debug!(path = %self.flags_path.display(), "reading flag feed");
        decode_flags(common_io::open_stream(&self.flags_path)?)
    }

    fn positions(&self) -> Result<Vec<RawPositionRecord>> {
        debug!(path = %self.positions_path.display(), "reading position feed");
        decode_positions(common_io::open_stream(&self.positions_path)?)
    }
}
