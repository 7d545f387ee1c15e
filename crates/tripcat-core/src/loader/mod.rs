// crates/tripcat-core/src/loader/mod.rs

//! # Catalog Loader
//!
//! Fetches both feeds at the same time, waits for both, and reconciles.
//! Every catalog failure (transport, payload shape, empty result) is logged
//! and replaced by an empty catalog; callers of [`CatalogLoader::load`]
//! never see an error. There is no cache: each call starts from scratch.

use crate::error::Result;
use crate::model::{try_reconcile, Catalog, Reconciliation};
use crate::traits::CatalogBackend;
use tracing::{info, warn};

pub mod common_io;
#[cfg(feature = "fetch")]
mod http;
pub mod snapshot;
mod source;

#[cfg(feature = "fetch")]
pub use http::HttpFeed;
pub use snapshot::{CompressionMode, SnapshotFormat};
pub use source::{FeedSource, FileFeed};

pub struct CatalogLoader<S> {
    source: S,
}

impl<S: FeedSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, join and reconcile, reporting the first failure.
    ///
    /// Both fetches always run to completion; if either fails the pass is
    /// abandoned (the flag error is reported when both fail).
    pub fn try_load<B: CatalogBackend>(&self) -> Result<Reconciliation<B>> {
        let (flags, positions) =
            rayon::join(|| self.source.flags(), || self.source.positions());
        let flags = flags?;
        let positions = positions?;
        info!(
            flags = flags.len(),
            positions = positions.len(),
            "fetched country feeds"
        );
        try_reconcile(&flags, &positions)
    }

    /// Like [`CatalogLoader::try_load`], but any failure yields an empty
    /// catalog.
    pub fn load<B: CatalogBackend>(&self) -> Catalog<B> {
        match self.try_load::<B>() {
            Ok(r) => r.catalog,
            Err(e) => {
                warn!(error = %e, "country catalog unavailable, continuing with an empty list");
                Catalog::empty()
            }
        }
    }
}
