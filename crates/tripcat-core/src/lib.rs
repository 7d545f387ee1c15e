// crates/tripcat-core/src/lib.rs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # tripcat-core
//!
//! Country catalog for the travel planner. Two public feeds (flag images and
//! geographic positions) are joined by ISO2 code into a sorted [`Catalog`],
//! offered through a searchable [`selector::Combobox`], and the chosen
//! destination is turned into a [`trip::SubmissionIntent`].
//!
//! ```rust
//! use tripcat_core::prelude::*;
//!
//! let flags = vec![RawFlagRecord::new("France", "f.png", "FR")];
//! let positions = vec![RawPositionRecord::new("France", "fr", 46.6, 2.2)];
//!
//! let catalog: DefaultCatalog = reconcile(&flags, &positions);
//! let france = catalog.find_country_by_iso2("FR").unwrap();
//! assert_eq!(france.iso_code(), "fr");
//! assert_eq!(france.coordinates(), Some((46.6, 2.2)));
//! ```

pub mod auth;
#[cfg(feature = "fetch")]
pub mod backend;
pub mod common;
pub mod error;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod raw;
pub mod search;
pub mod selector;
pub mod settings;
pub mod text;
pub mod traits;
pub mod trip;

// Re-exports
pub use crate::common::ReconcileStats;
pub use crate::error::{Result, TripError};
pub use crate::model::{
    map_link, reconcile, reconcile_with_stats, try_reconcile, Catalog, Coordinates, Country,
    DefaultBackend, DefaultCatalog, Reconciliation,
};
pub use crate::search::CatalogSearch;
pub use crate::traits::{CatalogBackend, NameMatch};
