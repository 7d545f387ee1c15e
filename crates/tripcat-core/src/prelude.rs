//! tripcat prelude: bring common types and traits into scope for demos.

#![allow(unused_imports)]

pub use crate::auth::{guard, AuthDecision, Route, RouteOutcome, SessionProvider, User};
pub use crate::error::{Result, TripError};
pub use crate::loader::{CatalogLoader, FeedSource, FileFeed};
#[cfg(feature = "fetch")]
pub use crate::loader::HttpFeed;
pub use crate::model::{
    map_link, reconcile, reconcile_with_stats, try_reconcile, Catalog, Coordinates, Country,
    DefaultBackend, DefaultCatalog, Reconciliation,
};
pub use crate::raw::{RawFlagRecord, RawPositionRecord};
pub use crate::search::CatalogSearch;
pub use crate::selector::{Combobox, Listing, SelectionWidget, SelectorItem};
pub use crate::settings::Settings;
pub use crate::text::{collate, equals_folded, fold_key};
pub use crate::traits::{CatalogBackend, NameMatch};
pub use crate::trip::{MemoryTripStore, SubmissionIntent, TripDraft, TripStore};
pub use crate::ReconcileStats;
