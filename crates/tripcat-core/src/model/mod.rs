// crates/tripcat-core/src/model/mod.rs
pub mod catalog;
pub mod convert;
pub mod country;

pub use catalog::{Catalog, DefaultCatalog};
pub use convert::{map_link, reconcile, reconcile_with_stats, try_reconcile, Reconciliation};
pub use country::{Coordinates, Country};

use crate::traits::CatalogBackend;
use serde::{Deserialize, Serialize};

/// Default backend: plain `String` + `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultBackend;

impl CatalogBackend for DefaultBackend {
    type Str = String;
    type Float = f64;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn float_from(f: f64) -> Self::Float {
        f
    }

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.clone()
    }

    fn float_to_f64(v: Self::Float) -> f64 {
        v
    }
}
