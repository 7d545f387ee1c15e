//! Workspace umbrella crate: re-exports `tripcat-core` so the demos can use
//! `tripcat::prelude::*`.
pub use tripcat_core::*;
