//! tripcat-cli
//! ===========
//!
//! Command-line interface for the `tripcat-core` country catalog.
//!
//! This crate primarily provides a binary (`tripcat`). The library target
//! only carries this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! tripcat --help
//! tripcat stats
//! tripcat country fr
//! tripcat select "united" --pick gb
//! tripcat plan gb -a budget=mid
//! ```
//!
//! Settings come from `tripcat.toml` (or the file named by
//! `$TRIPCAT_SETTINGS`), overridden by `TRIPCAT__SECTION__KEY` variables:
//!
//! ```toml
//! [feeds]
//! timeout_secs = 10
//! flags_file = "data/flags.json.gz"
//! positions_file = "data/positions.json.gz"
//!
//! [backend]
//! endpoint = "https://cloud.appwrite.io/v1"
//! project_id = "travel"
//! database_id = "main"
//! user_collection_id = "users"
//! trip_collection_id = "trips"
//! ```
//!
//! For programmatic access use the `tripcat-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
