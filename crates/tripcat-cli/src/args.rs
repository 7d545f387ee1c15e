use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for tripcat
#[derive(Debug, Parser)]
#[command(
    name = "tripcat",
    version,
    about = "Reconcile the country feeds, browse the catalog and draft trips"
)]
pub struct CliArgs {
    /// Settings file (TOML). Defaults to $TRIPCAT_SETTINGS or ./tripcat.toml
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Local copy of the flag feed (plain or .gz JSON)
    #[arg(long = "flags", global = true, requires = "positions")]
    pub flags: Option<PathBuf>,

    /// Local copy of the position feed (plain or .gz JSON)
    #[arg(long = "positions", global = true, requires = "flags")]
    pub positions: Option<PathBuf>,

    /// Read the catalog from a snapshot instead of the feeds
    #[arg(short = 's', long = "snapshot", global = true, conflicts_with_all = ["flags", "positions"])]
    pub snapshot: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show how the feeds were reconciled
    Stats,

    /// List all countries in catalog order
    Countries,

    /// Lookup a country by ISO2 code or exact name
    Country {
        /// ISO2 code or name (e.g. FR, "Côte d'Ivoire")
        code: String,
    },

    /// Countries whose name contains a substring
    Search {
        /// Substring to search (case and accent insensitive)
        query: String,
    },

    /// Drive the destination selector: filter, then optionally pick
    Select {
        /// Search text typed into the selector
        #[arg(default_value = "")]
        query: String,

        /// Value (ISO2 code) to pick from the list
        #[arg(short = 'p', long = "pick")]
        pick: Option<String>,

        /// Value currently selected before picking
        #[arg(long = "current", default_value = "")]
        current: String,
    },

    /// Build a trip submission for a destination
    Plan {
        /// Selected destination value (ISO2 code)
        code: String,

        /// Extra trip attributes, repeatable (e.g. -a budget=mid)
        #[arg(short = 'a', long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,

        /// Store the trip in the configured backend
        #[arg(long = "persist")]
        persist: bool,
    },

    /// Write the catalog to a snapshot (.json, .bin, optionally .gz)
    Export {
        /// Output path; the extension selects the format
        out: PathBuf,
    },

    /// Show the signed-in user and where each route leads
    Auth,

    /// One page of the users collection
    Users {
        #[arg(long = "limit", default_value_t = 10)]
        limit: usize,

        #[arg(long = "offset", default_value_t = 0)]
        offset: usize,
    },

    /// Record the signed-in account in the users collection
    Register,

    /// End the current session
    Logout,
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty attribute name in `{s}`"));
    }
    Ok((key.to_owned(), value.trim().to_owned()))
}
