//! tripcat: command-line front end for tripcat-core
//!
//! Usage examples
//! --------------
//!
//! - How the two feeds joined up
//!   $ tripcat stats
//!
//! - Catalog listing and lookups
//!   $ tripcat countries
//!   $ tripcat country fr
//!   $ tripcat search "ivo"
//!
//! - Drive the destination selector, then draft a trip
//!   $ tripcat select bra --pick br
//!   $ tripcat plan br -a budget=mid -a travelStyle=relaxed
//!
//! - Session against the configured backend
//!   $ tripcat auth
//!   $ tripcat register
//!   $ tripcat logout
//!
//! - Offline use
//!   $ tripcat export catalog.bin.gz
//!   $ tripcat --snapshot catalog.bin.gz countries
//!   $ tripcat --flags flags.json --positions positions.json stats
//!
//! Feeds are fetched live unless `--snapshot`, `--flags/--positions` or the
//! `feeds.*_file` settings point somewhere local.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tripcat_core::prelude::*;

/// The catalog plus the reconciliation report when it came from the feeds.
struct Loaded {
    catalog: DefaultCatalog,
    stats: Option<ReconcileStats>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn from_feeds<S: FeedSource>(source: S) -> Loaded {
    match CatalogLoader::new(source).try_load::<DefaultBackend>() {
        Ok(r) => Loaded {
            catalog: r.catalog,
            stats: Some(r.stats),
        },
        Err(e) => {
            warn!(error = %e, "country catalog unavailable, continuing with an empty list");
            Loaded {
                catalog: Catalog::empty(),
                stats: None,
            }
        }
    }
}

fn load(args: &CliArgs, settings: &Settings) -> anyhow::Result<Loaded> {
    if let Some(path) = &args.snapshot {
        let catalog = DefaultCatalog::load_snapshot(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        return Ok(Loaded {
            catalog,
            stats: None,
        });
    }

    let files = match (&args.flags, &args.positions) {
        (Some(f), Some(p)) => Some((f.clone(), p.clone())),
        _ => match (&settings.feeds.flags_file, &settings.feeds.positions_file) {
            (Some(f), Some(p)) => Some((f.clone(), p.clone())),
            _ => None,
        },
    };
    if let Some((flags, positions)) = files {
        debug!(flags = %flags.display(), positions = %positions.display(), "using local feeds");
        return Ok(from_feeds(FileFeed::new(flags, positions)));
    }

    #[cfg(feature = "fetch")]
    {
        let feed = HttpFeed::from_settings(&settings.feeds)?;
        Ok(from_feeds(feed))
    }
    #[cfg(not(feature = "fetch"))]
    {
        bail!("built without `fetch`: pass --snapshot or --flags/--positions")
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(c: &Country<DefaultBackend>) {
    println!("Country: {}", c.name());
    println!("ISO2: {}", c.iso_code());
    println!("Flag: {}", c.flag_url());
    match c.coordinates() {
        Some((lat, lon)) => println!("Position: {lat}, {lon}"),
        None => println!("Position: -"),
    }
    if let Some(link) = c.map_link() {
        println!("Map: {link}");
    }
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let settings = match &args.config {
        Some(path) => Settings::from_file(path, true)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::new().context("loading settings")?,
    };

    match &args.command {
        Commands::Stats => {
            let Loaded { catalog, stats } = load(&args, &settings)?;
            if args.json {
                return print_json(&serde_json::json!({
                    "countries": catalog.len(),
                    "reconciliation": stats,
                }));
            }
            println!("Catalog statistics:");
            println!("  Countries: {}", catalog.len());
            if let Some(s) = stats {
                println!("  Flag records: {}", s.flag_records);
                println!("  Usable flag entries: {}", s.countries_with_flags);
                println!("  Position records: {}", s.position_records);
                println!("  Matched by ISO2: {}", s.matched_by_iso);
                println!("  Unmatched positions: {}", s.unmatched_positions);
                if s.name_fallback {
                    println!("  Matched by name (fallback): {}", s.matched_by_name);
                }
            }
        }

        Commands::Countries => {
            let catalog = load(&args, &settings)?.catalog;
            if args.json {
                return print_json(&catalog);
            }
            for c in &catalog {
                println!("{} ({})", c.name(), c.iso_code());
            }
        }

        Commands::Country { code } => {
            let catalog = load(&args, &settings)?.catalog;
            match catalog.find_country(code) {
                Some(c) if args.json => print_json(c)?,
                Some(c) => describe(c),
                None => bail!("no country found for `{code}`"),
            }
        }

        Commands::Search { query } => {
            let catalog = load(&args, &settings)?.catalog;
            let matches = catalog.find_countries_by_substring(query);
            if args.json {
                return print_json(&matches);
            }
            if matches.is_empty() {
                println!("No countries found matching: {query}");
            }
            for c in matches {
                println!("{} ({})", c.name(), c.iso_code());
            }
        }

        Commands::Select {
            query,
            pick,
            current,
        } => {
            let catalog = load(&args, &settings)?.catalog;
            select(&catalog, query, pick.as_deref(), current, args.json)?
        }

        Commands::Plan {
            code,
            attributes,
            persist,
        } => {
            let catalog = load(&args, &settings)?.catalog;
            let mut draft = TripDraft::new();
            draft.select(code);
            for (key, value) in attributes {
                draft.set_attribute(key.clone(), value.clone());
            }
            let intent = draft.submit(&catalog)?;
            print_json(&intent)?;

            if *persist {
                let id = persist_trip(&settings, &intent)?;
                println!("Saved trip {id}");
            }
        }

        Commands::Export { out } => {
            let catalog = load(&args, &settings)?.catalog;
            if catalog.is_empty() {
                bail!("catalog is empty, nothing to export");
            }
            catalog
                .save_as(out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {} countries to {}", catalog.len(), out.display());
        }

        Commands::Auth => auth(&settings, args.json)?,

        Commands::Users { limit, offset } => users(&settings, *limit, *offset, args.json)?,

        Commands::Register => register(&settings, args.json)?,

        Commands::Logout => logout(&settings)?,
    }

    Ok(())
}

fn select(
    catalog: &DefaultCatalog,
    query: &str,
    pick: Option<&str>,
    current: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut emitted: Option<String> = None;
    let mut combo = Combobox::new(catalog.selector_items(), current, |v: &str| {
        emitted = Some(v.to_owned())
    });
    combo.open();
    combo.set_query(query);

    if json {
        let visible: Vec<&SelectorItem> = match combo.listing() {
            Listing::Items(items) => items,
            _ => Vec::new(),
        };
        print_json(&visible)?;
    } else {
        println!("[{}]", combo.trigger_label());
        println!("  {}: {}", combo.search_placeholder(), combo.query());
        match combo.listing() {
            Listing::Items(items) => {
                for item in items {
                    let mark = if item.value == combo.value() { '*' } else { ' ' };
                    println!(" {mark} {} ({})", item.label, item.value);
                }
            }
            other => println!("  {}", other.message().unwrap_or_default()),
        }
    }

    if let Some(value) = pick {
        combo.choose(value);
        drop(combo);
        match emitted {
            Some(v) if v.is_empty() => println!("Selection cleared"),
            Some(v) => println!("Selected {v}"),
            None => bail!("`{value}` is not one of the selectable values"),
        }
    }
    Ok(())
}

#[cfg(feature = "fetch")]
fn persist_trip(settings: &Settings, intent: &SubmissionIntent) -> anyhow::Result<String> {
    Ok(client(settings, "--persist")?.save(intent)?)
}

#[cfg(not(feature = "fetch"))]
fn persist_trip(_settings: &Settings, _intent: &SubmissionIntent) -> anyhow::Result<String> {
    bail!("built without `fetch`: trips cannot be stored")
}

fn auth(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let decision = session(settings)?;

    if json {
        let routes: Vec<_> = Route::ALL
            .into_iter()
            .map(|r| serde_json::json!({ "route": r.path(), "outcome": outcome(guard(r, &decision)) }))
            .collect();
        return print_json(&serde_json::json!({
            "user": decision.user(),
            "routes": routes,
        }));
    }

    match &decision {
        AuthDecision::Authenticated(u) => println!("Signed in as {} <{}>", u.name, u.email),
        AuthDecision::Unauthenticated => println!("Not signed in"),
        AuthDecision::Error(e) => println!("Session check failed: {e}"),
    }
    for route in Route::ALL {
        println!("  {:<14} {}", route.path(), outcome(guard(route, &decision)));
    }
    Ok(())
}

fn outcome(o: RouteOutcome) -> String {
    match o {
        RouteOutcome::Render(_) => "render".to_owned(),
        RouteOutcome::Redirect(to) => format!("-> {to}"),
    }
}

#[cfg(feature = "fetch")]
fn session(settings: &Settings) -> anyhow::Result<AuthDecision> {
    use tripcat_core::backend::AppwriteClient;

    match settings.backend.clone() {
        Some(config) => Ok(AuthDecision::from_session(&AppwriteClient::new(config)?)),
        None => Ok(AuthDecision::Unauthenticated),
    }
}

#[cfg(feature = "fetch")]
fn users(settings: &Settings, limit: usize, offset: usize, json: bool) -> anyhow::Result<()> {
    let page = client(settings, "listing users")?.list_users(limit, offset)?;
    if json {
        return print_json(&page);
    }
    println!("Users {}-{} of {}:", offset + 1, offset + page.users.len(), page.total);
    for u in &page.users {
        println!("- {} <{}>", u.name, u.email);
    }
    Ok(())
}

#[cfg(feature = "fetch")]
fn client(settings: &Settings, what: &str) -> anyhow::Result<tripcat_core::backend::AppwriteClient> {
    let Some(config) = settings.backend.clone() else {
        bail!("{what} needs a [backend] section in the settings");
    };
    Ok(tripcat_core::backend::AppwriteClient::new(config)?)
}

#[cfg(feature = "fetch")]
fn register(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let user = client(settings, "registering")?.store_user()?;
    if json {
        return print_json(&user);
    }
    println!("Stored {} <{}>", user.name, user.email);
    Ok(())
}

#[cfg(feature = "fetch")]
fn logout(settings: &Settings) -> anyhow::Result<()> {
    client(settings, "logging out")?.logout()?;
    println!("Signed out");
    Ok(())
}

#[cfg(not(feature = "fetch"))]
fn register(_settings: &Settings, _json: bool) -> anyhow::Result<()> {
    bail!("built without `fetch`: the backend is unavailable")
}

#[cfg(not(feature = "fetch"))]
fn logout(_settings: &Settings) -> anyhow::Result<()> {
    bail!("built without `fetch`: the backend is unavailable")
}

#[cfg(not(feature = "fetch"))]
fn users(_settings: &Settings, _limit: usize, _offset: usize, _json: bool) -> anyhow::Result<()> {
    bail!("built without `fetch`: the backend is unavailable")
}

#[cfg(not(feature = "fetch"))]
fn session(_settings: &Settings) -> anyhow::Result<AuthDecision> {
    Ok(AuthDecision::Unauthenticated)
}
