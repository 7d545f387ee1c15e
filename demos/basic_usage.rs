//! Basic usage demo for tripcat
//!
//! This demo shows how to:
//! - Load the country catalog from the live feeds
//! - Inspect the reconciliation report
//! - Look countries up by code, name and substring
//! - Save and reload a snapshot

use tripcat::prelude::*;

fn main() -> Result<()> {
    println!("=== tripcat Basic Usage ===\n");

    println!("Fetching flag and position feeds...");
    let loader = CatalogLoader::new(HttpFeed::new()?);
    let catalog: DefaultCatalog = match loader.try_load::<DefaultBackend>() {
        Ok(r) => {
            println!("✓ Reconciled {} countries", r.stats.countries);
            println!(
                "  {} matched by ISO2, {} positions without a flag entry\n",
                r.stats.matched_by_iso, r.stats.unmatched_positions
            );
            r.catalog
        }
        Err(e) => {
            println!("✗ Feeds unavailable ({e}); the selector would be disabled.");
            return Ok(());
        }
    };

    // Example 1: first entries in catalog order
    println!("--- Example 1: First countries ---");
    for (i, c) in catalog.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, c.name(), c.iso_code());
    }
    println!("... and {} more\n", catalog.len().saturating_sub(5));

    // Example 2: keyed lookup
    println!("--- Example 2: Find country by ISO2 code ---");
    if let Some(c) = catalog.find_country_by_iso2("FR") {
        println!("Found: {}", c.name());
        println!("Flag: {}", c.flag_url());
        if let Some(link) = c.map_link() {
            println!("Map: {link}");
        }
    }
    println!();

    // Example 3: substring search, accent insensitive
    println!("--- Example 3: Search by name ---");
    for c in catalog.find_countries_by_substring("cote") {
        println!("- {}", c.name());
    }
    println!();

    // Example 4: snapshot round trip
    println!("--- Example 4: Snapshot ---");
    let path = std::env::temp_dir().join("tripcat-demo.bin.gz");
    catalog.save_as(&path)?;
    let restored = DefaultCatalog::load_snapshot(&path)?;
    println!(
        "Wrote and reloaded {} countries via {}",
        restored.len(),
        path.display()
    );

    Ok(())
}
