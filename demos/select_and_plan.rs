//! Selector and trip draft demo for tripcat
//!
//! Works offline: the catalog is reconciled from a handful of inline
//! records, then driven through the combobox and turned into a trip.

use tripcat::prelude::*;

fn main() -> Result<()> {
    let flags = [
        RawFlagRecord::new("Norway", "https://flags.example/no.svg", "NO"),
        RawFlagRecord::new("Nigeria", "https://flags.example/ng.svg", "NG"),
        RawFlagRecord::new("Niger", "https://flags.example/ne.svg", "NE"),
        RawFlagRecord::new("Nepal", "https://flags.example/np.svg", "NP"),
    ];
    let positions = [
        RawPositionRecord::new("Norway", "NO", 62.0, 10.0),
        RawPositionRecord::new("Nigeria", "NG", 10.0, 8.0),
        RawPositionRecord::new("Niger", "NE", 16.0, 8.0),
        RawPositionRecord::new("Nepal", "NP", 28.0, 84.0),
    ];
    let catalog: DefaultCatalog = reconcile(&flags, &positions);

    let mut draft = TripDraft::new().with_attribute("groupType", "family");
    let mut picked = String::new();
    {
        let mut combo = Combobox::new(catalog.selector_items(), draft.selection(), |v: &str| {
            picked = v.to_owned();
        });
        combo.open();
        println!("[{}]", combo.trigger_label());

        combo.set_query("nig");
        println!("{}: {}", combo.search_placeholder(), combo.query());
        if let Listing::Items(items) = combo.listing() {
            for item in items {
                println!("  {} ({})", item.label, item.value);
            }
        }

        combo.set_query("zz");
        println!("zz -> {}", combo.listing().message().unwrap_or_default());

        combo.choose("ne");
    }
    draft.select(&picked);

    let store = MemoryTripStore::new();
    let id = draft.create(&catalog, &store)?;
    if let Some(intent) = store.get(&id) {
        println!(
            "{id}: {} at {:?}, {}",
            intent.destination.name,
            intent.destination.coordinates,
            intent.attributes["groupType"]
        );
    }

    // Admin pages need a session.
    let outcome = guard(Route::Trips, &AuthDecision::Unauthenticated);
    println!("/trips without a session: {outcome:?}");

    Ok(())
}
