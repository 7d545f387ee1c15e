// crates/tripcat-core/src/model/convert.rs

//! **Reconciler:** Raw feeds -> Catalog.
//!
//! 1. Seed one entry per lowercase ISO2 code from the flag feed.
//! 2. Attach coordinates from the position feed by ISO2.
//! 3. If nothing matched, retry every position by name.
//! 4. Keep entries with coordinates, sorted by display name.

use super::{Catalog, Coordinates, Country};
use crate::common::ReconcileStats;
use crate::error::{Result, TripError};
use crate::raw::{RawFlagRecord, RawPositionRecord};
use crate::text::is_blank;
use crate::traits::{CatalogBackend, NameMatch};
use std::collections::HashMap;
use tracing::{debug, info};

/// A catalog together with the numbers of the pass that built it.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation<B: CatalogBackend> {
    pub catalog: Catalog<B>,
    pub stats: ReconcileStats,
}

/// OpenStreetMap link centred on a coordinate pair.
///
/// ```rust
/// assert_eq!(
///     tripcat_core::map_link(46.6, 2.2),
///     "https://www.openstreetmap.org/?mlat=46.6&mlon=2.2#map=5/46.6/2.2"
/// );
/// ```
pub fn map_link(lat: f64, lon: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=5/{lat}/{lon}")
}

// Working entry; becomes a `Country` once the pass is over.
struct Draft {
    iso: String,
    name: String,
    flag_url: String,
    coords: Option<(f64, f64)>,
}

impl NameMatch for Draft {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// Join the two feeds into a [`Catalog`].
///
/// Never fails: records that do not qualify are skipped and an empty
/// catalog is a valid result.
pub fn reconcile<B: CatalogBackend>(
    flags: &[RawFlagRecord],
    positions: &[RawPositionRecord],
) -> Catalog<B> {
    reconcile_with_stats(flags, positions).catalog
}

/// Like [`reconcile`], but reports [`TripError::ReconciliationEmpty`] when no
/// country ended up with coordinates.
pub fn try_reconcile<B: CatalogBackend>(
    flags: &[RawFlagRecord],
    positions: &[RawPositionRecord],
) -> Result<Reconciliation<B>> {
    let reconciliation = reconcile_with_stats(flags, positions);
    if reconciliation.catalog.is_empty() {
        return Err(TripError::ReconciliationEmpty);
    }
    Ok(reconciliation)
}

pub fn reconcile_with_stats<B: CatalogBackend>(
    flags: &[RawFlagRecord],
    positions: &[RawPositionRecord],
) -> Reconciliation<B> {
    let mut stats = ReconcileStats {
        flag_records: flags.len(),
        position_records: positions.len(),
        ..ReconcileStats::default()
    };

    // 1. Seed from flags. The index keeps first-seen order; a repeated code
    //    overwrites the entry in place.
    let mut drafts: Vec<Draft> = Vec::with_capacity(flags.len());
    let mut by_iso: HashMap<String, usize> = HashMap::with_capacity(flags.len());

    for flag in flags {
        if is_blank(&flag.name) || is_blank(&flag.flag_url) || is_blank(&flag.iso2) {
            continue;
        }
        let iso = flag.iso2.trim().to_lowercase();
        let draft = Draft {
            iso: iso.clone(),
            name: flag.name.trim().to_owned(),
            flag_url: flag.flag_url.clone(),
            coords: None,
        };
        match by_iso.get(&iso) {
            Some(&idx) => drafts[idx] = draft,
            None => {
                by_iso.insert(iso, drafts.len());
                drafts.push(draft);
            }
        }
    }
    stats.countries_with_flags = drafts.len();

    // 2. Join positions by ISO2.
    for pos in positions {
        let Some(coords) = pos.coordinates() else {
            continue;
        };
        if is_blank(&pos.iso2) {
            continue;
        }
        let iso = pos.iso2.trim().to_lowercase();
        match by_iso.get(&iso) {
            Some(&idx) => {
                drafts[idx].coords = Some(coords);
                stats.matched_by_iso += 1;
            }
            None => {
                stats.unmatched_positions += 1;
                debug!(iso = %iso, name = %pos.name, "no flag entry for position");
            }
        }
    }

    // 3. Name fallback, only when the ISO join produced nothing at all.
    if !drafts.iter().any(|d| d.coords.is_some()) {
        stats.name_fallback = true;
        debug!("ISO2 join matched nothing, falling back to name matching");

        for pos in positions {
            let Some(coords) = pos.coordinates() else {
                continue;
            };
            let name = pos.name.trim();
            if name.is_empty() {
                continue;
            }
            let found = drafts
                .iter_mut()
                .find(|d| d.is_named(name) || d.name_contains(name) || d.name_within(name));
            if let Some(draft) = found {
                if draft.coords.is_none() {
                    draft.coords = Some(coords);
                    stats.matched_by_name += 1;
                }
            }
        }
    }

    // 4. Keep located entries.
    let countries = drafts
        .into_iter()
        .filter_map(|d| {
            let (lat, lon) = d.coords?;
            Some(Country::<B> {
                iso_code: B::str_from(&d.iso),
                name: B::str_from(&d.name),
                flag_url: B::str_from(&d.flag_url),
                coordinates: Some(Coordinates::new(lat, lon)),
                map_link: Some(B::str_from(&map_link(lat, lon))),
            })
        })
        .collect();

    let catalog = Catalog::from_countries(countries);
    stats.countries = catalog.len();

    info!(
        flags = stats.flag_records,
        positions = stats.position_records,
        matched_by_iso = stats.matched_by_iso,
        matched_by_name = stats.matched_by_name,
        unmatched = stats.unmatched_positions,
        countries = stats.countries,
        "reconciled country feeds"
    );

    Reconciliation { catalog, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DefaultBackend;

    fn flag(name: &str, iso: &str) -> RawFlagRecord {
        RawFlagRecord::new(name, &format!("{}.png", iso.to_lowercase()), iso)
    }

    #[test]
    fn joins_by_iso_case_insensitively() {
        let flags = [RawFlagRecord::new("France", "f.png", "FR")];
        let positions = [RawPositionRecord::new("France", "fr", 46.6, 2.2)];

        let catalog: Catalog<DefaultBackend> = reconcile(&flags, &positions);
        assert_eq!(catalog.len(), 1);
        let fr = &catalog.countries()[0];
        assert_eq!(fr.iso_code(), "fr");
        assert_eq!(fr.name(), "France");
        assert_eq!(fr.flag_url(), "f.png");
        assert_eq!(fr.coordinates(), Some((46.6, 2.2)));
        let link = fr.map_link().unwrap();
        assert!(link.contains("lat=46.6"), "{link}");
        assert!(link.contains("lon=2.2"), "{link}");
    }

    #[test]
    fn blank_flag_fields_are_dropped() {
        let flags = [
            RawFlagRecord::new("  ", "x.png", "XX"),
            RawFlagRecord::new("Nowhere", "", "NW"),
            RawFlagRecord::new("Noiso", "n.png", " "),
            flag(" Spain ", "ES"),
        ];
        let positions = [
            RawPositionRecord::new("Spain", "ES", 40.0, -4.0),
            RawPositionRecord::new("Nowhere", "NW", 1.0, 1.0),
        ];
        let r = reconcile_with_stats::<DefaultBackend>(&flags, &positions);
        assert_eq!(r.stats.countries_with_flags, 1);
        assert_eq!(r.stats.unmatched_positions, 1);
        assert_eq!(r.catalog.countries()[0].name(), "Spain");
    }

    #[test]
    fn duplicate_flag_codes_last_write_wins() {
        let flags = [
            RawFlagRecord::new("Germany", "old.png", "DE"),
            RawFlagRecord::new("Germany", "new.png", "de"),
        ];
        let positions = [RawPositionRecord::new("Germany", "DE", 51.0, 9.0)];
        let catalog: Catalog<DefaultBackend> = reconcile(&flags, &positions);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.countries()[0].flag_url(), "new.png");
    }

    #[test]
    fn positions_without_coordinates_are_skipped() {
        let flags = [flag("Italy", "IT"), flag("Malta", "MT")];
        let mut partial = RawPositionRecord::new("Malta", "MT", 35.9, 14.4);
        partial.longitude = None;
        let positions = [
            RawPositionRecord::new("Italy", "IT", 42.8, 12.8),
            partial,
            RawPositionRecord::new("Italy", "IT", f64::NAN, 12.8),
        ];
        let catalog: Catalog<DefaultBackend> = reconcile(&flags, &positions);
        let codes: Vec<_> = catalog.iter().map(|c| c.iso_code()).collect();
        assert_eq!(codes, ["it"]);
        assert_eq!(catalog.countries()[0].coordinates(), Some((42.8, 12.8)));
    }

    #[test]
    fn name_fallback_runs_only_without_iso_matches() {
        let flags = [flag("France", "FR"), flag("Spain", "ES")];
        // ISO codes from another scheme: nothing joins.
        let positions = [
            RawPositionRecord::new("France", "FRA", 46.0, 2.0),
            RawPositionRecord::new("Kingdom of Spain", "ESP", 40.0, -4.0),
        ];
        let r = reconcile_with_stats::<DefaultBackend>(&flags, &positions);
        assert!(r.stats.name_fallback);
        assert_eq!(r.stats.matched_by_iso, 0);
        assert_eq!(r.stats.matched_by_name, 2);
        assert_eq!(r.catalog.len(), 2);

        // One ISO hit is enough to skip the fallback entirely.
        let positions = [
            RawPositionRecord::new("France", "FR", 46.0, 2.0),
            RawPositionRecord::new("Spain", "ESP", 40.0, -4.0),
        ];
        let r = reconcile_with_stats::<DefaultBackend>(&flags, &positions);
        assert!(!r.stats.name_fallback);
        assert_eq!(r.catalog.len(), 1);
    }

    #[test]
    fn name_fallback_first_match_is_final() {
        // "Niger" is contained in "Nigeria" and comes first, so both
        // positions land on it; the second one is discarded.
        let flags = [flag("Niger", "NE"), flag("Nigeria", "NG")];
        let positions = [
            RawPositionRecord::new("Niger", "XX", 17.6, 8.1),
            RawPositionRecord::new("Nigeria", "YY", 9.1, 8.7),
        ];
        let r = reconcile_with_stats::<DefaultBackend>(&flags, &positions);
        assert_eq!(r.stats.matched_by_name, 1);
        assert_eq!(r.catalog.len(), 1);
        assert_eq!(r.catalog.countries()[0].iso_code(), "ne");
        assert_eq!(r.catalog.countries()[0].coordinates(), Some((17.6, 8.1)));
    }

    #[test]
    fn empty_flags_give_empty_catalog() {
        let positions = [RawPositionRecord::new("France", "FR", 46.0, 2.0)];
        let r = reconcile_with_stats::<DefaultBackend>(&[], &positions);
        assert!(r.catalog.is_empty());
        assert!(matches!(
            try_reconcile::<DefaultBackend>(&[], &positions),
            Err(TripError::ReconciliationEmpty)
        ));
    }
}
