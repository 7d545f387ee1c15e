#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};
use std::fs;
#[cfg(feature = "compact")]
use std::io::Write;
#[cfg(feature = "compact")]
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tripcat_core::prelude::*;

const FLAGS_JSON: &str = r#"{
  "error": false,
  "msg": "flags and iso codes retrieved",
  "data": [
    { "name": "Germany", "flag": "https://flags.example/de.svg", "iso2": "DE", "iso3": "DEU" },
    { "name": "Austria", "flag": "https://flags.example/at.svg", "iso2": "AT", "iso3": "AUT" },
    { "name": "Kosovo", "flag": "", "iso2": "XK", "iso3": "XKX" }
  ]
}"#;

const POSITIONS_JSON: &str = r#"{
  "error": false,
  "msg": "countries and positions retrieved",
  "data": [
    { "name": "Germany", "iso2": "DE", "long": 9, "lat": 51 },
    { "name": "Austria", "iso2": "AT", "long": 13.33333333, "lat": 47.33333333 }
  ]
}"#;

#[cfg(feature = "compact")]
fn write_gz(path: &Path, body: &str) {
    let mut enc = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
    enc.write_all(body.as_bytes()).unwrap();
    enc.finish().unwrap();
}

struct StubFeed {
    flags: std::result::Result<Vec<RawFlagRecord>, &'static str>,
    positions: std::result::Result<Vec<RawPositionRecord>, &'static str>,
    calls: AtomicUsize,
}

impl StubFeed {
    fn ok(flags: Vec<RawFlagRecord>, positions: Vec<RawPositionRecord>) -> Self {
        Self {
            flags: Ok(flags),
            positions: Ok(positions),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FeedSource for StubFeed {
    fn flags(&self) -> Result<Vec<RawFlagRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.flags.clone().map_err(|m| TripError::Transport(m.into()))
    }

    fn positions(&self) -> Result<Vec<RawPositionRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.positions.clone().map_err(|m| TripError::Transport(m.into()))
    }
}

#[test]
fn file_feed_reconciles_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let flags = dir.path().join("flags.json");
    let positions = dir.path().join("positions.json");
    fs::write(&flags, FLAGS_JSON).unwrap();
    fs::write(&positions, POSITIONS_JSON).unwrap();

    let loader = CatalogLoader::new(FileFeed::new(&flags, &positions));
    let r = loader.try_load::<DefaultBackend>().unwrap();

    assert_eq!(r.stats.flag_records, 3);
    assert_eq!(r.stats.countries_with_flags, 2);
    assert_eq!(r.stats.matched_by_iso, 2);
    let names: Vec<_> = r.catalog.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Austria", "Germany"]);
    assert_eq!(
        r.catalog.find_country_by_iso2("DE").unwrap().coordinates(),
        Some((51.0, 9.0))
    );
}

#[cfg(feature = "compact")]
#[test]
fn file_feed_reads_gzipped_json() {
    let dir = tempfile::tempdir().unwrap();
    let flags = dir.path().join("flags.json.gz");
    let positions = dir.path().join("positions.json.gz");
    write_gz(&flags, FLAGS_JSON);
    write_gz(&positions, POSITIONS_JSON);

    let catalog: DefaultCatalog = CatalogLoader::new(FileFeed::new(flags, positions)).load();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn missing_file_degrades_to_an_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let flags = dir.path().join("flags.json");
    fs::write(&flags, FLAGS_JSON).unwrap();

    let loader = CatalogLoader::new(FileFeed::new(&flags, dir.path().join("missing.json")));
    assert!(matches!(
        loader.try_load::<DefaultBackend>(),
        Err(TripError::NotFound(_))
    ));
    let catalog: DefaultCatalog = loader.load();
    assert!(catalog.is_empty());
}

#[test]
fn malformed_payload_degrades_to_an_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let flags = dir.path().join("flags.json");
    let positions = dir.path().join("positions.json");
    fs::write(&flags, r#"{ "error": false, "msg": "", "data": { "oops": true } }"#).unwrap();
    fs::write(&positions, POSITIONS_JSON).unwrap();

    let loader = CatalogLoader::new(FileFeed::new(flags, positions));
    let err = loader.try_load::<DefaultBackend>().unwrap_err();
    assert!(matches!(err, TripError::DataShape { feed: "flags", .. }));
    assert!(err.is_catalog_failure());
    assert!(loader.load::<DefaultBackend>().is_empty());
}

#[test]
fn both_feeds_are_fetched_even_when_one_fails() {
    let mut stub = StubFeed::ok(vec![], vec![]);
    stub.flags = Err("flags down");
    stub.positions = Err("positions down");
    let loader = CatalogLoader::new(stub);

    let err = loader.try_load::<DefaultBackend>().unwrap_err();
    assert!(matches!(err, TripError::Transport(ref m) if m == "flags down"));
    assert_eq!(loader.source().calls.load(Ordering::SeqCst), 2);
}

#[test]
fn empty_reconciliation_is_a_failure() {
    let loader = CatalogLoader::new(StubFeed::ok(
        vec![RawFlagRecord::new("Nowhere", "", "NW")],
        vec![RawPositionRecord::new("Nowhere", "NW", 1.0, 1.0)],
    ));
    assert!(matches!(
        loader.try_load::<DefaultBackend>(),
        Err(TripError::ReconciliationEmpty)
    ));
    assert!(loader.load::<DefaultBackend>().is_empty());
}

#[test]
fn every_load_refetches() {
    let loader = CatalogLoader::new(StubFeed::ok(
        vec![RawFlagRecord::new("Peru", "pe.svg", "PE")],
        vec![RawPositionRecord::new("Peru", "PE", -10.0, -76.0)],
    ));
    let first: DefaultCatalog = loader.load();
    let second: DefaultCatalog = loader.load();
    assert_eq!(first, second);
    assert_eq!(loader.source().calls.load(Ordering::SeqCst), 4);
}
