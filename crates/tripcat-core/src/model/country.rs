// crates/tripcat-core/src/model/country.rs
use crate::traits::{CatalogBackend, NameMatch};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Either both halves exist or the whole pair is
/// absent; there is no way to hold only one of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Coordinates<B: CatalogBackend> {
    pub lat: B::Float,
    pub lon: B::Float,
}

impl<B: CatalogBackend> Coordinates<B> {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: B::float_from(lat),
            lon: B::float_from(lon),
        }
    }

    pub fn lat(&self) -> f64 {
        B::float_to_f64(self.lat)
    }

    pub fn lon(&self) -> f64 {
        B::float_to_f64(self.lon)
    }
}

/// A reconciled destination country.
///
/// Built once per reconciliation pass and never mutated afterwards; a new
/// pass produces a new [`crate::Catalog`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Country<B: CatalogBackend> {
    /// Lowercase ISO2 code, the catalog key.
    pub iso_code: B::Str,
    /// Trimmed name from the flag feed.
    pub name: B::Str,
    pub flag_url: B::Str,
    pub coordinates: Option<Coordinates<B>>,
    /// OpenStreetMap link centred on `coordinates`.
    pub map_link: Option<B::Str>,
}

impl<B: CatalogBackend> Country<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn iso_code(&self) -> &str {
        self.iso_code.as_ref()
    }

    pub fn flag_url(&self) -> &str {
        self.flag_url.as_ref()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.coordinates.as_ref().map(|c| (c.lat(), c.lon()))
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.as_ref().map(Coordinates::lat)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.as_ref().map(Coordinates::lon)
    }

    pub fn map_link(&self) -> Option<&str> {
        self.map_link.as_ref().map(|s| s.as_ref())
    }
}

impl<B: CatalogBackend> NameMatch for Country<B> {
    fn name_str(&self) -> &str {
        self.name()
    }
}
