// crates/tripcat-core/src/model/catalog.rs
use super::convert::map_link;
use super::{Country, DefaultBackend};
use crate::selector::SelectorItem;
use crate::text::{collate, is_blank};
use crate::traits::CatalogBackend;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// The sorted, deduplicated list of reconciled countries.
///
/// Invariants:
/// - entries are ordered by display name using [`collate`];
/// - no two entries share an ISO code;
/// - every ISO code is non-empty and lowercase;
/// - every entry has a name, a flag URL and finite coordinates;
/// - `map_link` always matches the coordinates.
///
/// [`Catalog::from_countries`] is the only way in, so the invariants hold
/// for any catalog the crate hands out. Deserialized snapshots are passed
/// back through it before use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Catalog<B: CatalogBackend = DefaultBackend> {
    countries: Vec<Country<B>>,
}

/// Convenient alias for the default backend.
pub type DefaultCatalog = Catalog<DefaultBackend>;

impl<B: CatalogBackend> Default for Catalog<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B: CatalogBackend> Catalog<B> {
    pub fn empty() -> Self {
        Self {
            countries: Vec::new(),
        }
    }

    /// Validate, deduplicate and sort a set of countries.
    ///
    /// Entries with a blank ISO code, name or flag URL are dropped, as are
    /// entries without finite coordinates. ISO codes are lowercased and the
    /// map link is rebuilt from the coordinates. When two valid entries
    /// share a code the later one wins.
    pub fn from_countries(countries: Vec<Country<B>>) -> Self {
        let mut out: Vec<Country<B>> = Vec::with_capacity(countries.len());
        let mut seen: HashMap<String, usize> = HashMap::with_capacity(countries.len());
        let mut rejected = 0usize;

        for mut country in countries {
            let key = country.iso_code().trim().to_lowercase();
            let located = country
                .coordinates()
                .filter(|(lat, lon)| lat.is_finite() && lon.is_finite());
            let Some((lat, lon)) = located else {
                rejected += 1;
                continue;
            };
            if key.is_empty() || is_blank(country.name()) || is_blank(country.flag_url()) {
                rejected += 1;
                continue;
            }
            if key != country.iso_code() {
                country.iso_code = B::str_from(&key);
            }
            country.map_link = Some(B::str_from(&map_link(lat, lon)));
            match seen.get(&key) {
                Some(&idx) => out[idx] = country,
                None => {
                    seen.insert(key, out.len());
                    out.push(country);
                }
            }
        }

        if rejected > 0 {
            debug!(rejected, "dropped incomplete catalog entries");
        }
        out.sort_by(|a, b| collate(a.name(), b.name()));
        Self { countries: out }
    }

    /// All countries in catalog order.
    pub fn countries(&self) -> &[Country<B>] {
        &self.countries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country<B>> {
        self.countries.iter()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn into_countries(self) -> Vec<Country<B>> {
        self.countries
    }

    /// Project the catalog onto selector items (`iso_code → value`,
    /// `name → label`), preserving catalog order.
    pub fn selector_items(&self) -> Vec<SelectorItem> {
        self.countries
            .iter()
            .map(|c| SelectorItem {
                value: c.iso_code().to_owned(),
                label: c.name().to_owned(),
                flag_url: c.flag_url().to_owned(),
            })
            .collect()
    }
}

impl<'a, B: CatalogBackend> IntoIterator for &'a Catalog<B> {
    type Item = &'a Country<B>;
    type IntoIter = std::slice::Iter<'a, Country<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.countries.iter()
    }
}
