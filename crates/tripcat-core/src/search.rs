// crates/tripcat-core/src/search.rs
use crate::model::{Catalog, Country};
use crate::text::fold_key;
use crate::traits::{CatalogBackend, NameMatch};

/// Lookups over a [`Catalog`].
pub trait CatalogSearch<B: CatalogBackend> {
    /// Keyed lookup by ISO2 code, case-insensitive (e.g. "FR", "fr").
    ///
    /// ```rust
    /// use tripcat_core::prelude::*;
    ///
    /// let catalog: DefaultCatalog = reconcile(
    ///     &[RawFlagRecord::new("Peru", "pe.png", "PE")],
    ///     &[RawPositionRecord::new("Peru", "PE", -10.0, -76.0)],
    /// );
    /// assert_eq!(catalog.find_country_by_iso2(" pe ").map(|c| c.name()), Some("Peru"));
    /// assert!(catalog.find_country_by_iso2("xx").is_none());
    /// ```
    fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country<B>>;

    /// Exact display-name lookup, case and accent insensitive.
    fn find_country_by_name(&self, name: &str) -> Option<&Country<B>>;

    /// Resolve a code or a name: ISO2 first, then the exact name.
    fn find_country(&self, query: &str) -> Option<&Country<B>>;

    /// Countries whose display name contains `substr`, in catalog order.
    /// An empty query matches nothing.
    fn find_countries_by_substring(&self, substr: &str) -> Vec<&Country<B>>;
}

impl<B: CatalogBackend> CatalogSearch<B> for Catalog<B> {
    fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country<B>> {
        let code = iso2.trim();
        self.iter()
            .find(|c| c.iso_code().eq_ignore_ascii_case(code))
    }

    fn find_country_by_name(&self, name: &str) -> Option<&Country<B>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.iter().find(|c| c.is_named(name))
    }

    fn find_country(&self, query: &str) -> Option<&Country<B>> {
        self.find_country_by_iso2(query)
            .or_else(|| self.find_country_by_name(query))
    }

    fn find_countries_by_substring(&self, substr: &str) -> Vec<&Country<B>> {
        let q = fold_key(substr.trim());
        if q.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|c| fold_key(c.name()).contains(&q))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{reconcile, DefaultCatalog};
    use crate::raw::{RawFlagRecord, RawPositionRecord};

    fn catalog() -> DefaultCatalog {
        let flags = [
            RawFlagRecord::new("Guinea", "gn.png", "GN"),
            RawFlagRecord::new("Guinea-Bissau", "gw.png", "GW"),
            RawFlagRecord::new("Curaçao", "cw.png", "CW"),
        ];
        let positions = [
            RawPositionRecord::new("Guinea", "GN", 11.0, -10.0),
            RawPositionRecord::new("Guinea-Bissau", "GW", 12.0, -15.0),
            RawPositionRecord::new("Curaçao", "CW", 12.2, -69.0),
        ];
        reconcile(&flags, &positions)
    }

    #[test]
    fn substring_search_keeps_catalog_order() {
        let catalog = catalog();
        let hits: Vec<_> = catalog
            .find_countries_by_substring("GUINEA")
            .into_iter()
            .map(|c| c.iso_code())
            .collect();
        assert_eq!(hits, ["gn", "gw"]);
        assert!(catalog.find_countries_by_substring("  ").is_empty());
    }

    #[test]
    fn resolves_codes_before_names() {
        let catalog = catalog();
        assert_eq!(catalog.find_country("CW").unwrap().name(), "Curaçao");
        assert_eq!(catalog.find_country("curacao").unwrap().iso_code(), "cw");
        assert!(catalog.find_country("Guine").is_none());
    }
}
