// crates/tripcat-core/src/selector.rs

//! # Destination Selector
//!
//! A searchable single-select over the catalog projection. The widget only
//! knows `{ value, label, flag_url }` items; turning the emitted value back
//! into a [`crate::Country`] is the caller's job
//! ([`crate::CatalogSearch::find_country_by_iso2`]).

use crate::text::fold_key;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

pub const NO_DATA: &str = "No data available.";
pub const NO_RESULTS: &str = "No results found.";
pub const DEFAULT_PLACEHOLDER: &str = "Select an option...";

/// One selectable entry: `value` is the ISO code, `label` the display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorItem {
    pub value: String,
    pub label: String,
    pub flag_url: String,
}

impl NameMatch for SelectorItem {
    fn name_str(&self) -> &str {
        &self.label
    }
}

/// What the option list currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<'a> {
    /// No items at all: a disabled placeholder entry.
    Disabled,
    /// Items exist but the filter hides all of them.
    NoResults,
    Items(Vec<&'a SelectorItem>),
}

impl Listing<'_> {
    /// The placeholder text shown instead of items, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Listing::Disabled => Some(NO_DATA),
            Listing::NoResults => Some(NO_RESULTS),
            Listing::Items(_) => None,
        }
    }
}

/// The capability set every selection control offers.
pub trait SelectionWidget {
    /// The current option list under the active filter.
    fn listing(&self) -> Listing<'_>;

    /// Replace the free-text filter.
    fn set_query(&mut self, query: &str);

    /// Choose an item by value. Emits the new selection, or `""` when the
    /// chosen item was already selected.
    fn choose(&mut self, value: &str);

    /// Current selection, `""` for none.
    fn value(&self) -> &str;
}

/// A popover combobox with a search box.
///
/// `on_change` is invoked synchronously for every accepted choice.
pub struct Combobox<F>
where
    F: FnMut(&str),
{
    items: Vec<SelectorItem>,
    value: String,
    query: String,
    placeholder: String,
    open: bool,
    on_change: F,
}

impl<F> Combobox<F>
where
    F: FnMut(&str),
{
    pub fn new(items: Vec<SelectorItem>, current_value: impl Into<String>, on_change: F) -> Self {
        Self {
            items,
            value: current_value.into(),
            query: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            open: false,
            on_change,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn items(&self) -> &[SelectorItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// The item matching the current value, if any.
    pub fn selected(&self) -> Option<&SelectorItem> {
        if self.value.is_empty() {
            return None;
        }
        self.items.iter().find(|i| i.value == self.value)
    }

    /// Text on the closed trigger: the selected label or the placeholder.
    pub fn trigger_label(&self) -> &str {
        self.selected()
            .map(|i| i.label.as_str())
            .unwrap_or(&self.placeholder)
    }

    /// Placeholder of the search box, derived from the widget placeholder
    /// (`"Select a country"` -> `"Search a country..."`).
    pub fn search_placeholder(&self) -> String {
        let lowered = self.placeholder.to_lowercase().replacen("select ", "", 1);
        format!("Search {lowered}...")
    }
}

impl<F> SelectionWidget for Combobox<F>
where
    F: FnMut(&str),
{
    fn listing(&self) -> Listing<'_> {
        if self.items.is_empty() {
            return Listing::Disabled;
        }
        let q = fold_key(self.query.trim());
        let visible: Vec<&SelectorItem> = self
            .items
            .iter()
            .filter(|i| q.is_empty() || fold_key(&i.label).contains(&q))
            .collect();
        if visible.is_empty() {
            Listing::NoResults
        } else {
            Listing::Items(visible)
        }
    }

    fn set_query(&mut self, query: &str) {
        self.query = query.to_owned();
    }

    fn choose(&mut self, value: &str) {
        if !self.items.iter().any(|i| i.value == value) {
            return;
        }
        let next = if self.value == value {
            String::new()
        } else {
            value.to_owned()
        };
        self.value = next;
        (self.on_change)(&self.value);
        self.open = false;
    }

    fn value(&self) -> &str {
        &self.value
    }
}
