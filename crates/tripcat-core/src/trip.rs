// crates/tripcat-core/src/trip.rs

//! # Trip Drafts
//!
//! The hand-off between the destination selector and whatever stores trips.
//! A [`TripDraft`] holds the selector value plus free-form form attributes;
//! submitting it against a catalog resolves the country and yields a
//! [`SubmissionIntent`] for a [`TripStore`].

use crate::error::{Result, TripError};
use crate::model::{Catalog, Country};
use crate::search::CatalogSearch;
use crate::traits::CatalogBackend;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::info;

/// The resolved country as it travels with a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub name: String,
    pub iso_code: String,
    pub flag_url: String,
    pub coordinates: Option<[f64; 2]>,
    pub map_link: Option<String>,
}

impl<B: CatalogBackend> From<&Country<B>> for Destination {
    fn from(c: &Country<B>) -> Self {
        Destination {
            name: c.name().to_owned(),
            iso_code: c.iso_code().to_owned(),
            flag_url: c.flag_url().to_owned(),
            coordinates: c.coordinates().map(|(lat, lon)| [lat, lon]),
            map_link: c.map_link().map(str::to_owned),
        }
    }
}

/// What gets handed to the trip store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionIntent {
    pub destination: Destination,
    pub attributes: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// Form state of the trip-creation page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    selection: String,
    attributes: BTreeMap<String, String>,
}

impl TripDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the selector's emitted value (`""` clears).
    pub fn select(&mut self, value: &str) {
        self.selection = value.to_owned();
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Resolve the selection against `catalog`.
    pub fn resolve<'a, B: CatalogBackend>(&self, catalog: &'a Catalog<B>) -> Result<&'a Country<B>> {
        if self.selection.trim().is_empty() {
            return Err(TripError::NoCountrySelected);
        }
        catalog
            .find_country_by_iso2(&self.selection)
            .ok_or_else(|| TripError::CountryNotFound(self.selection.clone()))
    }

    pub fn submit<B: CatalogBackend>(&self, catalog: &Catalog<B>) -> Result<SubmissionIntent> {
        self.submit_at(catalog, Utc::now())
    }

    pub fn submit_at<B: CatalogBackend>(
        &self,
        catalog: &Catalog<B>,
        created_at: DateTime<Utc>,
    ) -> Result<SubmissionIntent> {
        let country = self.resolve(catalog)?;
        Ok(SubmissionIntent {
            destination: Destination::from(country),
            attributes: self.attributes.clone(),
            created_at,
        })
    }

    /// Submit and persist in one step. Returns the stored document id.
    pub fn create<B, S>(&self, catalog: &Catalog<B>, store: &S) -> Result<String>
    where
        B: CatalogBackend,
        S: TripStore + ?Sized,
    {
        let intent = self.submit(catalog)?;
        let id = store.save(&intent)?;
        info!(id = %id, country = %intent.destination.iso_code, "trip created");
        Ok(id)
    }
}

/// Persistence collaborator for submitted trips.
pub trait TripStore {
    /// Store the intent and return its document id.
    fn save(&self, intent: &SubmissionIntent) -> Result<String>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryTripStore {
    trips: Mutex<Vec<(String, SubmissionIntent)>>,
}

impl MemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<SubmissionIntent> {
        self.lock()
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, SubmissionIntent)>> {
        self.trips.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TripStore for MemoryTripStore {
    fn save(&self, intent: &SubmissionIntent) -> Result<String> {
        let mut trips = self.lock();
        let id = format!("trip-{}", trips.len() + 1);
        trips.push((id.clone(), intent.clone()));
        Ok(id)
    }
}
