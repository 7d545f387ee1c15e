// crates/tripcat-core/src/raw.rs

//! # Raw Feed Records
//!
//! Wire shapes of the two upstream feeds and the decode boundary that turns
//! untrusted JSON into typed records.
//!
//! Both feeds answer with the same envelope:
//!
//! ```json
//! { "error": false, "msg": "...", "data": [ ... ] }
//! ```
//!
//! Structural problems (no `data` array, a missing key, a wrong JSON type)
//! are reported as [`TripError::DataShape`]. Empty strings and absent
//! coordinates are *not* shape errors; the reconciler drops those records
//! silently.

use crate::error::{Result, TripError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io::Read;

pub const FLAGS_URL: &str = "https://countriesnow.space/api/v0.1/countries/flag/images";
pub const POSITIONS_URL: &str = "https://countriesnow.space/api/v0.1/countries/positions";

/// Which upstream feed a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Flags,
    Positions,
}

impl Feed {
    pub fn as_str(self) -> &'static str {
        match self {
            Feed::Flags => "flags",
            Feed::Positions => "positions",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            Feed::Flags => FLAGS_URL,
            Feed::Positions => POSITIONS_URL,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the flag-image feed:
/// `{ "name": "France", "flag": "https://...", "iso2": "FR", "iso3": "FRA" }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFlagRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "flag", deserialize_with = "null_as_empty")]
    pub flag_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub iso2: String,
}

impl RawFlagRecord {
    pub fn new(name: &str, flag_url: &str, iso2: &str) -> Self {
        Self {
            name: name.to_owned(),
            flag_url: flag_url.to_owned(),
            iso2: iso2.to_owned(),
        }
    }
}

/// One entry of the position feed:
/// `{ "name": "France", "iso2": "FR", "lat": 46, "long": 2 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPositionRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub iso2: String,
    #[serde(rename = "lat", deserialize_with = "nullable")]
    pub latitude: Option<f64>,
    #[serde(rename = "long", deserialize_with = "nullable")]
    pub longitude: Option<f64>,
}

impl RawPositionRecord {
    pub fn new(name: &str, iso2: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_owned(),
            iso2: iso2.to_owned(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// The coordinate pair, only when both halves are present and finite.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }
}

/// The `{ error, msg, data }` wrapper shared by both feeds.
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope<T> {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub msg: Option<String>,
    pub data: Vec<T>,
}

/// Decode a feed payload into typed records.
///
/// Any structural problem is reported with the JSON path where decoding
/// stopped, e.g. `data[3].iso2`.
pub fn decode_feed<T, R>(feed: Feed, reader: R) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut de = serde_json::Deserializer::from_reader(reader);
    let envelope: FeedEnvelope<T> =
        serde_path_to_error::deserialize(&mut de).map_err(|e| TripError::DataShape {
            feed: feed.as_str(),
            path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;

    if envelope.error {
        tracing::warn!(
            feed = feed.as_str(),
            msg = envelope.msg.as_deref().unwrap_or(""),
            "feed flagged its payload as an error; using the data anyway"
        );
    }
    Ok(envelope.data)
}

pub fn decode_flags<R: Read>(reader: R) -> Result<Vec<RawFlagRecord>> {
    decode_feed(Feed::Flags, reader)
}

pub fn decode_positions<R: Read>(reader: R) -> Result<Vec<RawPositionRecord>> {
    decode_feed(Feed::Positions, reader)
}

// Required key, `null` tolerated.
fn null_as_empty<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(d).map(Option::unwrap_or_default)
}

fn nullable<'de, D, T>(d: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d)
}
