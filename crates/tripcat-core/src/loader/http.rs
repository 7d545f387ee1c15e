// crates/tripcat-core/src/loader/http.rs
#![cfg(feature = "fetch")]

use super::source::FeedSource;
use crate::error::{Result, TripError};
use crate::raw::{decode_feed, Feed, RawFlagRecord, RawPositionRecord};
use crate::settings::FeedSettings;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// The live `countriesnow.space` feeds.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    flags_url: String,
    positions_url: String,
}

impl HttpFeed {
    /// Client with transport defaults and the upstream URLs.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(
            build_client(None)?,
            Feed::Flags.default_url(),
            Feed::Positions.default_url(),
        ))
    }

    pub fn from_settings(settings: &FeedSettings) -> Result<Self> {
        Ok(Self::with_client(
            build_client(settings.timeout_secs)?,
            &settings.flags_url,
            &settings.positions_url,
        ))
    }

    pub fn with_client(client: Client, flags_url: &str, positions_url: &str) -> Self {
        Self {
            client,
            flags_url: flags_url.to_owned(),
            positions_url: positions_url.to_owned(),
        }
    }

    fn get<T: DeserializeOwned>(&self, feed: Feed, url: &str) -> Result<Vec<T>> {
        debug!(feed = %feed, url, "fetching feed");
        let transport = |e: reqwest::Error| TripError::Transport(format!("{feed} feed: {e}"));
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(transport)?;
        decode_feed(feed, body.as_ref())
    }
}

impl FeedSource for HttpFeed {
    fn flags(&self) -> Result<Vec<RawFlagRecord>> {
        self.get(Feed::Flags, &self.flags_url)
    }

    fn positions(&self) -> Result<Vec<RawPositionRecord>> {
        self.get(Feed::Positions, &self.positions_url)
    }
}

fn build_client(timeout_secs: Option<u64>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| TripError::Transport(e.to_string()))
}
