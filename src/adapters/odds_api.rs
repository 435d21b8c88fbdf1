//! The Odds API (v4) client.
//!
//! Two read-only calls: the events listing for a sport and the odds of a
//! single event. A non-success status is reported as
//! `OddsSyncError::UpstreamStatus`; nothing is retried.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::source::OddsSource;
use crate::config::OddsApiConfig;
use crate::domain::{Event, OddsPayload};
use crate::error::{OddsSyncError, Result};

/// Request-quota counters the API reports on every response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotaUsage {
    pub remaining: Option<u64>,
    pub used: Option<u64>,
    /// Cost of the request that returned these headers
    pub last: Option<u64>,
}

impl QuotaUsage {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as u64)
        };

        Self {
            remaining: read("x-requests-remaining"),
            used: read("x-requests-used"),
            last: read("x-requests-last"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_none() && self.used.is_none() && self.last.is_none()
    }
}

/// The Odds API client for one sport / bookmaker / market selection
#[derive(Clone)]
pub struct OddsApiClient {
    http: Client,
    config: OddsApiConfig,
}

impl std::fmt::Debug for OddsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key stays out of debug output
        f.debug_struct("OddsApiClient")
            .field("base_url", &self.config.base_url)
            .field("sport", &self.config.sport)
            .field("bookmaker", &self.config.bookmaker)
            .finish()
    }
}

impl OddsApiClient {
    pub fn new(config: OddsApiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(OddsSyncError::Validation(
                "odds API key not configured".into(),
            ));
        }

        let http = Client::builder()
            .user_agent(concat!("nba-odds-sync/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                OddsSyncError::Internal(format!("failed to build odds HTTP client: {}", e))
            })?;

        Ok(Self { http, config })
    }

    fn events_path(&self) -> String {
        format!("sports/{}/events", self.config.sport)
    }

    fn event_odds_path(&self, event: &Event) -> String {
        format!("sports/{}/events/{}/odds", self.config.sport, event.id)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Query parameters of the per-event odds call, apiKey excluded
    fn odds_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("regions", self.config.regions.clone()),
            ("markets", self.config.markets_param()),
            ("bookmakers", self.config.bookmaker.clone()),
            ("oddsFormat", self.config.odds_format.as_str().to_string()),
        ]
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        debug!(endpoint = %path, "GET");

        let response = self
            .http
            .get(self.url(path))
            .query(&[("apiKey", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await
            // request URLs carry the key
            .map_err(|e| OddsSyncError::Http(e.without_url()))?;

        let quota = QuotaUsage::from_headers(response.headers());
        if !quota.is_empty() {
            debug!(
                endpoint = %path,
                remaining = ?quota.remaining,
                used = ?quota.used,
                last = ?quota.last,
                "odds API quota"
            );
        }

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(endpoint = %path, status = status.as_u16(), body = %text, "odds API error body");
            return Err(OddsSyncError::UpstreamStatus {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OddsSyncError::Http(e.without_url()))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(endpoint = %path, error = %e, "odds API returned an undecodable body");
            OddsSyncError::Json(e)
        })
    }
}

/// Decode listing entries one by one, dropping those without a usable id
fn decode_listing(entries: Vec<Value>) -> Vec<Event> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Event>(entry) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "skipping malformed event in listing");
                None
            }
        })
        .collect()
}

#[async_trait]
impl OddsSource for OddsApiClient {
    async fn list_events(&self) -> Result<Vec<Event>> {
        let entries: Vec<Value> = self.get_json(&self.events_path(), &[]).await?;
        Ok(decode_listing(entries))
    }

    async fn fetch_event_odds(&self, event: &Event) -> Result<OddsPayload> {
        self.get_json(&self.event_odds_path(event), &self.odds_query())
            .await
    }
}
