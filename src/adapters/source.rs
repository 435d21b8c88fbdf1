use async_trait::async_trait;

use crate::domain::{Event, OddsPayload};
use crate::error::Result;

/// Where events and their odds come from.
///
/// The sync run only talks to this trait, so it can be driven by the live
/// API client or by an in-memory source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Upcoming events for the configured sport
    async fn list_events(&self) -> Result<Vec<Event>>;

    /// Odds for one event, filtered to the configured markets and bookmaker
    async fn fetch_event_odds(&self, event: &Event) -> Result<OddsPayload>;
}
