//! Upstream records as The Odds API returns them.
//!
//! Only presence is checked: missing lists read as empty and numeric fields
//! that are absent or malformed read as `None`, so one bad outcome never
//! fails a whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upstream event identifier, reused verbatim as the game id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scheduled game from the events listing.
///
/// Only `id` is required; the rest degrade to `None` and are written as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub home_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub away_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub commence_time: Option<String>,
}

impl Event {
    /// "Away @ Home", the way schedules print it
    pub fn matchup(&self) -> String {
        format!(
            "{} @ {}",
            self.away_team.as_deref().unwrap_or("?"),
            self.home_team.as_deref().unwrap_or("?")
        )
    }
}

/// Per-event odds response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OddsPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookmakers: Vec<BookmakerOdds>,
}

impl OddsPayload {
    /// Markets of the first bookmaker; the query filter selects a single book
    pub fn primary_markets(&self) -> &[MarketOdds] {
        self.bookmakers
            .first()
            .map(|b| b.markets.as_slice())
            .unwrap_or(&[])
    }
}

/// Markets posted by one sportsbook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmakerOdds {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub markets: Vec<MarketOdds>,
}

/// One market (h2h, player_points, ...) and its priced outcomes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketOdds {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outcomes: Vec<Outcome>,
}

/// A single priced line.
///
/// Team markets carry the team in `name`. Player markets put "Over"/"Under"
/// in `name`, the player in `description` and the line in `point`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub point: Option<f64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_ignores_extra_fields() {
        let event: Event = serde_json::from_value(json!({
            "id": "e912",
            "sport_key": "basketball_nba",
            "sport_title": "NBA",
            "commence_time": "2026-10-21T23:30:00Z",
            "home_team": "Boston Celtics",
            "away_team": "New York Knicks"
        }))
        .unwrap();

        assert_eq!(event.id.as_str(), "e912");
        assert_eq!(event.matchup(), "New York Knicks @ Boston Celtics");
    }

    #[test]
    fn test_event_tolerates_null_or_missing_teams() {
        let event: Event = serde_json::from_value(json!({
            "id": "e913",
            "home_team": "Miami Heat",
            "away_team": null
        }))
        .unwrap();

        assert_eq!(event.home_team.as_deref(), Some("Miami Heat"));
        assert_eq!(event.away_team, None);
        assert_eq!(event.commence_time, None);
        assert_eq!(event.matchup(), "? @ Miami Heat");
    }

    #[test]
    fn test_event_requires_id() {
        let missing = serde_json::from_value::<Event>(json!({ "home_team": "Miami Heat" }));
        let null = serde_json::from_value::<Event>(json!({ "id": null }));

        assert!(missing.is_err());
        assert!(null.is_err());
    }

    #[test]
    fn test_missing_or_null_bookmakers_is_empty() {
        let missing: OddsPayload = serde_json::from_value(json!({ "id": "e1" })).unwrap();
        let null: OddsPayload = serde_json::from_value(json!({ "bookmakers": null })).unwrap();

        assert!(missing.primary_markets().is_empty());
        assert!(null.primary_markets().is_empty());
    }

    #[test]
    fn test_only_first_bookmaker_is_primary() {
        let payload: OddsPayload = serde_json::from_value(json!({
            "bookmakers": [
                { "key": "fanduel", "markets": [{ "key": "h2h", "outcomes": [] }] },
                { "key": "draftkings", "markets": [
                    { "key": "h2h", "outcomes": [] },
                    { "key": "player_points", "outcomes": [] }
                ] }
            ]
        }))
        .unwrap();

        let markets = payload.primary_markets();
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].key, "h2h");
    }

    #[test]
    fn test_outcome_degrades_malformed_fields_to_none() {
        let outcome: Outcome = serde_json::from_value(json!({
            "name": "Over",
            "description": "Jayson Tatum",
            "price": "1.87",
            "point": { "unexpected": true }
        }))
        .unwrap();

        assert_eq!(outcome.description.as_deref(), Some("Jayson Tatum"));
        assert_eq!(outcome.price, Some(1.87));
        assert_eq!(outcome.point, None);

        let bare: Outcome = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert_eq!(bare, Outcome::default());
    }
}
