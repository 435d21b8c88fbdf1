//! Odds normalization: upstream events + per-event payloads -> `ResultDocument`.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::adapters::OddsSource;
use crate::config::OddsApiConfig;
use crate::domain::{
    Event, EventId, Game, MarketKind, MarketOdds, OddsPayload, PlayerName, PropCategory, PropLine,
    ResultDocument,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Collect h2h prices into `team_odds`; when off the field is omitted
    pub include_team_odds: bool,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            include_team_odds: true,
        }
    }
}

impl AggregationOptions {
    pub fn from_config(api: &OddsApiConfig) -> Self {
        Self {
            include_team_odds: api.includes_team_odds(),
        }
    }
}

/// An event that contributed no game, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEvent {
    pub id: EventId,
    pub reason: String,
}

/// Aggregated document plus what was left out of it
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub document: ResultDocument,
    pub skipped: Vec<SkippedEvent>,
    /// Events dropped because an earlier event had the same id
    pub duplicates: usize,
}

/// Build the normalized game for one event from its odds payload.
///
/// Only the first bookmaker is read. Outcomes missing the field that names
/// their team or player are skipped; missing prices and thresholds stay null.
pub fn build_game(event: &Event, payload: &OddsPayload, options: AggregationOptions) -> Game {
    let mut game = Game::from_event(event, options.include_team_odds);

    for market in payload.primary_markets() {
        match MarketKind::from_key(&market.key) {
            MarketKind::HeadToHead if options.include_team_odds => {
                record_team_market(&mut game, market);
            }
            MarketKind::PlayerProp(category) => {
                record_prop_market(&mut game, market, category);
            }
            _ => {
                debug!(event_id = %event.id, market = %market.key, "ignoring market");
            }
        }
    }

    game
}

fn record_team_market(game: &mut Game, market: &MarketOdds) {
    for outcome in &market.outcomes {
        match outcome.name.as_deref() {
            Some(team) => game.record_team_price(team, outcome.price),
            None => debug!(event_id = %game.id, "h2h outcome without a team name"),
        }
    }
}

fn record_prop_market(game: &mut Game, market: &MarketOdds, category: PropCategory) {
    for outcome in &market.outcomes {
        let Some(player) = outcome.description.as_deref() else {
            debug!(event_id = %game.id, market = %market.key, "prop outcome without a player");
            continue;
        };

        game.record_prop(
            PlayerName::from(player),
            category,
            PropLine {
                threshold: outcome.point,
                odds: outcome.price,
            },
        );
    }
}

/// Fetch and normalize every event, in order, one request at a time.
///
/// A failed odds fetch drops that event and the run moves on.
pub async fn aggregate<S>(
    events: &[Event],
    source: &S,
    options: AggregationOptions,
    generated_at: NaiveDateTime,
) -> ResultDocument
where
    S: OddsSource + ?Sized,
{
    aggregate_detailed(events, source, options, generated_at)
        .await
        .document
}

/// Same as [`aggregate`], also reporting skipped and duplicate events
pub async fn aggregate_detailed<S>(
    events: &[Event],
    source: &S,
    options: AggregationOptions,
    generated_at: NaiveDateTime,
) -> Aggregation
where
    S: OddsSource + ?Sized,
{
    let mut document = ResultDocument::new(generated_at);
    let mut skipped = Vec::new();
    let mut duplicates = 0;
    let mut seen: HashSet<&EventId> = HashSet::with_capacity(events.len());

    for event in events {
        if !seen.insert(&event.id) {
            warn!(event_id = %event.id, "duplicate event id in listing, keeping the first");
            duplicates += 1;
            continue;
        }

        info!("Fetching odds: {}", event.matchup());

        let payload = match source.fetch_event_odds(event).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(event_id = %event.id, error = %e, "odds fetch failed, skipping event");
                skipped.push(SkippedEvent {
                    id: event.id.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let game = build_game(event, &payload, options);
        debug!(
            event_id = %game.id,
            players = game.players.len(),
            prop_lines = game.prop_line_count(),
            "game normalized"
        );
        document.games.push(game);
    }

    Aggregation {
        document,
        skipped,
        duplicates,
    }
}
