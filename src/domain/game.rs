use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::event::{Event, EventId};
use super::market::PropCategory;

/// Player display name as the sportsbook prints it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One prop line: the threshold and the price offered on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropLine {
    pub threshold: Option<f64>,
    pub odds: Option<f64>,
}

/// Prop lines for one player, always carrying all three categories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProps {
    pub points: Vec<PropLine>,
    pub rebounds: Vec<PropLine>,
    pub assists: Vec<PropLine>,
}

impl PlayerProps {
    pub fn lines_mut(&mut self, category: PropCategory) -> &mut Vec<PropLine> {
        match category {
            PropCategory::Points => &mut self.points,
            PropCategory::Rebounds => &mut self.rebounds,
            PropCategory::Assists => &mut self.assists,
        }
    }

    pub fn line_count(&self) -> usize {
        self.points.len() + self.rebounds.len() + self.assists.len()
    }
}

/// Normalized odds for one game.
///
/// Teams and players keep the order the sportsbook first listed them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: EventId,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub commence_time: Option<String>,
    /// Team name -> moneyline price. `None` when h2h is not collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_odds: Option<IndexMap<String, Option<f64>>>,
    pub players: IndexMap<PlayerName, PlayerProps>,
}

impl Game {
    pub fn from_event(event: &Event, include_team_odds: bool) -> Self {
        Self {
            id: event.id.clone(),
            home_team: event.home_team.clone(),
            away_team: event.away_team.clone(),
            commence_time: event.commence_time.clone(),
            team_odds: include_team_odds.then(IndexMap::new),
            players: IndexMap::new(),
        }
    }

    /// Record a team's moneyline; a repeated team overwrites its earlier price
    /// and keeps its original position.
    /// Ignored when team odds are not collected for this game.
    pub fn record_team_price(&mut self, team: &str, price: Option<f64>) {
        if let Some(team_odds) = self.team_odds.as_mut() {
            team_odds.insert(team.to_string(), price);
        }
    }

    /// Append a prop line, creating the player with empty categories on first sight
    pub fn record_prop(&mut self, player: PlayerName, category: PropCategory, line: PropLine) {
        self.players
            .entry(player)
            .or_default()
            .lines_mut(category)
            .push(line);
    }

    pub fn player(&self, name: &str) -> Option<&PlayerProps> {
        self.players.get(&PlayerName::from(name))
    }

    pub fn prop_line_count(&self) -> usize {
        self.players.values().map(PlayerProps::line_count).sum()
    }
}

/// Everything written to the output file for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    #[serde(with = "local_timestamp")]
    pub last_updated: NaiveDateTime,
    pub games: Vec<Game>,
}

impl ResultDocument {
    pub fn new(last_updated: NaiveDateTime) -> Self {
        Self {
            last_updated,
            games: Vec::new(),
        }
    }
}

/// ISO-8601 local time without offset, microsecond precision
mod local_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(serde::de::Error::custom)
    }
}
