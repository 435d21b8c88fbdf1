use serde::{Deserialize, Serialize};

/// Market key for the team moneyline
pub const HEAD_TO_HEAD_KEY: &str = "h2h";

/// Prefix shared by every player-prop market key (e.g. "player_points")
pub const PLAYER_PROP_PREFIX: &str = "player_";

/// Player statistic a prop line is posted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropCategory {
    Points,
    Rebounds,
    Assists,
}

impl PropCategory {
    pub const ALL: [PropCategory; 3] = [
        PropCategory::Points,
        PropCategory::Rebounds,
        PropCategory::Assists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropCategory::Points => "points",
            PropCategory::Rebounds => "rebounds",
            PropCategory::Assists => "assists",
        }
    }

    /// Parse the label left after stripping the player-prop prefix
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "points" => Some(PropCategory::Points),
            "rebounds" => Some(PropCategory::Rebounds),
            "assists" => Some(PropCategory::Assists),
            _ => None,
        }
    }

    /// Full market key as requested from the API
    pub fn market_key(&self) -> String {
        format!("{}{}", PLAYER_PROP_PREFIX, self.as_str())
    }
}

impl std::fmt::Display for PropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the aggregator treats a market, decided from its key alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketKind {
    HeadToHead,
    PlayerProp(PropCategory),
    Unrecognized,
}

impl MarketKind {
    pub fn from_key(key: &str) -> Self {
        if key == HEAD_TO_HEAD_KEY {
            return MarketKind::HeadToHead;
        }

        key.strip_prefix(PLAYER_PROP_PREFIX)
            .and_then(PropCategory::from_label)
            .map(MarketKind::PlayerProp)
            .unwrap_or(MarketKind::Unrecognized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_known_keys() {
        assert_eq!(MarketKind::from_key("h2h"), MarketKind::HeadToHead);
        assert_eq!(
            MarketKind::from_key("player_points"),
            MarketKind::PlayerProp(PropCategory::Points)
        );
        assert_eq!(
            MarketKind::from_key("player_rebounds"),
            MarketKind::PlayerProp(PropCategory::Rebounds)
        );
        assert_eq!(
            MarketKind::from_key("player_assists"),
            MarketKind::PlayerProp(PropCategory::Assists)
        );
    }

    #[test]
    fn test_unknown_keys_are_unrecognized() {
        for key in ["player_threes", "spreads", "totals", "player_", "points", "H2H"] {
            assert_eq!(MarketKind::from_key(key), MarketKind::Unrecognized, "{key}");
        }
    }

    #[test]
    fn test_market_key_round_trips_through_classifier() {
        for category in PropCategory::ALL {
            assert_eq!(
                MarketKind::from_key(&category.market_key()),
                MarketKind::PlayerProp(category)
            );
        }
    }
}
