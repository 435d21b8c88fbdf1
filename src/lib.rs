//! NBA odds sync: pulls game and player-prop lines for one sportsbook from
//! The Odds API and writes them as a single JSON document.
//!
//! - `adapters`: the upstream client and the `OddsSource` seam
//! - `domain`: upstream records and the normalized output model
//! - `services`: aggregation, output writing and the sync run

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use adapters::{OddsApiClient, OddsSource};
pub use config::AppConfig;
pub use domain::{Event, Game, OddsPayload, PlayerProps, ResultDocument};
pub use error::{OddsSyncError, Result};
pub use services::{aggregate, build_game, run_sync, AggregationOptions, SyncReport};
