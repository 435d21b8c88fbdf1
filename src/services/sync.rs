use chrono::NaiveDateTime;
use std::path::PathBuf;
use tracing::{error, info};

use super::aggregator::{aggregate_detailed, AggregationOptions};
use super::output::write_document;
use crate::adapters::OddsSource;
use crate::config::AppConfig;
use crate::error::Result;

/// What one sync run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub events_listed: usize,
    pub games_written: usize,
    pub events_skipped: usize,
    pub duplicate_events: usize,
    pub prop_lines: usize,
    pub output_path: PathBuf,
}

/// List events, aggregate their odds and overwrite the output file.
///
/// A failed event listing aborts before anything is written. Failed
/// per-event fetches only shrink the game list.
pub async fn run_sync<S>(
    source: &S,
    config: &AppConfig,
    generated_at: NaiveDateTime,
) -> Result<SyncReport>
where
    S: OddsSource + ?Sized,
{
    info!(
        "Starting odds sync: sport={} bookmaker={} markets={}",
        config.odds_api.sport,
        config.odds_api.bookmaker,
        config.odds_api.markets_param()
    );

    let events = source.list_events().await.map_err(|e| {
        error!(error = %e, "event listing failed, nothing written");
        e
    })?;
    info!("Listed {} events", events.len());

    let options = AggregationOptions::from_config(&config.odds_api);
    let aggregation = aggregate_detailed(&events, source, options, generated_at).await;
    let document = aggregation.document;

    let output_path = config.output.path.clone();
    write_document(&output_path, &document).await?;

    let report = SyncReport {
        events_listed: events.len(),
        games_written: document.games.len(),
        events_skipped: aggregation.skipped.len(),
        duplicate_events: aggregation.duplicates,
        prop_lines: document.games.iter().map(|g| g.prop_line_count()).sum(),
        output_path,
    };

    info!(
        "Sync complete: {} games ({} skipped) written to {}",
        report.games_written,
        report.events_skipped,
        report.output_path.display()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockOddsSource;
    use crate::domain::{Event, EventId, OddsPayload, ResultDocument};
    use crate::error::OddsSyncError;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    fn config_with_output(path: PathBuf) -> AppConfig {
        let mut config = AppConfig::default();
        config.odds_api.api_key = "test".to_string();
        config.output.path = path;
        config
    }

    #[tokio::test]
    async fn test_listing_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nba_data.json");

        let mut source = MockOddsSource::new();
        source.expect_list_events().times(1).returning(|| {
            Err(OddsSyncError::UpstreamStatus {
                status: 500,
                endpoint: "sports/basketball_nba/events".to_string(),
            })
        });
        source.expect_fetch_event_odds().never();

        let err = run_sync(&source, &config_with_output(path.clone()), ts())
            .await
            .unwrap_err();
        assert_eq!(err.upstream_status(), Some(500));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_report_counts_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nba_data.json");

        let mut source = MockOddsSource::new();
        source.expect_list_events().times(1).returning(|| {
            Ok(vec![
                Event {
                    id: EventId::from("ok"),
                    home_team: Some("Thunder".to_string()),
                    away_team: Some("Grizzlies".to_string()),
                    commence_time: Some("2026-10-23T00:00:00Z".to_string()),
                },
                Event {
                    id: EventId::from("bad"),
                    home_team: Some("Pistons".to_string()),
                    away_team: Some("Cavaliers".to_string()),
                    commence_time: Some("2026-10-23T00:00:00Z".to_string()),
                },
            ])
        });
        source.expect_fetch_event_odds().times(2).returning(|event| {
            if event.id.as_str() == "bad" {
                Err(OddsSyncError::UpstreamStatus {
                    status: 422,
                    endpoint: "sports/basketball_nba/events/bad/odds".to_string(),
                })
            } else {
                Ok(OddsPayload::default())
            }
        });

        let report = run_sync(&source, &config_with_output(path.clone()), ts())
            .await
            .unwrap();
        assert_eq!(report.events_listed, 2);
        assert_eq!(report.games_written, 1);
        assert_eq!(report.events_skipped, 1);
        assert_eq!(report.output_path, path);

        let written: ResultDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.last_updated, ts());
        assert_eq!(written.games.len(), 1);
        assert_eq!(written.games[0].id.as_str(), "ok");
    }

    #[tokio::test]
    async fn test_empty_listing_still_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nba_data.json");

        let mut source = MockOddsSource::new();
        source.expect_list_events().returning(|| Ok(Vec::new()));

        let report = run_sync(&source, &config_with_output(path.clone()), ts())
            .await
            .unwrap();
        assert_eq!(report.games_written, 0);
        assert!(path.exists());
    }
}
