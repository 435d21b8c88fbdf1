use thiserror::Error;

/// Main error type for the odds sync
#[derive(Error, Debug)]
pub enum OddsSyncError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {endpoint}")]
    UpstreamStatus { status: u16, endpoint: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OddsSyncError {
    /// Status code reported by the upstream API, if this error carries one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            OddsSyncError::UpstreamStatus { status, .. } => Some(*status),
            OddsSyncError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for OddsSyncError
pub type Result<T> = std::result::Result<T, OddsSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_exposed() {
        let err = OddsSyncError::UpstreamStatus {
            status: 429,
            endpoint: "sports/basketball_nba/events".to_string(),
        };
        assert_eq!(err.upstream_status(), Some(429));
        assert_eq!(
            err.to_string(),
            "Upstream returned 429 for sports/basketball_nba/events"
        );
    }

    #[test]
    fn keeps_variant_behind_startup_context() {
        use anyhow::Context;

        let failed: Result<()> = Err(OddsSyncError::UpstreamStatus {
            status: 401,
            endpoint: "sports/basketball_nba/events".to_string(),
        });
        let err = failed.context("Odds sync failed").unwrap_err();

        assert_eq!(err.to_string(), "Odds sync failed");
        let inner = err.downcast_ref::<OddsSyncError>().unwrap();
        assert_eq!(inner.upstream_status(), Some(401));
    }

    #[test]
    fn validation_has_no_status() {
        let err = OddsSyncError::Validation("api_key is empty".into());
        assert_eq!(err.upstream_status(), None);
    }
}
