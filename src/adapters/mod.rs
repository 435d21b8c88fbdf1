pub mod odds_api;
pub mod source;

pub use odds_api::{OddsApiClient, QuotaUsage};
pub use source::OddsSource;

#[cfg(test)]
pub use source::MockOddsSource;
