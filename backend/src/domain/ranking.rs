//! Vote-aggregated product views.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::product::Product;

/// A product annotated with vote aggregates.
///
/// `user_voted` is `None` when no viewer was supplied (anonymous caller) and
/// a definite boolean when one was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithVotes {
    #[serde(flatten)]
    pub product: Product,
    pub vote_count: i64,
    pub user_voted: Option<bool>,
}

/// Trailing window for trending rankings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Trailing 24 hours.
    #[default]
    Daily,
    /// Trailing 7 days.
    Weekly,
}

impl Timeframe {
    /// Length of the trailing window.
    pub fn window(self) -> Duration {
        match self {
            Self::Daily => Duration::hours(24),
            Self::Weekly => Duration::days(7),
        }
    }
}

/// Error raised when parsing an unknown timeframe token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timeframe must be daily or weekly, got {}", self.0)
    }
}

impl std::error::Error for TimeframeParseError {}

impl std::str::FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            other => Err(TimeframeParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn default_timeframe_is_daily() {
        assert_eq!(Timeframe::default(), Timeframe::Daily);
    }

    #[test]
    fn window_lengths_are_a_day_and_a_week() {
        assert_eq!(Timeframe::Daily.window(), Duration::hours(24));
        assert_eq!(Timeframe::Weekly.window(), Duration::days(7));
    }

    #[test]
    fn parses_known_tokens_only() {
        assert_eq!("daily".parse::<Timeframe>(), Ok(Timeframe::Daily));
        assert_eq!("weekly".parse::<Timeframe>(), Ok(Timeframe::Weekly));
        assert!("monthly".parse::<Timeframe>().is_err());
        assert!("Daily".parse::<Timeframe>().is_err());
    }
}
