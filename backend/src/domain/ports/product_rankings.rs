//! Driving port for vote-aggregated product rankings.

use async_trait::async_trait;

use crate::domain::{Error, ProductWithVotes, Timeframe, UserId};

/// Use-cases exposed to inbound adapters for ranked product views.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRankings: Send + Sync {
    /// Locally-made products with all-time vote counts, most-voted first and
    /// newest first among ties. When a viewer is supplied, `user_voted`
    /// reflects whether that viewer has voted for each product.
    async fn with_votes(&self, viewer: Option<UserId>) -> Result<Vec<ProductWithVotes>, Error>;

    /// Locally-made products ranked by votes cast inside the trailing
    /// window. Products without recent votes still appear with a count of
    /// zero; `user_voted` is always unset in this view.
    async fn trending(&self, timeframe: Timeframe) -> Result<Vec<ProductWithVotes>, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductRankings;

#[async_trait]
impl ProductRankings for FixtureProductRankings {
    async fn with_votes(&self, _viewer: Option<UserId>) -> Result<Vec<ProductWithVotes>, Error> {
        Ok(Vec::new())
    }

    async fn trending(&self, _timeframe: Timeframe) -> Result<Vec<ProductWithVotes>, Error> {
        Ok(Vec::new())
    }
}
