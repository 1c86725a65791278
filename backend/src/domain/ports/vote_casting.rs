//! Driving port for casting and retracting votes.

use async_trait::async_trait;

use crate::domain::{Error, ProductId, UserId, Vote};

/// Use-cases exposed to inbound adapters for voting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCasting: Send + Sync {
    /// Cast a vote for a product. Fails with a conflict when the pair already
    /// has one, and not-found when either reference is unknown.
    async fn cast(&self, user: UserId, product: ProductId) -> Result<Vote, Error>;

    /// Retract the vote for the pair. Returns whether a row was removed;
    /// retracting an absent vote is a no-op, not an error.
    async fn retract(&self, user: UserId, product: ProductId) -> Result<bool, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVoteCasting;

#[async_trait]
impl VoteCasting for FixtureVoteCasting {
    async fn cast(&self, _user: UserId, _product: ProductId) -> Result<Vote, Error> {
        Err(Error::service_unavailable("vote store not configured"))
    }

    async fn retract(&self, _user: UserId, _product: ProductId) -> Result<bool, Error> {
        Ok(false)
    }
}
