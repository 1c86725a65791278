//! Port for vote persistence adapters and their errors.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ProductId, UserId, Vote, VoteId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vote repository adapters.
    pub enum VoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
        /// The unique (user, product) constraint rejected the insert.
        DuplicateVote { user_id: String, product_id: String } =>
            "user {user_id} has already voted for product {product_id}",
        /// A foreign key rejected the insert.
        MissingReference { constraint: String } =>
            "vote references a missing row ({constraint})",
    }
}

/// Port for reading and writing vote rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Persist a vote under the given id and return the stored row.
    ///
    /// A concurrent duplicate surfaces as
    /// [`VoteRepositoryError::DuplicateVote`]; the unique constraint is the
    /// authoritative guard, not the caller's pre-check.
    async fn insert(
        &self,
        id: VoteId,
        user: &UserId,
        product: &ProductId,
    ) -> Result<Vote, VoteRepositoryError>;

    /// Delete the vote for the exact pair. Returns whether a row was removed.
    async fn delete(&self, user: &UserId, product: &ProductId)
    -> Result<bool, VoteRepositoryError>;

    /// Check whether the pair already has a vote.
    async fn exists(&self, user: &UserId, product: &ProductId)
    -> Result<bool, VoteRepositoryError>;

    /// Vote counts per product, optionally restricted to votes created at or
    /// after `since`. Products without matching votes are absent from the map.
    async fn counts_by_product(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<HashMap<ProductId, i64>, VoteRepositoryError>;

    /// Ids of every product the user has voted for.
    async fn voted_product_ids(
        &self,
        user: &UserId,
    ) -> Result<HashSet<ProductId>, VoteRepositoryError>;
}
