//! Vote casting domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    ProductRepository, ProductRepositoryError, UserRepository, UserRepositoryError, VoteCasting,
    VoteRepository, VoteRepositoryError,
};
use crate::domain::{ProductId, UserId, Vote, VoteId};

fn map_vote_repository_error(error: VoteRepositoryError) -> Error {
    match error {
        VoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vote repository unavailable: {message}"))
        }
        VoteRepositoryError::Query { message } => {
            Error::internal(format!("vote repository error: {message}"))
        }
        VoteRepositoryError::DuplicateVote {
            user_id,
            product_id,
        } => Error::conflict(format!(
            "user {user_id} has already voted for product {product_id}"
        )),
        VoteRepositoryError::MissingReference { constraint } => {
            Error::not_found(format!("vote references a missing row ({constraint})"))
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_product_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        other => Error::internal(format!("product repository error: {other}")),
    }
}

/// Voting service implementing the [`VoteCasting`] driving port.
#[derive(Clone)]
pub struct VotingService<V, U, P> {
    votes: Arc<V>,
    users: Arc<U>,
    products: Arc<P>,
}

impl<V, U, P> VotingService<V, U, P> {
    /// Create a new service with the vote, user, and product repositories.
    pub fn new(votes: Arc<V>, users: Arc<U>, products: Arc<P>) -> Self {
        Self {
            votes,
            users,
            products,
        }
    }
}

#[async_trait]
impl<V, U, P> VoteCasting for VotingService<V, U, P>
where
    V: VoteRepository,
    U: UserRepository,
    P: ProductRepository,
{
    async fn cast(&self, user: UserId, product: ProductId) -> Result<Vote, Error> {
        // Friendly pre-checks; the unique and foreign-key constraints stay
        // authoritative when concurrent requests race past these reads.
        if !self
            .users
            .exists(&user)
            .await
            .map_err(map_user_repository_error)?
        {
            return Err(Error::not_found(format!("user {user} not found")));
        }
        if !self
            .products
            .exists(&product)
            .await
            .map_err(map_product_repository_error)?
        {
            return Err(Error::not_found(format!("product {product} not found")));
        }
        if self
            .votes
            .exists(&user, &product)
            .await
            .map_err(map_vote_repository_error)?
        {
            return Err(Error::conflict(format!(
                "user {user} has already voted for product {product}"
            )));
        }

        self.votes
            .insert(VoteId::random(), &user, &product)
            .await
            .map_err(map_vote_repository_error)
    }

    async fn retract(&self, user: UserId, product: ProductId) -> Result<bool, Error> {
        self.votes
            .delete(&user, &product)
            .await
            .map_err(map_vote_repository_error)
    }
}

#[cfg(test)]
#[path = "voting_service_tests.rs"]
mod tests;
