//! Vote-aggregated ranking domain service.
//!
//! Assembles ranked product views from the product and vote repositories.
//! The window cutoff for trending views comes from an injected clock so the
//! aggregation is testable against fixed instants.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::Error;
use crate::domain::ports::{
    ProductRankings, ProductRepository, ProductRepositoryError, VoteRepository,
    VoteRepositoryError,
};
use crate::domain::{Product, ProductId, ProductWithVotes, Timeframe, UserId};

fn map_product_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        other => Error::internal(format!("product repository error: {other}")),
    }
}

fn map_vote_repository_error(error: VoteRepositoryError) -> Error {
    match error {
        VoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vote repository unavailable: {message}"))
        }
        other => Error::internal(format!("vote repository error: {other}")),
    }
}

/// Join products with their vote counts and sort most-voted first, newest
/// first among ties. Products absent from the count map score zero.
fn rank(
    products: Vec<Product>,
    counts: &HashMap<ProductId, i64>,
    voted: Option<&HashSet<ProductId>>,
) -> Vec<ProductWithVotes> {
    let mut ranked: Vec<ProductWithVotes> = products
        .into_iter()
        .map(|product| {
            let vote_count = counts.get(&product.id).copied().unwrap_or(0);
            let user_voted = voted.map(|ids| ids.contains(&product.id));
            ProductWithVotes {
                product,
                vote_count,
                user_voted,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.vote_count
            .cmp(&a.vote_count)
            .then_with(|| b.product.created_at.cmp(&a.product.created_at))
    });
    ranked
}

/// Ranking service implementing the [`ProductRankings`] driving port.
#[derive(Clone)]
pub struct RankingService<P, V> {
    products: Arc<P>,
    votes: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<P, V> RankingService<P, V> {
    /// Create a new service with the product and vote repositories and the
    /// clock used for trending cutoffs.
    pub fn new(products: Arc<P>, votes: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            products,
            votes,
            clock,
        }
    }
}

impl<P, V> RankingService<P, V>
where
    P: ProductRepository,
    V: VoteRepository,
{
    async fn ranked_since(
        &self,
        since: Option<DateTime<Utc>>,
        viewer: Option<UserId>,
    ) -> Result<Vec<ProductWithVotes>, Error> {
        let products = self
            .products
            .list_local()
            .await
            .map_err(map_product_repository_error)?;
        let counts = self
            .votes
            .counts_by_product(since)
            .await
            .map_err(map_vote_repository_error)?;
        let voted = match viewer {
            Some(user) => Some(
                self.votes
                    .voted_product_ids(&user)
                    .await
                    .map_err(map_vote_repository_error)?,
            ),
            None => None,
        };

        Ok(rank(products, &counts, voted.as_ref()))
    }
}

#[async_trait]
impl<P, V> ProductRankings for RankingService<P, V>
where
    P: ProductRepository,
    V: VoteRepository,
{
    async fn with_votes(&self, viewer: Option<UserId>) -> Result<Vec<ProductWithVotes>, Error> {
        self.ranked_since(None, viewer).await
    }

    async fn trending(&self, timeframe: Timeframe) -> Result<Vec<ProductWithVotes>, Error> {
        let cutoff = self.clock.utc() - timeframe.window();
        self.ranked_since(Some(cutoff), None).await
    }
}

#[cfg(test)]
#[path = "ranking_service_tests.rs"]
mod tests;
