//! PostgreSQL-backed `VoteRepository` implementation using Diesel ORM.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, exists};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{VoteRepository, VoteRepositoryError};
use crate::domain::{ProductId, UserId, Vote, VoteId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_pool_error,
};
use super::models::{NewVoteRow, VoteRow};
use super::pool::{DbPool, PoolError};
use super::schema::votes;

/// Diesel-backed implementation of the vote repository port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> VoteRepositoryError {
    map_pool_error(error, |message| VoteRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> VoteRepositoryError {
    map_basic_diesel_error(
        error,
        VoteRepositoryError::query,
        VoteRepositoryError::connection,
    )
}

/// Insert-specific mapping: the unique pair index reports as a duplicate
/// vote, foreign keys as missing references.
fn map_insert_error(
    error: diesel::result::Error,
    user: &UserId,
    product: &ProductId,
) -> VoteRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { .. }) => {
            VoteRepositoryError::duplicate_vote(user.to_string(), product.to_string())
        }
        Some(ConstraintViolation::ForeignKey { constraint }) => {
            VoteRepositoryError::missing_reference(constraint)
        }
        None => map_diesel(error),
    }
}

fn row_to_vote(row: VoteRow) -> Vote {
    let VoteRow {
        id,
        user_id,
        product_id,
        created_at,
    } = row;

    Vote {
        id: VoteId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        product_id: ProductId::from_uuid(product_id),
        created_at,
    }
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn insert(
        &self,
        id: VoteId,
        user: &UserId,
        product: &ProductId,
    ) -> Result<Vote, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewVoteRow {
            id: *id.as_uuid(),
            user_id: *user.as_uuid(),
            product_id: *product.as_uuid(),
        };

        let row = diesel::insert_into(votes::table)
            .values(&new_row)
            .returning(VoteRow::as_returning())
            .get_result::<VoteRow>(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, user, product))?;

        Ok(row_to_vote(row))
    }

    async fn delete(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<bool, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let removed = diesel::delete(
            votes::table.filter(
                votes::user_id
                    .eq(user.as_uuid())
                    .and(votes::product_id.eq(product.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        Ok(removed > 0)
    }

    async fn exists(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<bool, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(exists(
            votes::table.filter(
                votes::user_id
                    .eq(user.as_uuid())
                    .and(votes::product_id.eq(product.as_uuid())),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel)
    }

    async fn counts_by_product(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<HashMap<ProductId, i64>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<(Uuid, i64)> = match since {
            Some(cutoff) => {
                votes::table
                    .filter(votes::created_at.ge(cutoff))
                    .group_by(votes::product_id)
                    .select((votes::product_id, count_star()))
                    .load(&mut conn)
                    .await
            }
            None => {
                votes::table
                    .group_by(votes::product_id)
                    .select((votes::product_id, count_star()))
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel)?;

        Ok(rows
            .into_iter()
            .map(|(product_id, count)| (ProductId::from_uuid(product_id), count))
            .collect())
    }

    async fn voted_product_ids(
        &self,
        user: &UserId,
    ) -> Result<HashSet<ProductId>, VoteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let ids: Vec<Uuid> = votes::table
            .filter(votes::user_id.eq(user.as_uuid()))
            .select(votes::product_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(ids.into_iter().map(ProductId::from_uuid).collect())
    }
}
