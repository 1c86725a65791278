//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserPatch};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_pool_error,
};
use super::models::{NewUserRow, UserChangeset, UserRow, nullable_text};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, |message| UserRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Insert-specific mapping: the unique email index reports as a conflict.
fn map_insert_error(error: diesel::result::Error, email: &EmailAddress) -> UserRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { .. }) => {
            UserRepositoryError::duplicate_email(email.as_ref())
        }
        _ => map_diesel(error),
    }
}

/// Convert a database row into the domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let UserRow {
        id,
        name,
        email,
        avatar_url,
        location,
        created_at,
    } = row;

    let email =
        EmailAddress::new(email).map_err(|err| UserRepositoryError::query(err.to_string()))?;

    Ok(User {
        id: UserId::from_uuid(id),
        name,
        email,
        avatar_url,
        location,
        created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, id: UserId, draft: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewUserRow {
            id: *id.as_uuid(),
            name: draft.name(),
            email: draft.email().as_ref(),
            avatar_url: draft.avatar_url(),
            location: draft.location(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, draft.email()))?;

        row_to_user(row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_user).transpose()
    }

    async fn email_in_use(&self, email: &EmailAddress) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel)
    }

    async fn exists(&self, id: &UserId) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(exists(users::table.filter(users::id.eq(id.as_uuid()))))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changes = UserChangeset {
            name: patch.name(),
            avatar_url: nullable_text(patch.avatar_url()),
            location: nullable_text(patch.location()),
        };

        let row = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_user).transpose()
    }
}
