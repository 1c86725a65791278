//! User account domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{UserAccounts, UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserPatch};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

/// Account service implementing the [`UserAccounts`] driving port.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new service with the user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserAccounts for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, draft: NewUser) -> Result<User, Error> {
        // Fast-path check for a friendlier error; the unique constraint on
        // email remains the authoritative guard when registrations race.
        if self
            .users
            .email_in_use(draft.email())
            .await
            .map_err(map_repository_error)?
        {
            return Err(Error::conflict(format!(
                "email {} is already registered",
                draft.email()
            )));
        }

        self.users
            .insert(UserId::random(), &draft)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, Error> {
        if patch.is_empty() {
            // No fields present: a no-op that still reports unknown ids.
            return self
                .users
                .find_by_id(&id)
                .await
                .map_err(map_repository_error)?
                .ok_or_else(|| Error::not_found(format!("user {id} not found")));
        }

        self.users
            .update(&id, &patch)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
