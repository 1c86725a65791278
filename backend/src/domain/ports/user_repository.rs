//! Port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email constraint rejected the insert.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Port for reading and writing user rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user under the given id and return the stored row.
    ///
    /// The store assigns `created_at`; a duplicate email surfaces as
    /// [`UserRepositoryError::DuplicateEmail`] even when the caller's
    /// pre-check raced with a concurrent registration.
    async fn insert(&self, id: UserId, draft: &NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Check whether an email address is already registered.
    async fn email_in_use(&self, email: &EmailAddress) -> Result<bool, UserRepositoryError>;

    /// Check whether a user id exists.
    async fn exists(&self, id: &UserId) -> Result<bool, UserRepositoryError>;

    /// Apply a sparse update and return the stored row post-merge, or `None`
    /// when the id is unknown. Callers must not pass an empty patch.
    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserRepositoryError>;
}
