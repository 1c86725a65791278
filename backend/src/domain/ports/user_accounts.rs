//! Driving port for user account operations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Use-cases exposed to inbound adapters for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Register a new user. Fails with a conflict when the email is taken.
    async fn register(&self, draft: NewUser) -> Result<User, Error>;

    /// Look up a user by id; absence is `None`, never an error.
    async fn get(&self, id: UserId) -> Result<Option<User>, Error>;

    /// Apply a sparse profile update and return the stored user post-merge.
    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserAccounts;

#[async_trait]
impl UserAccounts for FixtureUserAccounts {
    async fn register(&self, _draft: NewUser) -> Result<User, Error> {
        Err(Error::service_unavailable("user store not configured"))
    }

    async fn get(&self, _id: UserId) -> Result<Option<User>, Error> {
        Ok(None)
    }

    async fn update(&self, id: UserId, _patch: UserPatch) -> Result<User, Error> {
        Err(Error::not_found(format!("user {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use crate::domain::ErrorCode;

    use super::*;

    #[tokio::test]
    async fn fixture_get_returns_none() {
        let found = FixtureUserAccounts
            .get(UserId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_register_reports_unavailable_store() {
        let draft = NewUser::try_new("Ada", "ada@example.com", None, None).expect("valid draft");
        let error = FixtureUserAccounts
            .register(draft)
            .await
            .expect_err("no store behind the fixture");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
