//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Constraint violation extracted from a database error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConstraintViolation {
    /// A unique index rejected the write.
    Unique { constraint: String },
    /// A foreign key rejected the write.
    ForeignKey { constraint: String },
}

/// Pull the violated constraint out of a Diesel error, if there is one.
///
/// Repositories match on the result to translate the store-level guard into
/// their own duplicate/missing-reference variants before falling back to
/// [`map_basic_diesel_error`].
pub(super) fn constraint_violation(error: &DieselError) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    let constraint = info.constraint_name().unwrap_or("unknown").to_owned();
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(ConstraintViolation::Unique { constraint }),
        DatabaseErrorKind::ForeignKeyViolation => {
            Some(ConstraintViolation::ForeignKey { constraint })
        }
        _ => None,
    }
}

/// Map common Diesel error variants into query/connection constructors.
pub(super) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}
