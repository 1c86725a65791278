//! Vote model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::define_entity_id;
use super::product::ProductId;
use super::user::UserId;

define_entity_id! {
    /// Stable vote identifier.
    VoteId
}

/// A user's vote on a product.
///
/// ## Invariants
/// - At most one vote exists per `(user_id, product_id)` pair; the store's
///   unique constraint enforces this under concurrency.
/// - Retracting and re-voting creates a new row with a fresh timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: VoteId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}
