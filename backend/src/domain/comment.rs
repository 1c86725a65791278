//! Comment model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::define_entity_id;
use super::product::ProductId;
use super::user::UserId;

define_entity_id! {
    /// Stable comment identifier.
    CommentId
}

/// Validation errors raised by the comment input constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyContent,
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content must not be empty"),
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// A comment on a product.
///
/// ## Invariants
/// - `author_id` and `product_id` reference existing rows and never change.
/// - `created_at` is assigned by the store; edits replace `content` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author_id: UserId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

/// Validate replacement or initial comment content.
pub fn validate_comment_content(content: String) -> Result<String, CommentValidationError> {
    if content.trim().is_empty() {
        return Err(CommentValidationError::EmptyContent);
    }
    Ok(content)
}

/// Validated draft for posting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    content: String,
    author_id: UserId,
    product_id: ProductId,
}

impl NewComment {
    /// Validate comment input into a draft.
    pub fn try_new(
        content: impl Into<String>,
        author_id: UserId,
        product_id: ProductId,
    ) -> Result<Self, CommentValidationError> {
        Ok(Self {
            content: validate_comment_content(content.into())?,
            author_id,
            product_id,
        })
    }

    /// Comment body.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Commenting user.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Commented product.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn draft_rejects_blank_content() {
        let result = NewComment::try_new("  \n ", UserId::random(), ProductId::random());
        assert_eq!(result, Err(CommentValidationError::EmptyContent));
    }

    #[test]
    fn content_validation_keeps_original_text() {
        let content = validate_comment_content("  tried it, sedap!".to_owned())
            .expect("non-empty content");
        assert_eq!(content, "  tried it, sedap!");
    }
}
