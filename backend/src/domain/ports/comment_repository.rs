//! Port for comment persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, ProductId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// A foreign key rejected the insert.
        MissingReference { constraint: String } =>
            "comment references a missing row ({constraint})",
    }
}

/// Port for reading and writing comment rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a comment under the given id and return the stored row.
    async fn insert(
        &self,
        id: CommentId,
        draft: &NewComment,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Comments on a product, newest first.
    async fn list_by_product(
        &self,
        product: &ProductId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Replace a comment's content and return the stored row post-update, or
    /// `None` when the id is unknown.
    async fn update_content(
        &self,
        id: &CommentId,
        content: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError>;
}
