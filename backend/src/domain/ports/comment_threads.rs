//! Driving port for product comment threads.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, Error, NewComment, ProductId};

/// Use-cases exposed to inbound adapters for comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentThreads: Send + Sync {
    /// Post a comment. Fails with not-found when the author or product is
    /// unknown.
    async fn post(&self, draft: NewComment) -> Result<Comment, Error>;

    /// Comments on a product, newest first. Unknown products yield an empty
    /// list.
    async fn list_for_product(&self, product: ProductId) -> Result<Vec<Comment>, Error>;

    /// Replace a comment's content and return the stored row post-update.
    async fn edit(&self, id: CommentId, content: String) -> Result<Comment, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCommentThreads;

#[async_trait]
impl CommentThreads for FixtureCommentThreads {
    async fn post(&self, _draft: NewComment) -> Result<Comment, Error> {
        Err(Error::service_unavailable("comment store not configured"))
    }

    async fn list_for_product(&self, _product: ProductId) -> Result<Vec<Comment>, Error> {
        Ok(Vec::new())
    }

    async fn edit(&self, id: CommentId, _content: String) -> Result<Comment, Error> {
        Err(Error::not_found(format!("comment {id} not found")))
    }
}
