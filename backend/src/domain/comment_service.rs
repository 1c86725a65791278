//! Comment thread domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, CommentThreads, ProductRepository,
    ProductRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Comment, CommentId, NewComment, ProductId};

fn map_comment_repository_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::MissingReference { constraint } => {
            Error::not_found(format!("comment references a missing row ({constraint})"))
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

fn map_product_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        other => Error::internal(format!("product repository error: {other}")),
    }
}

/// Comment service implementing the [`CommentThreads`] driving port.
#[derive(Clone)]
pub struct CommentService<C, U, P> {
    comments: Arc<C>,
    users: Arc<U>,
    products: Arc<P>,
}

impl<C, U, P> CommentService<C, U, P> {
    /// Create a new service with the comment, user, and product repositories.
    pub fn new(comments: Arc<C>, users: Arc<U>, products: Arc<P>) -> Self {
        Self {
            comments,
            users,
            products,
        }
    }
}

#[async_trait]
impl<C, U, P> CommentThreads for CommentService<C, U, P>
where
    C: CommentRepository,
    U: UserRepository,
    P: ProductRepository,
{
    async fn post(&self, draft: NewComment) -> Result<Comment, Error> {
        if !self
            .users
            .exists(draft.author_id())
            .await
            .map_err(map_user_repository_error)?
        {
            return Err(Error::not_found(format!(
                "user {} not found",
                draft.author_id()
            )));
        }
        if !self
            .products
            .exists(draft.product_id())
            .await
            .map_err(map_product_repository_error)?
        {
            return Err(Error::not_found(format!(
                "product {} not found",
                draft.product_id()
            )));
        }

        self.comments
            .insert(CommentId::random(), &draft)
            .await
            .map_err(map_comment_repository_error)
    }

    async fn list_for_product(&self, product: ProductId) -> Result<Vec<Comment>, Error> {
        self.comments
            .list_by_product(&product)
            .await
            .map_err(map_comment_repository_error)
    }

    async fn edit(&self, id: CommentId, content: String) -> Result<Comment, Error> {
        self.comments
            .update_content(&id, &content)
            .await
            .map_err(map_comment_repository_error)?
            .ok_or_else(|| Error::not_found(format!("comment {id} not found")))
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
