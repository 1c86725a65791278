//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentId, NewComment, ProductId, UserId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_pool_error,
};
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the comment repository port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CommentRepositoryError {
    map_pool_error(error, |message| CommentRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

/// Insert-specific mapping: foreign keys report as missing references.
fn map_insert_error(error: diesel::result::Error) -> CommentRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey { constraint }) => {
            CommentRepositoryError::missing_reference(constraint)
        }
        _ => map_diesel(error),
    }
}

fn row_to_comment(row: CommentRow) -> Comment {
    let CommentRow {
        id,
        content,
        author_id,
        product_id,
        created_at,
    } = row;

    Comment {
        id: CommentId::from_uuid(id),
        content,
        author_id: UserId::from_uuid(author_id),
        product_id: ProductId::from_uuid(product_id),
        created_at,
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn insert(
        &self,
        id: CommentId,
        draft: &NewComment,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewCommentRow {
            id: *id.as_uuid(),
            content: draft.content(),
            author_id: *draft.author_id().as_uuid(),
            product_id: *draft.product_id().as_uuid(),
        };

        let row = diesel::insert_into(comments::table)
            .values(&new_row)
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(&mut conn)
            .await
            .map_err(map_insert_error)?;

        Ok(row_to_comment(row))
    }

    async fn list_by_product(
        &self,
        product: &ProductId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<CommentRow> = comments::table
            .filter(comments::product_id.eq(product.as_uuid()))
            .order((comments::created_at.desc(), comments::id.desc()))
            .select(CommentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows.into_iter().map(row_to_comment).collect())
    }

    async fn update_content(
        &self,
        id: &CommentId,
        content: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(comments::table.filter(comments::id.eq(id.as_uuid())))
            .set(comments::content.eq(content))
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(row_to_comment))
    }
}
