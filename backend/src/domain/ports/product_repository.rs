//! Port for product persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewProduct, Product, ProductId, ProductPatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product repository query failed: {message}",
        /// The author foreign key rejected the insert.
        AuthorMissing { author_id: String } => "author {author_id} does not exist",
    }
}

/// Port for reading and writing product rows.
///
/// `list_local*` methods return only locally-made products
/// (`is_made_in_my = true`), newest first; `list_by_author` ignores the flag.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product under the given id and return the stored row.
    async fn insert(
        &self,
        id: ProductId,
        draft: &NewProduct,
    ) -> Result<Product, ProductRepositoryError>;

    /// Fetch a product by identifier.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Check whether a product id exists.
    async fn exists(&self, id: &ProductId) -> Result<bool, ProductRepositoryError>;

    /// All locally-made products, newest first.
    async fn list_local(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Locally-made products whose location exactly equals the input.
    async fn list_local_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Locally-made products whose tag list overlaps the input (any shared
    /// tag matches). Callers handle the empty-input case; an empty list here
    /// matches nothing.
    async fn list_local_by_tags(
        &self,
        tags: &[String],
    ) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Every product by the author, newest first, regardless of the
    /// locally-made flag.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Apply a sparse update and return the stored row post-merge, or `None`
    /// when the id is unknown. Callers must not pass an empty patch.
    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError>;
}
