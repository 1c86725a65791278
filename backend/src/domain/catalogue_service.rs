//! Product catalogue domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    ProductCatalogue, ProductRepository, ProductRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{NewProduct, Product, ProductId, ProductPatch, UserId};

fn map_product_repository_error(error: ProductRepositoryError) -> Error {
    match error {
        ProductRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("product repository unavailable: {message}"))
        }
        ProductRepositoryError::Query { message } => {
            Error::internal(format!("product repository error: {message}"))
        }
        ProductRepositoryError::AuthorMissing { author_id } => {
            Error::not_found(format!("author {author_id} not found"))
        }
    }
}

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        // DuplicateEmail cannot arise from an existence check; treat it like
        // any other query failure.
        other => Error::internal(format!("user repository error: {other}")),
    }
}

/// Catalogue service implementing the [`ProductCatalogue`] driving port.
#[derive(Clone)]
pub struct CatalogueService<P, U> {
    products: Arc<P>,
    users: Arc<U>,
}

impl<P, U> CatalogueService<P, U> {
    /// Create a new service with the product and user repositories.
    pub fn new(products: Arc<P>, users: Arc<U>) -> Self {
        Self { products, users }
    }
}

#[async_trait]
impl<P, U> ProductCatalogue for CatalogueService<P, U>
where
    P: ProductRepository,
    U: UserRepository,
{
    async fn submit(&self, draft: NewProduct) -> Result<Product, Error> {
        // Fast-path check for a friendlier error; the foreign key remains the
        // authoritative guard.
        if !self
            .users
            .exists(draft.author_id())
            .await
            .map_err(map_user_repository_error)?
        {
            return Err(Error::not_found(format!(
                "author {} not found",
                draft.author_id()
            )));
        }

        self.products
            .insert(ProductId::random(), &draft)
            .await
            .map_err(map_product_repository_error)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, Error> {
        self.products
            .find_by_id(&id)
            .await
            .map_err(map_product_repository_error)
    }

    async fn list(&self) -> Result<Vec<Product>, Error> {
        self.products
            .list_local()
            .await
            .map_err(map_product_repository_error)
    }

    async fn list_by_location(&self, location: String) -> Result<Vec<Product>, Error> {
        self.products
            .list_local_by_location(&location)
            .await
            .map_err(map_product_repository_error)
    }

    async fn list_by_tags(&self, tags: Vec<String>) -> Result<Vec<Product>, Error> {
        // An empty tag list means "no tag filter", not "match nothing".
        if tags.is_empty() {
            return self.list().await;
        }

        self.products
            .list_local_by_tags(&tags)
            .await
            .map_err(map_product_repository_error)
    }

    async fn list_by_author(&self, author: UserId) -> Result<Vec<Product>, Error> {
        self.products
            .list_by_author(&author)
            .await
            .map_err(map_product_repository_error)
    }

    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, Error> {
        if patch.is_empty() {
            return self
                .products
                .find_by_id(&id)
                .await
                .map_err(map_product_repository_error)?
                .ok_or_else(|| Error::not_found(format!("product {id} not found")));
        }

        self.products
            .update(&id, &patch)
            .await
            .map_err(map_product_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product {id} not found")))
    }
}

#[cfg(test)]
#[path = "catalogue_service_tests.rs"]
mod tests;
