//! Driving port for product catalogue operations.

use async_trait::async_trait;

use crate::domain::{Error, NewProduct, Product, ProductId, ProductPatch, UserId};

/// Use-cases exposed to inbound adapters for product submission and listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCatalogue: Send + Sync {
    /// Submit a new product. Fails with not-found when the author is unknown.
    async fn submit(&self, draft: NewProduct) -> Result<Product, Error>;

    /// Look up a product by id; absence is `None`, never an error.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, Error>;

    /// All locally-made products, newest first.
    async fn list(&self) -> Result<Vec<Product>, Error>;

    /// Locally-made products whose location exactly equals the input.
    async fn list_by_location(&self, location: String) -> Result<Vec<Product>, Error>;

    /// Locally-made products sharing at least one tag with the input. An
    /// empty input applies no tag filter.
    async fn list_by_tags(&self, tags: Vec<String>) -> Result<Vec<Product>, Error>;

    /// Every product by the author, newest first, regardless of the
    /// locally-made flag.
    async fn list_by_author(&self, author: UserId) -> Result<Vec<Product>, Error>;

    /// Apply a sparse update and return the stored product post-merge.
    async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, Error>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductCatalogue;

#[async_trait]
impl ProductCatalogue for FixtureProductCatalogue {
    async fn submit(&self, _draft: NewProduct) -> Result<Product, Error> {
        Err(Error::service_unavailable("product store not configured"))
    }

    async fn get(&self, _id: ProductId) -> Result<Option<Product>, Error> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<Product>, Error> {
        Ok(Vec::new())
    }

    async fn list_by_location(&self, _location: String) -> Result<Vec<Product>, Error> {
        Ok(Vec::new())
    }

    async fn list_by_tags(&self, _tags: Vec<String>) -> Result<Vec<Product>, Error> {
        Ok(Vec::new())
    }

    async fn list_by_author(&self, _author: UserId) -> Result<Vec<Product>, Error> {
        Ok(Vec::new())
    }

    async fn update(&self, id: ProductId, _patch: ProductPatch) -> Result<Product, Error> {
        Err(Error::not_found(format!("product {id} not found")))
    }
}
