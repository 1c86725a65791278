//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{NewProduct, Product, ProductId, ProductPatch, UserId};

use super::diesel_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_pool_error,
};
use super::models::{NewProductRow, ProductChangeset, ProductRow, nullable_text};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the product repository port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ProductRepositoryError {
    map_pool_error(error, |message| ProductRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> ProductRepositoryError {
    map_basic_diesel_error(
        error,
        ProductRepositoryError::query,
        ProductRepositoryError::connection,
    )
}

/// Insert-specific mapping: the author foreign key reports as a missing
/// author.
fn map_insert_error(error: diesel::result::Error, author: &UserId) -> ProductRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::ForeignKey { .. }) => {
            ProductRepositoryError::author_missing(author.to_string())
        }
        _ => map_diesel(error),
    }
}

/// Convert a database row into the domain product.
fn row_to_product(row: ProductRow) -> Product {
    let ProductRow {
        id,
        title,
        description,
        url,
        tags,
        location,
        is_made_in_my,
        created_at,
        author_id,
    } = row;

    Product {
        id: ProductId::from_uuid(id),
        title,
        description,
        url,
        tags,
        location,
        is_made_in_my,
        created_at,
        author_id: UserId::from_uuid(author_id),
    }
}

fn rows_to_products(rows: Vec<ProductRow>) -> Vec<Product> {
    rows.into_iter().map(row_to_product).collect()
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn insert(
        &self,
        id: ProductId,
        draft: &NewProduct,
    ) -> Result<Product, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let new_row = NewProductRow {
            id: *id.as_uuid(),
            title: draft.title(),
            description: draft.description(),
            url: draft.url(),
            tags: draft.tags(),
            location: draft.location(),
            is_made_in_my: draft.is_made_in_my(),
            author_id: *draft.author_id().as_uuid(),
        };

        let row = diesel::insert_into(products::table)
            .values(&new_row)
            .returning(ProductRow::as_returning())
            .get_result::<ProductRow>(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, draft.author_id()))?;

        Ok(row_to_product(row))
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = products::table
            .filter(products::id.eq(id.as_uuid()))
            .select(ProductRow::as_select())
            .first::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(row_to_product))
    }

    async fn exists(&self, id: &ProductId) -> Result<bool, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::select(exists(
            products::table.filter(products::id.eq(id.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel)
    }

    async fn list_local(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ProductRow> = products::table
            .filter(products::is_made_in_my.eq(true))
            .order((products::created_at.desc(), products::id.desc()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows_to_products(rows))
    }

    async fn list_local_by_location(
        &self,
        location: &str,
    ) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ProductRow> = products::table
            .filter(
                products::is_made_in_my
                    .eq(true)
                    .and(products::location.eq(location)),
            )
            .order((products::created_at.desc(), products::id.desc()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows_to_products(rows))
    }

    async fn list_local_by_tags(
        &self,
        tags: &[String],
    ) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ProductRow> = products::table
            .filter(
                products::is_made_in_my
                    .eq(true)
                    .and(products::tags.overlaps_with(tags)),
            )
            .order((products::created_at.desc(), products::id.desc()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows_to_products(rows))
    }

    async fn list_by_author(
        &self,
        author: &UserId,
    ) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<ProductRow> = products::table
            .filter(products::author_id.eq(author.as_uuid()))
            .order((products::created_at.desc(), products::id.desc()))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(rows_to_products(rows))
    }

    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let changes = ProductChangeset {
            title: patch.title(),
            description: patch.description(),
            url: patch.url(),
            tags: patch.tags(),
            location: nullable_text(patch.location()),
            is_made_in_my: patch.is_made_in_my(),
        };

        let row = diesel::update(products::table.filter(products::id.eq(id.as_uuid())))
            .set(&changes)
            .returning(ProductRow::as_returning())
            .get_result::<ProductRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(row.map(row_to_product))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[rstest]
    fn foreign_key_violation_maps_to_missing_author() {
        let author = UserId::random();
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("violates foreign key constraint".to_owned()),
        );
        let repo_err = map_insert_error(diesel_err, &author);
        assert_eq!(
            repo_err,
            ProductRepositoryError::author_missing(author.to_string())
        );
    }

    #[rstest]
    fn other_insert_errors_stay_query_errors() {
        let repo_err = map_insert_error(DieselError::NotFound, &UserId::random());
        assert!(matches!(repo_err, ProductRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_preserves_fields() {
        let row = ProductRow {
            id: Uuid::new_v4(),
            title: "Kopi Kita".to_owned(),
            description: "Single-origin coffee".to_owned(),
            url: "https://kopikita.example.com".to_owned(),
            tags: vec!["coffee".to_owned()],
            location: None,
            is_made_in_my: true,
            created_at: Utc::now(),
            author_id: Uuid::new_v4(),
        };
        let product = row_to_product(row.clone());
        assert_eq!(product.id.as_uuid(), &row.id);
        assert_eq!(product.author_id.as_uuid(), &row.author_id);
        assert_eq!(product.tags, vec!["coffee".to_owned()]);
    }
}
