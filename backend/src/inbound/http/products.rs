//! Product catalogue and ranking HTTP handlers.
//!
//! ```text
//! POST  /api/v1/products
//! GET   /api/v1/products
//! GET   /api/v1/products/with-votes
//! GET   /api/v1/products/trending
//! GET   /api/v1/products/by-location
//! GET   /api/v1/products/by-tags
//! GET   /api/v1/products/by-author/{author_id}
//! GET   /api/v1/products/{id}
//! PATCH /api/v1/products/{id}
//! ```
//!
//! Literal segments (`with-votes`, `trending`, `by-*`) must be registered
//! before the `{id}` routes; see the server wiring.

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::product::ProductValidationError;
use crate::domain::{
    Error, FieldPatch, NewProduct, Product, ProductId, ProductPatch, ProductWithVotes, Timeframe,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id, parse_tag_list};

/// Request payload for submitting a product.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequestBody {
    pub title: String,
    pub description: String,
    pub url: String,
    /// Defaults to an empty list when omitted.
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<String>,
    /// Defaults to true when omitted.
    pub is_made_in_my: Option<bool>,
    #[schema(format = "uuid")]
    pub author_id: String,
}

/// Request payload for a sparse product update. Absent fields keep their
/// stored values; `location` accepts explicit `null` to clear.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequestBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// An empty list clears all tags.
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_keep")]
    #[schema(value_type = Option<String>)]
    pub location: FieldPatch<String>,
    pub is_made_in_my: Option<bool>,
}

/// Query parameters for the by-location listing.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    location: String,
}

/// Query parameters for the by-tags listing.
#[derive(Debug, Deserialize)]
pub struct TagsQuery {
    /// Comma-separated tags; omitted or empty means no tag filter.
    tags: Option<String>,
}

/// Query parameters for the vote-aggregated listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithVotesQuery {
    user_id: Option<String>,
}

/// Query parameters for the trending listing.
#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    timeframe: Option<String>,
}

fn map_product_validation_error(err: ProductValidationError) -> Error {
    match err {
        ProductValidationError::EmptyTitle => Error::invalid_request("title must not be empty")
            .with_details(json!({ "field": "title", "code": "empty_title" })),
        ProductValidationError::EmptyDescription => {
            Error::invalid_request("description must not be empty")
                .with_details(json!({ "field": "description", "code": "empty_description" }))
        }
        ProductValidationError::InvalidUrl => Error::invalid_request("url must be a valid URL")
            .with_details(json!({ "field": "url", "code": "invalid_url" })),
    }
}

/// Submit a new product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequestBody,
    responses(
        (status = 200, description = "Product submitted", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Author not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductRequestBody>,
) -> ApiResult<web::Json<Product>> {
    let body = payload.into_inner();
    let author_id: UserId = parse_id(&body.author_id, FieldName::new("authorId"))?;
    let draft = NewProduct::try_new(
        body.title,
        body.description,
        body.url,
        body.tags,
        body.location,
        body.is_made_in_my,
        author_id,
    )
    .map_err(map_product_validation_error)?;

    let product = state.catalogue.submit(draft).await?;
    Ok(web::Json(product))
}

/// List locally-made products, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Products, newest first", body = [Product])
    ),
    tags = ["products"],
    operation_id = "getProducts"
)]
#[get("/products")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Product>>> {
    let products = state.catalogue.list().await?;
    Ok(web::Json(products))
}

/// List products with all-time vote counts, most-voted first.
#[utoipa::path(
    get,
    path = "/api/v1/products/with-votes",
    params(
        ("userId" = Option<String>, Query,
         description = "Viewer whose votes populate userVoted")
    ),
    responses(
        (status = 200, description = "Ranked products", body = [ProductWithVotes]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProductsWithVotes"
)]
#[get("/products/with-votes")]
pub async fn products_with_votes(
    state: web::Data<HttpState>,
    query: web::Query<WithVotesQuery>,
) -> ApiResult<web::Json<Vec<ProductWithVotes>>> {
    let viewer = query
        .into_inner()
        .user_id
        .map(|raw| parse_id::<UserId>(&raw, FieldName::new("userId")))
        .transpose()?;

    let ranked = state.rankings.with_votes(viewer).await?;
    Ok(web::Json(ranked))
}

/// List products trending over a trailing window.
#[utoipa::path(
    get,
    path = "/api/v1/products/trending",
    params(
        ("timeframe" = Option<String>, Query,
         description = "daily (default) or weekly")
    ),
    responses(
        (status = 200, description = "Trending products", body = [ProductWithVotes]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["products"],
    operation_id = "getTrendingProducts"
)]
#[get("/products/trending")]
pub async fn trending_products(
    state: web::Data<HttpState>,
    query: web::Query<TrendingQuery>,
) -> ApiResult<web::Json<Vec<ProductWithVotes>>> {
    let timeframe = match query.into_inner().timeframe {
        Some(raw) => raw.parse::<Timeframe>().map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "timeframe",
                "value": raw,
                "code": "invalid_timeframe",
            }))
        })?,
        None => Timeframe::default(),
    };

    let ranked = state.rankings.trending(timeframe).await?;
    Ok(web::Json(ranked))
}

/// List locally-made products with an exact location match.
#[utoipa::path(
    get,
    path = "/api/v1/products/by-location",
    params(("location" = String, Query, description = "Exact, case-sensitive location")),
    responses(
        (status = 200, description = "Products at the location", body = [Product])
    ),
    tags = ["products"],
    operation_id = "getProductsByLocation"
)]
#[get("/products/by-location")]
pub async fn products_by_location(
    state: web::Data<HttpState>,
    query: web::Query<LocationQuery>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let products = state
        .catalogue
        .list_by_location(query.into_inner().location)
        .await?;
    Ok(web::Json(products))
}

/// List locally-made products sharing at least one tag with the input.
#[utoipa::path(
    get,
    path = "/api/v1/products/by-tags",
    params(
        ("tags" = Option<String>, Query,
         description = "Comma-separated tags; empty applies no filter")
    ),
    responses(
        (status = 200, description = "Products sharing a tag", body = [Product])
    ),
    tags = ["products"],
    operation_id = "getProductsByTags"
)]
#[get("/products/by-tags")]
pub async fn products_by_tags(
    state: web::Data<HttpState>,
    query: web::Query<TagsQuery>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let tags = parse_tag_list(query.into_inner().tags);
    let products = state.catalogue.list_by_tags(tags).await?;
    Ok(web::Json(products))
}

/// List every product by an author, regardless of the locally-made flag.
#[utoipa::path(
    get,
    path = "/api/v1/products/by-author/{author_id}",
    params(("author_id" = String, Path, description = "Author id")),
    responses(
        (status = 200, description = "The author's products, newest first", body = [Product]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProductsByAuthor"
)]
#[get("/products/by-author/{author_id}")]
pub async fn products_by_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let author: UserId = parse_id(&path.into_inner(), FieldName::new("authorId"))?;
    let products = state.catalogue.list_by_author(author).await?;
    Ok(web::Json(products))
}

/// Look up a product by id.
///
/// Returns JSON `null` for an unknown id; absence is not an error on reads.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product, or null when absent", body = Product),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProductById"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<Product>>> {
    let id: ProductId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let product = state.catalogue.get(id).await?;
    Ok(web::Json(product))
}

/// Apply a sparse update to a product.
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = UpdateProductRequestBody,
    responses(
        (status = 200, description = "Product after the merge", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Product not found", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[patch("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateProductRequestBody>,
) -> ApiResult<web::Json<Product>> {
    let id: ProductId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let body = payload.into_inner();
    let patch = ProductPatch::try_new(
        body.title,
        body.description,
        body.url,
        body.tags,
        body.location,
        body.is_made_in_my,
    )
    .map_err(map_product_validation_error)?;

    let product = state.catalogue.update(id, patch).await?;
    Ok(web::Json(product))
}
