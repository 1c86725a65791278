//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every operation from the inbound layer plus the domain
//! payload schemas. The generated specification backs Swagger UI in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::error::{Error, ErrorCode};
use crate::domain::{Comment, Product, ProductWithVotes, Timeframe, User, Vote};
use crate::inbound::http::comments::{CreateCommentRequestBody, UpdateCommentRequestBody};
use crate::inbound::http::products::{CreateProductRequestBody, UpdateProductRequestBody};
use crate::inbound::http::users::{CreateUserRequestBody, UpdateUserRequestBody};
use crate::inbound::http::votes::VotePairRequestBody;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Hunt backend API",
        description = "HTTP interface for submitting, voting on, and ranking locally-made products."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::products_with_votes,
        crate::inbound::http::products::trending_products,
        crate::inbound::http::products::products_by_location,
        crate::inbound::http::products::products_by_tags,
        crate::inbound::http::products::products_by_author,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::votes::cast_vote,
        crate::inbound::http::votes::retract_vote,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::product_comments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Product,
        Vote,
        Comment,
        crate::domain::UserId,
        crate::domain::ProductId,
        crate::domain::VoteId,
        crate::domain::CommentId,
        crate::domain::EmailAddress,
        ProductWithVotes,
        Timeframe,
        Error,
        ErrorCode,
        CreateUserRequestBody,
        UpdateUserRequestBody,
        CreateProductRequestBody,
        UpdateProductRequestBody,
        VotePairRequestBody,
        CreateCommentRequestBody,
        UpdateCommentRequestBody,
    )),
    tags(
        (name = "users", description = "User registration and profiles"),
        (name = "products", description = "Product submission, listing, and rankings"),
        (name = "votes", description = "Casting and retracting votes"),
        (name = "comments", description = "Product comment threads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI operation registration.

    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn every_rpc_operation_is_documented() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).expect("openapi serialises");
        for operation_id in [
            "createUser",
            "getUserById",
            "updateUser",
            "createProduct",
            "getProducts",
            "getProductById",
            "getProductsByLocation",
            "getProductsByTags",
            "getProductsByAuthor",
            "updateProduct",
            "createVote",
            "deleteVote",
            "getProductsWithVotes",
            "getTrendingProducts",
            "createComment",
            "getCommentsByProduct",
            "updateComment",
        ] {
            assert!(
                json.contains(operation_id),
                "operation {operation_id} missing from the OpenAPI document"
            );
        }
    }
}
