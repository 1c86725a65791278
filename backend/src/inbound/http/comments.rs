//! Comment HTTP handlers.
//!
//! ```text
//! POST  /api/v1/comments
//! PATCH /api/v1/comments/{id}
//! GET   /api/v1/products/{id}/comments
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::comment::CommentValidationError;
use crate::domain::{
    Comment, CommentId, Error, NewComment, ProductId, UserId, validate_comment_content,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request payload for posting a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequestBody {
    pub content: String,
    #[schema(format = "uuid")]
    pub author_id: String,
    #[schema(format = "uuid")]
    pub product_id: String,
}

/// Request payload for editing a comment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateCommentRequestBody {
    pub content: String,
}

fn map_comment_validation_error(err: CommentValidationError) -> Error {
    match err {
        CommentValidationError::EmptyContent => {
            Error::invalid_request("content must not be empty")
                .with_details(json!({ "field": "content", "code": "empty_content" }))
        }
    }
}

/// Post a comment on a product.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentRequestBody,
    responses(
        (status = 200, description = "Comment posted", body = Comment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Author or product not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCommentRequestBody>,
) -> ApiResult<web::Json<Comment>> {
    let body = payload.into_inner();
    let author: UserId = parse_id(&body.author_id, FieldName::new("authorId"))?;
    let product: ProductId = parse_id(&body.product_id, FieldName::new("productId"))?;
    let draft = NewComment::try_new(body.content, author, product)
        .map_err(map_comment_validation_error)?;

    let comment = state.comments.post(draft).await?;
    Ok(web::Json(comment))
}

/// Replace a comment's content.
#[utoipa::path(
    patch,
    path = "/api/v1/comments/{id}",
    params(("id" = String, Path, description = "Comment id")),
    request_body = UpdateCommentRequestBody,
    responses(
        (status = 200, description = "Comment after the edit", body = Comment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Comment not found", body = Error)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[patch("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateCommentRequestBody>,
) -> ApiResult<web::Json<Comment>> {
    let id: CommentId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let content = validate_comment_content(payload.into_inner().content)
        .map_err(map_comment_validation_error)?;

    let comment = state.comments.edit(id, content).await?;
    Ok(web::Json(comment))
}

/// List a product's comments, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/comments",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Comments, newest first", body = [Comment]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["comments"],
    operation_id = "getCommentsByProduct"
)]
#[get("/products/{id}/comments")]
pub async fn product_comments(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let product: ProductId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let comments = state.comments.list_for_product(product).await?;
    Ok(web::Json(comments))
}
