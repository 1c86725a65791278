//! User account HTTP handlers.
//!
//! ```text
//! POST  /api/v1/users
//! GET   /api/v1/users/{id}
//! PATCH /api/v1/users/{id}
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, FieldPatch, NewUser, User, UserId, UserPatch};
use crate::domain::user::UserValidationError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request payload for registering a user.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequestBody {
    pub name: String,
    #[schema(format = "email")]
    pub email: String,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
}

/// Request payload for a sparse user update. Absent fields keep their stored
/// values; `avatarUrl` and `location` accept explicit `null` to clear.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequestBody {
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_keep")]
    #[schema(value_type = Option<String>)]
    pub avatar_url: FieldPatch<String>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_keep")]
    #[schema(value_type = Option<String>)]
    pub location: FieldPatch<String>,
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyName => Error::invalid_request("name must not be empty")
            .with_details(json!({ "field": "name", "code": "empty_name" })),
        UserValidationError::InvalidEmail => {
            Error::invalid_request("email must be a well-formed address")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        UserValidationError::InvalidAvatarUrl => {
            Error::invalid_request("avatarUrl must be a valid URL")
                .with_details(json!({ "field": "avatarUrl", "code": "invalid_url" }))
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequestBody,
    responses(
        (status = 200, description = "User registered", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequestBody>,
) -> ApiResult<web::Json<User>> {
    let body = payload.into_inner();
    let draft = NewUser::try_new(body.name, body.email, body.avatar_url, body.location)
        .map_err(map_user_validation_error)?;

    let user = state.accounts.register(draft).await?;
    Ok(web::Json(user))
}

/// Look up a user by id.
///
/// Returns JSON `null` for an unknown id; absence is not an error on reads.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User, or null when absent", body = User),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<User>>> {
    let id: UserId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let user = state.accounts.get(id).await?;
    Ok(web::Json(user))
}

/// Apply a sparse update to a user profile.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequestBody,
    responses(
        (status = 200, description = "User after the merge", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequestBody>,
) -> ApiResult<web::Json<User>> {
    let id: UserId = parse_id(&path.into_inner(), FieldName::new("id"))?;
    let body = payload.into_inner();
    let patch = UserPatch::try_new(body.name, body.avatar_url, body.location)
        .map_err(map_user_validation_error)?;

    let user = state.accounts.update(id, patch).await?;
    Ok(web::Json(user))
}
