//! Vote HTTP handlers.
//!
//! ```text
//! POST   /api/v1/votes
//! DELETE /api/v1/votes
//! ```

use actix_web::{delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProductId, UserId, Vote};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Request payload identifying a (user, product) vote pair.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VotePairRequestBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "uuid")]
    pub product_id: String,
}

fn parse_pair(body: VotePairRequestBody) -> Result<(UserId, ProductId), Error> {
    let user: UserId = parse_id(&body.user_id, FieldName::new("userId"))?;
    let product: ProductId = parse_id(&body.product_id, FieldName::new("productId"))?;
    Ok((user, product))
}

/// Cast a vote for a product.
#[utoipa::path(
    post,
    path = "/api/v1/votes",
    request_body = VotePairRequestBody,
    responses(
        (status = 200, description = "Vote recorded", body = Vote),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "User or product not found", body = Error),
        (status = 409, description = "Pair already has a vote", body = Error)
    ),
    tags = ["votes"],
    operation_id = "createVote"
)]
#[post("/votes")]
pub async fn cast_vote(
    state: web::Data<HttpState>,
    payload: web::Json<VotePairRequestBody>,
) -> ApiResult<web::Json<Vote>> {
    let (user, product) = parse_pair(payload.into_inner())?;
    let vote = state.voting.cast(user, product).await?;
    Ok(web::Json(vote))
}

/// Retract the vote for a (user, product) pair.
///
/// Returns whether a vote was removed. Retracting an absent vote answers
/// `false` rather than failing, so retries are harmless.
#[utoipa::path(
    delete,
    path = "/api/v1/votes",
    request_body = VotePairRequestBody,
    responses(
        (status = 200, description = "True when a vote was removed", body = bool),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["votes"],
    operation_id = "deleteVote"
)]
#[delete("/votes")]
pub async fn retract_vote(
    state: web::Data<HttpState>,
    payload: web::Json<VotePairRequestBody>,
) -> ApiResult<web::Json<bool>> {
    let (user, product) = parse_pair(payload.into_inner())?;
    let removed = state.voting.retract(user, product).await?;
    Ok(web::Json(removed))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test as actix_test, web};
    use chrono::Utc;
    use serde_json::{Value, json};

    use crate::domain::VoteId;
    use crate::domain::ports::MockVoteCasting;

    use super::*;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1").service(cast_vote).service(retract_vote),
        )
    }

    fn pair_json(user: &UserId, product: &ProductId) -> Value {
        json!({ "userId": user.to_string(), "productId": product.to_string() })
    }

    #[actix_web::test]
    async fn cast_vote_returns_the_stored_row() {
        let user = UserId::random();
        let product = ProductId::random();

        let mut voting = MockVoteCasting::new();
        voting.expect_cast().times(1).return_once(|user, product| {
            Ok(Vote {
                id: VoteId::random(),
                user_id: user,
                product_id: product,
                created_at: Utc::now(),
            })
        });

        let state = HttpState {
            voting: Arc::new(voting),
            ..HttpState::default()
        };
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/votes")
                .set_json(pair_json(&user, &product))
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("userId").and_then(Value::as_str),
            Some(user.to_string().as_str())
        );
    }

    #[actix_web::test]
    async fn duplicate_vote_maps_to_conflict_status() {
        let mut voting = MockVoteCasting::new();
        voting
            .expect_cast()
            .times(1)
            .return_once(|_, _| Err(Error::conflict("duplicate vote")));

        let state = HttpState {
            voting: Arc::new(voting),
            ..HttpState::default()
        };
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/votes")
                .set_json(pair_json(&UserId::random(), &ProductId::random()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn retract_vote_answers_plain_booleans() {
        let mut voting = MockVoteCasting::new();
        voting.expect_retract().times(1).return_once(|_, _| Ok(false));

        let state = HttpState {
            voting: Arc::new(voting),
            ..HttpState::default()
        };
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/votes")
                .set_json(pair_json(&UserId::random(), &ProductId::random()))
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, Value::Bool(false));
    }

    #[actix_web::test]
    async fn malformed_ids_never_reach_the_port() {
        let mut voting = MockVoteCasting::new();
        voting.expect_cast().times(0);

        let state = HttpState {
            voting: Arc::new(voting),
            ..HttpState::default()
        };
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/votes")
                .set_json(json!({ "userId": "nope", "productId": "also-nope" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
