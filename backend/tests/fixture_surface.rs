//! End-to-end coverage of the HTTP surface over fixture ports.
//!
//! These tests exercise routing, validation, serialisation, and error
//! mapping without a database: every driving port is the fixture
//! implementation, so reads answer empty and mutations answer
//! service-unavailable or not-found.

use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::domain::{CommentId, ProductId, UserId};
use backend::inbound::http::comments::{create_comment, product_comments, update_comment};
use backend::inbound::http::products::{
    create_product, get_product, list_products, products_by_author, products_by_location,
    products_by_tags, products_with_votes, trending_products, update_product,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{create_user, get_user, update_user};
use backend::inbound::http::votes::{cast_vote, retract_vote};
use backend::middleware::trace::{TRACE_ID_HEADER, Trace};

fn fixture_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::default()))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(create_user)
                .service(get_user)
                .service(update_user)
                .service(create_product)
                .service(list_products)
                .service(products_with_votes)
                .service(trending_products)
                .service(products_by_location)
                .service(products_by_tags)
                .service(products_by_author)
                .service(product_comments)
                .service(get_product)
                .service(update_product)
                .service(cast_vote)
                .service(retract_vote)
                .service(create_comment)
                .service(update_comment),
        )
}

#[actix_web::test]
async fn read_endpoints_answer_empty_collections() {
    let app = actix_test::init_service(fixture_app()).await;

    for uri in [
        "/api/v1/products".to_owned(),
        "/api/v1/products/with-votes".to_owned(),
        "/api/v1/products/trending?timeframe=weekly".to_owned(),
        "/api/v1/products/by-location?location=Penang".to_owned(),
        "/api/v1/products/by-tags?tags=coffee".to_owned(),
        format!("/api/v1/products/by-author/{}", UserId::random()),
        format!("/api/v1/products/{}/comments", ProductId::random()),
    ] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&uri).to_request(),
        )
        .await;
        assert!(response.status().is_success(), "{uri} should answer 200");
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!([]), "{uri} should answer an empty list");
    }
}

#[actix_web::test]
async fn single_entity_reads_answer_null_not_errors() {
    let app = actix_test::init_service(fixture_app()).await;

    for uri in [
        format!("/api/v1/users/{}", UserId::random()),
        format!("/api/v1/products/{}", ProductId::random()),
    ] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&uri).to_request(),
        )
        .await;
        assert!(response.status().is_success(), "{uri} should answer 200");
        let body: Value = actix_test::read_body_json(response).await;
        assert!(body.is_null(), "{uri} should answer null");
    }
}

#[actix_web::test]
async fn mutations_surface_the_fixture_store_state() {
    let app = actix_test::init_service(fixture_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada", "email": "ada@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("service_unavailable")
    );
}

#[actix_web::test]
async fn vote_retraction_is_an_idempotent_no_op() {
    let app = actix_test::init_service(fixture_app()).await;

    let pair = json!({
        "userId": UserId::random().to_string(),
        "productId": ProductId::random().to_string(),
    });
    for _ in 0..2 {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/votes")
                .set_json(pair.clone())
                .to_request(),
        )
        .await;
        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, Value::Bool(false));
    }
}

#[actix_web::test]
async fn validation_rejections_carry_field_details() {
    let app = actix_test::init_service(fixture_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada", "email": "not-an-email" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(
        body.get("details")
            .and_then(|details| details.get("field"))
            .and_then(Value::as_str),
        Some("email")
    );
}

#[actix_web::test]
async fn editing_an_unknown_comment_answers_not_found() {
    let app = actix_test::init_service(fixture_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/v1/comments/{}", CommentId::random()))
            .set_json(json!({ "content": "Edited" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = actix_test::init_service(fixture_app()).await;

    let ok = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/products")
            .to_request(),
    )
    .await;
    assert!(ok.headers().contains_key(TRACE_ID_HEADER));

    let failed = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada", "email": "nope" }))
            .to_request(),
    )
    .await;
    assert!(failed.headers().contains_key(TRACE_ID_HEADER));
}
