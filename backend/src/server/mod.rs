//! Server construction and route wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, Settings};
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::comments::{create_comment, product_comments, update_comment};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::products::{
    create_product, get_product, list_products, products_by_author, products_by_location,
    products_by_tags, products_with_votes, trending_products, update_product,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{create_user, get_user, update_user};
use backend::inbound::http::votes::{cast_vote, retract_vote};
use backend::middleware::trace::Trace;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // Literal product segments (with-votes, trending, by-*) must register
    // before the `{id}` routes, which match any single segment.
    let api = web::scope("/api/v1")
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
        .service(update_comment);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
