//! Builders wiring repository-backed services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use backend::domain::{
    AccountService, CatalogueService, CommentService, RankingService, VotingService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselCommentRepository, DieselProductRepository, DieselUserRepository, DieselVoteRepository,
};

use super::ServerConfig;

/// Build HTTP state from the configuration: database-backed services when a
/// pool is available, fixture ports otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            let users = Arc::new(DieselUserRepository::new(pool.clone()));
            let products = Arc::new(DieselProductRepository::new(pool.clone()));
            let votes = Arc::new(DieselVoteRepository::new(pool.clone()));
            let comments = Arc::new(DieselCommentRepository::new(pool.clone()));

            HttpState {
                accounts: Arc::new(AccountService::new(users.clone())),
                catalogue: Arc::new(CatalogueService::new(products.clone(), users.clone())),
                voting: Arc::new(VotingService::new(
                    votes.clone(),
                    users.clone(),
                    products.clone(),
                )),
                rankings: Arc::new(RankingService::new(
                    products.clone(),
                    votes,
                    Arc::new(DefaultClock),
                )),
                comments: Arc::new(CommentService::new(comments, users, products)),
            }
        }
        None => HttpState::default(),
    };

    web::Data::new(state)
}
