//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentThreads, FixtureCommentThreads, FixtureProductCatalogue, FixtureProductRankings,
    FixtureUserAccounts, FixtureVoteCasting, ProductCatalogue, ProductRankings, UserAccounts,
    VoteCasting,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn UserAccounts>,
    pub catalogue: Arc<dyn ProductCatalogue>,
    pub voting: Arc<dyn VoteCasting>,
    pub rankings: Arc<dyn ProductRankings>,
    pub comments: Arc<dyn CommentThreads>,
}

impl Default for HttpState {
    /// Fixture-backed state for wiring without a database.
    fn default() -> Self {
        Self {
            accounts: Arc::new(FixtureUserAccounts),
            catalogue: Arc::new(FixtureProductCatalogue),
            voting: Arc::new(FixtureVoteCasting),
            rankings: Arc::new(FixtureProductRankings),
            comments: Arc::new(FixtureCommentThreads),
        }
    }
}
