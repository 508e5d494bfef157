//! Chooses port adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use backend::domain::ports::FixtureLoginService;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryArticleRepository;
use backend::outbound::persistence::{DbPool, DieselArticleRepository, DieselLoginService};

/// Diesel adapters when a pool is configured, otherwise the in-memory store
/// and the built-in accounts.
pub(super) fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let state = match db_pool {
        Some(pool) => HttpState::with_repository(
            Arc::new(DieselLoginService::new(pool.clone())),
            Arc::new(DieselArticleRepository::new(pool.clone())),
            clock,
        ),
        None => {
            warn!("no database configured; articles are kept in memory");
            HttpState::with_repository(
                Arc::new(FixtureLoginService),
                Arc::new(InMemoryArticleRepository::default()),
                clock,
            )
        }
    };
    web::Data::new(state)
}
