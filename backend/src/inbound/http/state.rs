//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see domain ports,
//! so they can be exercised without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ArticlesService;
use crate::domain::ports::{ArticleRepository, ArticlesCommand, ArticlesQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check for sign-in.
    pub login: Arc<dyn LoginService>,
    /// Article mutations.
    pub articles: Arc<dyn ArticlesCommand>,
    /// Article reads.
    pub articles_query: Arc<dyn ArticlesQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    #[must_use]
    pub fn new(
        login: Arc<dyn LoginService>,
        articles: Arc<dyn ArticlesCommand>,
        articles_query: Arc<dyn ArticlesQuery>,
    ) -> Self {
        Self {
            login,
            articles,
            articles_query,
        }
    }

    /// Wire both article ports to one [`ArticlesService`] over `repo`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::FixtureLoginService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::memory::InMemoryArticleRepository;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::with_repository(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(InMemoryArticleRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _articles = state.articles.clone();
    /// ```
    pub fn with_repository<R>(
        login: Arc<dyn LoginService>,
        repo: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        R: ArticleRepository + 'static,
    {
        let service = Arc::new(ArticlesService::new(repo, clock));
        Self::new(login, service.clone(), service)
    }
}
