//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod article_repository;
mod articles_command;
mod articles_query;
mod login_service;

#[cfg(test)]
pub use article_repository::MockArticleRepository;
pub use article_repository::{ArticleRepository, ArticleRepositoryError};
#[cfg(test)]
pub use articles_command::MockArticlesCommand;
pub use articles_command::ArticlesCommand;
#[cfg(test)]
pub use articles_query::MockArticlesQuery;
pub use articles_query::ArticlesQuery;
pub use login_service::{FIXTURE_ACCOUNTS, FixtureLoginService, LoginService};
