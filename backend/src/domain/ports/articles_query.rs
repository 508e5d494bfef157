//! Driving port for reading articles.

use async_trait::async_trait;

use crate::domain::{Article, ArticleId, Error, UserId};

/// Read-side use-cases. Any signed-in user may read any article.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// Every article, newest first.
    async fn list(&self, actor: &UserId) -> Result<Vec<Article>, Error>;

    /// A single article, or `not_found`.
    async fn show(&self, actor: &UserId, id: ArticleId) -> Result<Article, Error>;
}
