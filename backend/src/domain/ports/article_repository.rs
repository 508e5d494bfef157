//! Driven port for article persistence.
//!
//! Each method touches at most one record. Adapters report infrastructure
//! failures through [`ArticleRepositoryError`]; "not found" is expressed in the
//! return value, never as an error.

use async_trait::async_trait;

use crate::domain::{Article, ArticleId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by article repository adapters.
    pub enum ArticleRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "article repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } =>
            "article repository query failed: {message}",
    }
}

/// Storage contract for [`Article`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// All articles, newest first.
    async fn list_all(&self) -> Result<Vec<Article>, ArticleRepositoryError>;

    /// Fetch an article by id, or `None` when it does not exist.
    async fn find_by_id(&self, id: &ArticleId)
    -> Result<Option<Article>, ArticleRepositoryError>;

    /// Persist a new article.
    async fn insert(&self, article: &Article) -> Result<(), ArticleRepositoryError>;

    /// Overwrite `title`, `text`, and `updated_at` of an existing article.
    ///
    /// Returns `Ok(false)` when no record with that id exists.
    async fn update(&self, article: &Article) -> Result<bool, ArticleRepositoryError>;

    /// Remove an article permanently.
    ///
    /// Returns `Ok(false)` when no record with that id exists.
    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticleRepositoryError>;

    /// Number of articles owned by `owner_id`.
    async fn count_by_owner(&self, owner_id: &UserId) -> Result<u64, ArticleRepositoryError>;
}
