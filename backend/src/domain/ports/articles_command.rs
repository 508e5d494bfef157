//! Driving port for article mutations.
//!
//! The signed-in user is passed explicitly; implementations never consult
//! session state. Callers must already have authenticated the actor.

use async_trait::async_trait;

use crate::domain::{Article, ArticleAttributes, ArticleChanges, ArticleId, Error, UserId};

/// Use-cases that create, change, or remove articles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesCommand: Send + Sync {
    /// Validate and persist a new article owned by `actor`.
    ///
    /// Fails with `validation_failed` (carrying per-field errors and the
    /// submitted input) without persisting anything.
    async fn create(&self, actor: &UserId, attributes: ArticleAttributes)
    -> Result<Article, Error>;

    /// Apply `changes` to an article owned by `actor`.
    ///
    /// Checks run in order: existence (`not_found`), ownership (`forbidden`),
    /// then validation (`validation_failed`).
    async fn update(
        &self,
        actor: &UserId,
        id: ArticleId,
        changes: ArticleChanges,
    ) -> Result<Article, Error>;

    /// Permanently remove an article owned by `actor`.
    async fn destroy(&self, actor: &UserId, id: ArticleId) -> Result<(), Error>;
}
