//! Article service implementing [`ArticlesCommand`] and [`ArticlesQuery`].

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    ArticleRepository, ArticleRepositoryError, ArticlesCommand, ArticlesQuery,
};
use crate::domain::{Error, UserId};

use super::{
    Article, ArticleAttributes, ArticleChanges, ArticleContent, ArticleId, ArticleValidationError, can_mutate,
};

/// Domain service over an [`ArticleRepository`].
#[derive(Clone)]
pub struct ArticlesService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ArticlesService<R> {
    /// Service over `repo`, stamping writes with `clock`.
    #[must_use]
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> ArticlesService<R>
where
    R: ArticleRepository,
{
    fn map_repository_error(error: ArticleRepositoryError) -> Error {
        match error {
            ArticleRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("article repository unavailable: {message}"))
            }
            ArticleRepositoryError::Query { message } => {
                Error::internal(format!("article repository error: {message}"))
            }
        }
    }

    fn invalid(attributes: &ArticleAttributes, errors: &[ArticleValidationError]) -> Error {
        let mut by_field: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for error in errors {
            by_field
                .entry(error.field())
                .or_default()
                .push(error.to_string());
        }
        Error::validation_failed("article is invalid").with_details(json!({
            "errors": by_field,
            "input": attributes,
        }))
    }

    async fn load(&self, id: ArticleId) -> Result<Article, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("article {id} not found")))
    }

    async fn load_owned(&self, actor: &UserId, id: ArticleId) -> Result<Article, Error> {
        let article = self.load(id).await?;
        if !can_mutate(actor, &article) {
            warn!(
                article_id = %id,
                actor = %actor,
                owner = %article.owner_id,
                "rejected mutation by non-owner"
            );
            return Err(Error::forbidden("only the owner may change this article"));
        }
        Ok(article)
    }
}

#[async_trait]
impl<R> ArticlesCommand for ArticlesService<R>
where
    R: ArticleRepository,
{
    async fn create(
        &self,
        actor: &UserId,
        attributes: ArticleAttributes,
    ) -> Result<Article, Error> {
        let content = ArticleContent::try_new(&attributes)
            .map_err(|errors| Self::invalid(&attributes, &errors))?;
        let article = Article::create(actor.clone(), content, self.clock.utc());

        self.repo
            .insert(&article)
            .await
            .map_err(Self::map_repository_error)?;

        info!(article_id = %article.id, actor = %actor, "article created");
        Ok(article)
    }

    async fn update(
        &self,
        actor: &UserId,
        id: ArticleId,
        changes: ArticleChanges,
    ) -> Result<Article, Error> {
        let mut article = self.load_owned(actor, id).await?;
        let attributes = changes.over(&article);
        let content = ArticleContent::try_new(&attributes)
            .map_err(|errors| Self::invalid(&attributes, &errors))?;
        article.apply(content, self.clock.utc());

        let updated = self
            .repo
            .update(&article)
            .await
            .map_err(Self::map_repository_error)?;
        if !updated {
            return Err(Error::not_found(format!("article {id} not found")));
        }

        info!(article_id = %id, actor = %actor, "article updated");
        Ok(article)
    }

    async fn destroy(&self, actor: &UserId, id: ArticleId) -> Result<(), Error> {
        self.load_owned(actor, id).await?;

        let deleted = self
            .repo
            .delete(&id)
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(format!("article {id} not found")));
        }

        info!(article_id = %id, actor = %actor, "article deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> ArticlesQuery for ArticlesService<R>
where
    R: ArticleRepository,
{
    async fn list(&self, _actor: &UserId) -> Result<Vec<Article>, Error> {
        self.repo
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn show(&self, _actor: &UserId, id: ArticleId) -> Result<Article, Error> {
        self.load(id).await
    }
}
