//! [`ArticleRepository`] backed by a locked vector.
//!
//! Contents are lost on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ArticleRepository, ArticleRepositoryError};
use crate::domain::{Article, ArticleId, UserId};

/// In-memory article store.
#[derive(Debug, Default)]
pub struct InMemoryArticleRepository {
    articles: RwLock<Vec<Article>>,
}

impl InMemoryArticleRepository {
    /// Start with the given records.
    #[must_use]
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
        }
    }

    /// Total number of stored articles.
    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn list_all(&self) -> Result<Vec<Article>, ArticleRepositoryError> {
        let mut articles = self.articles.read().await.clone();
        articles.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });
        Ok(articles)
    }

    async fn find_by_id(
        &self,
        id: &ArticleId,
    ) -> Result<Option<Article>, ArticleRepositoryError> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|article| article.id == *id).cloned())
    }

    async fn insert(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut articles = self.articles.write().await;
        if articles.iter().any(|existing| existing.id == article.id) {
            return Err(ArticleRepositoryError::query(format!(
                "duplicate article id {}",
                article.id
            )));
        }
        articles.push(article.clone());
        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<bool, ArticleRepositoryError> {
        let mut articles = self.articles.write().await;
        let Some(stored) = articles.iter_mut().find(|existing| existing.id == article.id) else {
            return Ok(false);
        };
        stored.title.clone_from(&article.title);
        stored.text.clone_from(&article.text);
        stored.updated_at = article.updated_at;
        Ok(true)
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticleRepositoryError> {
        let mut articles = self.articles.write().await;
        let before = articles.len();
        articles.retain(|article| article.id != *id);
        Ok(articles.len() < before)
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> Result<u64, ArticleRepositoryError> {
        let articles = self.articles.read().await;
        let count = articles
            .iter()
            .filter(|article| article.owner_id == *owner_id)
            .count();
        Ok(count as u64)
    }
}
