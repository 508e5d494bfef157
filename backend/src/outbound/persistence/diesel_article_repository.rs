//! PostgreSQL-backed `ArticleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ArticleRepository, ArticleRepositoryError};
use crate::domain::{Article, ArticleId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ArticleRow, ArticleUpdate, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

/// Diesel-backed implementation of the `ArticleRepository` port.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ArticleRepositoryError {
    map_basic_pool_error(error, ArticleRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ArticleRepositoryError {
    map_basic_diesel_error(
        error,
        ArticleRepositoryError::query,
        ArticleRepositoryError::connection,
    )
}

fn row_to_article(row: ArticleRow) -> Article {
    Article {
        id: ArticleId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        title: row.title,
        text: row.text,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl ArticleRepository for DieselArticleRepository {
    async fn list_all(&self) -> Result<Vec<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ArticleRow> = articles::table
            .select(ArticleRow::as_select())
            .order((articles::created_at.desc(), articles::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_article).collect())
    }

    async fn find_by_id(
        &self,
        id: &ArticleId,
    ) -> Result<Option<Article>, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ArticleRow> = articles::table
            .filter(articles::id.eq(id.as_uuid()))
            .select(ArticleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_article))
    }

    async fn insert(&self, article: &Article) -> Result<(), ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewArticleRow {
            id: *article.id.as_uuid(),
            owner_id: *article.owner_id.as_uuid(),
            title: &article.title,
            text: &article.text,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        diesel::insert_into(articles::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn update(&self, article: &Article) -> Result<bool, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ArticleUpdate {
            title: &article.title,
            text: &article.text,
            updated_at: article.updated_at,
        };
        let updated = diesel::update(articles::table.filter(articles::id.eq(article.id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn delete(&self, id: &ArticleId) -> Result<bool, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(articles::table.filter(articles::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> Result<u64, ArticleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = articles::table
            .filter(articles::owner_id.eq(owner_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        u64::try_from(count)
            .map_err(|_| ArticleRepositoryError::query(format!("negative row count {count}")))
    }
}
