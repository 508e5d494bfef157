//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel row structs and
//! domain types. Connections come from a `bb8` pool over `diesel-async`.
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselArticleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/articles")).await?;
//! let repo = DieselArticleRepository::new(pool);
//! ```

mod diesel_article_repository;
mod diesel_basic_error_mapping;
mod diesel_login_service;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use diesel_login_service::DieselLoginService;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
