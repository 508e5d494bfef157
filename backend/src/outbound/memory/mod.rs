//! Process-local adapters used when no database is configured and in tests.

mod in_memory_article_repository;

pub use in_memory_article_repository::InMemoryArticleRepository;
