//! Ownership rule for article mutation.

use crate::domain::UserId;

use super::Article;

/// Whether `actor` may update or delete `article`.
///
/// Only the owner may mutate. Reading is open to every signed-in user, so
/// there is no matching read predicate.
///
/// # Examples
/// ```
/// use backend::domain::{Article, ArticleAttributes, ArticleContent, UserId, can_mutate};
///
/// let owner = UserId::random();
/// let content = ArticleContent::try_new(&ArticleAttributes::new("Hi", "Body")).unwrap();
/// let article = Article::create(owner.clone(), content, chrono::Utc::now());
///
/// assert!(can_mutate(&owner, &article));
/// assert!(!can_mutate(&UserId::random(), &article));
/// ```
pub fn can_mutate(actor: &UserId, article: &Article) -> bool {
    article.owner_id == *actor
}
