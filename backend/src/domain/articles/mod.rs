//! Article aggregate, validation, and the service implementing the article
//! driving ports.
//!
//! Every article has exactly one owner, fixed at creation from the signed-in
//! user. Updates change `title` and/or `text` and bump `updated_at`; nothing
//! else about a record ever changes.

mod policy;
mod service;

pub use policy::can_mutate;
pub use service::ArticlesService;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;

/// Longest accepted title, counted in characters.
pub const TITLE_MAX: usize = 255;

/// System-assigned article identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(Uuid);

impl ArticleId {
    /// Allocate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ArticleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Raw, unvalidated attributes as submitted by a client.
///
/// Kept verbatim so a rejected submission can be echoed back for correction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleAttributes {
    /// Headline; missing fields deserialise as empty.
    #[serde(default)]
    #[schema(example = "Test Article")]
    pub title: String,
    /// Body; missing fields deserialise as empty.
    #[serde(default)]
    #[schema(example = "This is test article")]
    pub text: String,
}

impl ArticleAttributes {
    /// Attributes from a title and body, unvalidated.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Partial update submitted by a client. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArticleChanges {
    /// Replacement headline, if any.
    #[serde(default)]
    #[schema(example = "Edited Article")]
    pub title: Option<String>,
    /// Replacement body, if any.
    #[serde(default)]
    pub text: Option<String>,
}

impl ArticleChanges {
    /// Change only the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            text: None,
        }
    }

    /// Overlay the changes on `article`, yielding the attributes to validate.
    #[must_use]
    pub fn over(self, article: &Article) -> ArticleAttributes {
        ArticleAttributes {
            title: self.title.unwrap_or_else(|| article.title.clone()),
            text: self.text.unwrap_or_else(|| article.text.clone()),
        }
    }
}

impl From<ArticleAttributes> for ArticleChanges {
    fn from(attributes: ArticleAttributes) -> Self {
        Self {
            title: Some(attributes.title),
            text: Some(attributes.text),
        }
    }
}

/// A single failed field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArticleValidationError {
    /// Title is empty or whitespace.
    #[error("can't be blank")]
    BlankTitle,
    /// Title exceeds `max` characters.
    #[error("is too long (maximum is {max} characters)")]
    TitleTooLong {
        /// Character limit that was exceeded.
        max: usize,
    },
    /// Text is empty or whitespace.
    #[error("can't be blank")]
    BlankText,
}

impl ArticleValidationError {
    /// Name of the attribute the error applies to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankTitle | Self::TitleTooLong { .. } => "title",
            Self::BlankText => "text",
        }
    }
}

/// Validated article body.
///
/// ## Invariants
/// - `title` is non-blank and at most [`TITLE_MAX`] characters.
/// - `text` is non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    title: String,
    text: String,
}

impl ArticleContent {
    /// Validate attributes, collecting every failing field.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{ArticleAttributes, ArticleContent, ArticleValidationError};
    ///
    /// let errors = ArticleContent::try_new(&ArticleAttributes::new(" ", ""))
    ///     .expect_err("blank attributes are rejected");
    /// assert_eq!(
    ///     errors,
    ///     vec![ArticleValidationError::BlankTitle, ArticleValidationError::BlankText]
    /// );
    /// ```
    pub fn try_new(attributes: &ArticleAttributes) -> Result<Self, Vec<ArticleValidationError>> {
        let mut errors = Vec::new();
        if attributes.title.trim().is_empty() {
            errors.push(ArticleValidationError::BlankTitle);
        } else if attributes.title.chars().count() > TITLE_MAX {
            errors.push(ArticleValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if attributes.text.trim().is_empty() {
            errors.push(ArticleValidationError::BlankText);
        }

        if errors.is_empty() {
            Ok(Self {
                title: attributes.title.clone(),
                text: attributes.text.clone(),
            })
        } else {
            Err(errors)
        }
    }

    /// Validated headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Validated body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Persisted article owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// System-assigned identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: ArticleId,
    /// Author; fixed at creation.
    #[schema(value_type = String, format = Uuid)]
    pub owner_id: UserId,
    /// Non-blank headline of at most [`TITLE_MAX`] characters.
    pub title: String,
    /// Non-blank body.
    pub text: String,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// When the title or body last changed.
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Build a new article owned by `owner_id`, stamped with `now`.
    #[must_use]
    pub fn create(owner_id: UserId, content: ArticleContent, now: DateTime<Utc>) -> Self {
        let ArticleContent { title, text } = content;
        Self {
            id: ArticleId::random(),
            owner_id,
            title,
            text,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and text, leaving identity and ownership untouched.
    pub fn apply(&mut self, content: ArticleContent, now: DateTime<Utc>) {
        let ArticleContent { title, text } = content;
        self.title = title;
        self.text = text;
        self.updated_at = now;
    }
}
