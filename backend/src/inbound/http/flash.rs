//! One-shot notices carried in the session to the next page view.

/// Notices set by successful actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ArticleCreated,
    ArticleUpdated,
    ArticleDeleted,
    SignedIn,
    SignedOut,
}

impl Notice {
    /// Text shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::ArticleCreated => "Article created successfully.",
            Self::ArticleUpdated => "Article updated successfully.",
            Self::ArticleDeleted => "Article deleted successfully.",
            Self::SignedIn => "Signed in successfully.",
            Self::SignedOut => "Signed out successfully.",
        }
    }
}
