//! Domain primitives, services, and ports.
//!
//! Types here are transport agnostic. Inbound adapters translate requests into
//! calls on the driving ports in [`ports`]; outbound adapters implement the
//! driven ports.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: failure payload shared by every adapter.
//! - [`TraceId`]: request-scoped correlation id.
//! - [`UserId`], [`Email`], [`User`], [`LoginCredentials`]: identity.
//! - [`Article`] and friends, [`can_mutate`], [`ArticlesService`]: the
//!   article resource.

pub mod articles;
pub mod auth;
pub mod credential;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::articles::{
    Article, ArticleAttributes, ArticleChanges, ArticleContent, ArticleId, ArticleValidationError,
    ArticlesService, TITLE_MAX, can_mutate,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
