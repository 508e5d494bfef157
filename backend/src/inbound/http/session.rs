//! Cookie session access for handlers.
//!
//! [`SessionContext`] wraps the Actix session so handlers deal in user ids
//! and notices rather than raw keys.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

use super::flash::Notice;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "flash";

/// Newtype exposing domain-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user_id` as the signed-in user.
    ///
    /// The session id is rotated so a cookie captured before sign-in cannot be
    /// reused afterwards.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Forget the signed-in user and any other session state.
    pub fn sign_out(&self) {
        self.0.clear();
        self.0.renew();
    }

    /// The signed-in user, if any.
    ///
    /// A value that does not parse as a user id is treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match UserId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "ignoring invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// The signed-in user, or `unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("sign in required"))
    }

    /// Queue a notice for the next page view.
    pub fn flash(&self, notice: Notice) -> Result<(), Error> {
        self.0
            .insert(FLASH_KEY, notice.message())
            .map_err(|error| Error::internal(format!("failed to store notice: {error}")))
    }

    /// Consume the pending notice, if any.
    pub fn take_flash(&self) -> Option<String> {
        match self.0.remove_as::<String>(FLASH_KEY)? {
            Ok(notice) => Some(notice),
            Err(raw) => {
                warn!(%raw, "discarding undecodable flash notice");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
