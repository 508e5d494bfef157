//! Driving port for sign-in.
//!
//! Inbound adapters authenticate credentials through this port without
//! knowing where accounts live, so handler tests can run without a database.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Email, password, and user id of each built-in development account.
pub const FIXTURE_ACCOUNTS: [(&str, &str, &str); 2] = [
    (
        "alice@example.com",
        "password",
        "123e4567-e89b-12d3-a456-426614174000",
    ),
    (
        "bob@example.com",
        "password",
        "9b2f4c1e-5d3a-4e7b-8c6d-0f1a2b3c4d5e",
    ),
];

/// In-memory authenticator used when no database is configured.
///
/// Accepts exactly the accounts listed in [`FIXTURE_ACCOUNTS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = FIXTURE_ACCOUNTS.iter().find(|(email, password, _)| {
            *email == credentials.email() && *password == credentials.password()
        });
        match account {
            Some((_, _, id)) => UserId::new(id)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}"))),
            None => Err(Error::unauthorized("invalid email or password")),
        }
    }
}
