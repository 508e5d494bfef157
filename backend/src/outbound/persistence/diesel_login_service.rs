//! Diesel-backed `LoginService` that checks Argon2 digests stored in `users`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::credential::{hash_password, verify_password};
use crate::domain::ports::LoginService;
use crate::domain::{Email, Error, LoginCredentials, UserId};

use super::models::{NewUserRow, UserCredentialRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Authenticates against, and registers, rows in the `users` table.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert an account with a freshly salted digest of `password`.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when the email is already registered,
    /// `ServiceUnavailable` when no connection can be obtained, and
    /// `InternalError` for hashing or other database failures.
    pub async fn register(&self, email: &Email, password: &str) -> Result<UserId, Error> {
        let digest = hash_password(password).map_err(|err| {
            warn!(%err, "password hashing failed");
            Error::internal("failed to hash password")
        })?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = Uuid::new_v4();
        let row = NewUserRow {
            id,
            email: email.as_ref(),
            password_digest: &digest,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    Error::invalid_request(format!("{email} is already registered"))
                }
                other => map_diesel_error(other),
            })?;

        Ok(UserId::from_uuid(id))
    }
}

fn map_pool_error(error: PoolError) -> Error {
    Error::service_unavailable(error.to_string())
}

fn map_diesel_error(error: DieselError) -> Error {
    debug!(%error, "diesel operation failed");
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            Error::service_unavailable("database connection error")
        }
        _ => Error::internal("database error"),
    }
}

/// Decide a sign-in attempt from the row found for its email.
fn check_credentials(row: Option<UserCredentialRow>, password: &str) -> Result<UserId, Error> {
    let Some(row) = row else {
        return Err(Error::unauthorized(INVALID_CREDENTIALS));
    };
    match verify_password(password, &row.password_digest) {
        Ok(true) => Ok(UserId::from_uuid(row.id)),
        Ok(false) => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        Err(err) => {
            warn!(user_id = %row.id, %err, "stored password digest is malformed");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserCredentialRow> = users::table
            .filter(users::email.eq(credentials.email()))
            .select(UserCredentialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        check_credentials(row, credentials.password())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn row(password: &str) -> UserCredentialRow {
        UserCredentialRow {
            id: Uuid::new_v4(),
            password_digest: hash_password(password).expect("hashable password"),
        }
    }

    #[rstest]
    fn matching_password_yields_user_id() {
        let stored = row("s3cret");
        let expected = stored.id;

        let user_id = check_credentials(Some(stored), "s3cret").expect("authenticated");

        assert_eq!(user_id.as_uuid(), &expected);
    }

    #[rstest]
    #[case::unknown_email(None, "s3cret")]
    #[case::wrong_password(Some(row("s3cret")), "guess")]
    #[case::malformed_digest(
        Some(UserCredentialRow { id: Uuid::new_v4(), password_digest: "plain".to_owned() }),
        "plain"
    )]
    fn failures_are_indistinguishable(
        #[case] stored: Option<UserCredentialRow>,
        #[case] password: &str,
    ) {
        let err = check_credentials(stored, password).expect_err("rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    fn pool_errors_are_service_unavailable() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn query_errors_are_internal() {
        let err = map_diesel_error(DieselError::NotFound);
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
