//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET    /users/sign_in
//! POST   /users/sign_in  {"email":"alice@example.com","password":"password"}
//! DELETE /users/sign_out
//! ```

use actix_web::{Either, HttpResponse, get, post, route, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::articles::{ARTICLES_PATH, redirect};
use crate::inbound::http::flash::Notice;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Where unauthenticated requests are sent.
pub const SIGN_IN_PATH: &str = "/users/sign_in";

/// Sign-in request body, as JSON or a URL-encoded form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SignInRequest {
    /// Account email; matched case-insensitively.
    #[serde(default)]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Plain-text password.
    #[serde(default)]
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<SignInRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Description of the sign-in form returned by `GET /users/sign_in`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInPage {
    /// Where the form posts to.
    #[schema(example = "/users/sign_in")]
    pub action: String,
    /// HTTP method for the submission.
    #[schema(example = "POST")]
    pub method: String,
    /// Field names the form expects.
    pub fields: Vec<String>,
    /// Whether the caller already has a session.
    pub signed_in: bool,
    /// Pending flash notice, consumed by this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Describe the sign-in form and surface any pending notice.
#[utoipa::path(
    get,
    path = "/users/sign_in",
    responses((status = 200, description = "Sign-in form", body = SignInPage)),
    tags = ["users"],
    operation_id = "signInForm",
    security([])
)]
#[get("/users/sign_in")]
pub async fn sign_in_form(session: SessionContext) -> ApiResult<web::Json<SignInPage>> {
    Ok(web::Json(SignInPage {
        action: SIGN_IN_PATH.to_owned(),
        method: "POST".to_owned(),
        fields: vec!["email".to_owned(), "password".to_owned()],
        signed_in: session.user_id()?.is_some(),
        notice: session.take_flash(),
    }))
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/users/sign_in",
    request_body = SignInRequest,
    responses(
        (status = 302, description = "Signed in; redirect to the article list",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank email or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "signIn",
    security([])
)]
#[post("/users/sign_in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Either<web::Json<SignInRequest>, web::Form<SignInRequest>>,
) -> ApiResult<HttpResponse> {
    let request = match payload {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let credentials = LoginCredentials::try_from(request).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    session.flash(Notice::SignedIn)?;
    info!(user_id = %user_id, "user signed in");
    Ok(redirect(ARTICLES_PATH))
}

/// End the session. Succeeds whether or not anyone was signed in.
#[utoipa::path(
    delete,
    path = "/users/sign_out",
    responses((status = 302, description = "Signed out; redirect to sign-in")),
    tags = ["users"],
    operation_id = "signOut"
)]
#[route("/users/sign_out", method = "DELETE", method = "GET")]
pub async fn sign_out(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        info!(user_id = %user_id, "user signed out");
    }
    session.sign_out();
    session.flash(Notice::SignedOut)?;
    Ok(redirect(SIGN_IN_PATH))
}

#[cfg(test)]
mod tests;
