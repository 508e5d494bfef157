//! OpenAPI document for the articles API.
//!
//! Served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Article, ArticleAttributes, ArticleChanges, Error, ErrorCode};
use crate::inbound::http::articles::{ArticleListResponse, ArticleResponse};
use crate::inbound::http::users::{SignInPage, SignInRequest};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /users/sign_in.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Articles backend API",
        description = "Session-authenticated article publishing with owner-only edits."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::show_article,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::update_article,
        crate::inbound::http::articles::delete_article,
        crate::inbound::http::users::sign_in_form,
        crate::inbound::http::users::sign_in,
        crate::inbound::http::users::sign_out,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Article,
        ArticleAttributes,
        ArticleChanges,
        ArticleListResponse,
        ArticleResponse,
        SignInRequest,
        SignInPage,
        Error,
        ErrorCode
    )),
    tags(
        (name = "articles", description = "Reading and authoring articles"),
        (name = "users", description = "Signing in and out"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document listing every route and schema.
pub struct ApiDoc;
