//! Article resource handlers.
//!
//! ```text
//! GET    /articles
//! GET    /articles/{id}
//! POST   /articles        {"title":"...","text":"..."}
//! PATCH  /articles/{id}   {"title":"...","text":"..."}
//! DELETE /articles/{id}
//! ```
//!
//! Every route requires a signed-in user. Missing sessions redirect to the
//! sign-in page and ownership failures redirect to the list, so neither ever
//! surfaces as an error payload. Bodies are extracted leniently and a parse
//! failure is only reported once those checks have passed.

use actix_web::http::header;
use actix_web::{Either, HttpResponse, delete, get, post, route, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Article, ArticleAttributes, ArticleChanges, ArticleId, Error, ErrorCode, UserId, can_mutate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::flash::Notice;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::SIGN_IN_PATH;

/// Collection path; also where non-owners are sent.
pub const ARTICLES_PATH: &str = "/articles";

/// Body submitted as JSON or as a URL-encoded form.
///
/// Extraction failures are held rather than rejected so the handler can
/// authenticate and authorise the caller first.
pub type Payload<T> = Result<Either<web::Json<T>, web::Form<T>>, actix_web::Error>;

/// Attributes of a new article.
pub type ArticlePayload = Payload<ArticleAttributes>;

/// Fields to change on an existing article.
pub type ArticleChangesPayload = Payload<ArticleChanges>;

/// Body of `GET /articles`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleListResponse {
    /// Every article, newest first.
    pub articles: Vec<Article>,
    /// Pending flash notice, consumed by this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Body of `GET /articles/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    /// The requested article.
    pub article: Article,
    /// Pending flash notice, consumed by this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn article_path(id: ArticleId) -> String {
    format!("{ARTICLES_PATH}/{id}")
}

/// Turn authentication and ownership failures into redirects.
fn redirect_on_denial(result: ApiResult<HttpResponse>) -> ApiResult<HttpResponse> {
    match result {
        Err(err) if err.code() == ErrorCode::Unauthorized => Ok(redirect(SIGN_IN_PATH)),
        Err(err) if err.code() == ErrorCode::Forbidden => Ok(redirect(ARTICLES_PATH)),
        other => other,
    }
}

/// Malformed ids cannot name a record, so they are reported as missing.
fn parse_article_id(raw: &str) -> Result<ArticleId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("article {raw} not found")))
}

fn into_body<T>(payload: Payload<T>) -> Result<T, Error> {
    match payload {
        Ok(Either::Left(json)) => Ok(json.into_inner()),
        Ok(Either::Right(form)) => Ok(form.into_inner()),
        Err(err) => Err(Error::invalid_request(format!(
            "malformed article payload: {err}"
        ))),
    }
}

/// Resolve `id` and confirm `actor` owns it without touching the record.
async fn ensure_mutable(state: &HttpState, actor: &UserId, id: ArticleId) -> Result<(), Error> {
    let article = state.articles_query.show(actor, id).await?;
    if can_mutate(actor, &article) {
        Ok(())
    } else {
        Err(Error::forbidden("only the owner may change this article"))
    }
}

/// List every article, newest first.
#[utoipa::path(
    get,
    path = "/articles",
    responses(
        (status = 200, description = "All articles", body = ArticleListResponse),
        (status = 302, description = "Not signed in; redirect to sign-in"),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "listArticles"
)]
#[get("/articles")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    redirect_on_denial(
        async {
            let actor = session.require_user_id()?;
            let articles = state.articles_query.list(&actor).await?;
            Ok(HttpResponse::Ok().json(ArticleListResponse {
                articles,
                notice: session.take_flash(),
            }))
        }
        .await,
    )
}

/// Show a single article. Any signed-in user may read any article.
#[utoipa::path(
    get,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "The article", body = ArticleResponse),
        (status = 302, description = "Not signed in; redirect to sign-in"),
        (status = 404, description = "No such article", body = Error)
    ),
    tags = ["articles"],
    operation_id = "showArticle"
)]
#[get("/articles/{id}")]
pub async fn show_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    redirect_on_denial(
        async {
            let actor = session.require_user_id()?;
            let id = parse_article_id(&path)?;
            let article = state.articles_query.show(&actor, id).await?;
            Ok(HttpResponse::Ok().json(ArticleResponse {
                article,
                notice: session.take_flash(),
            }))
        }
        .await,
    )
}

/// Create an article owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/articles",
    request_body = ArticleAttributes,
    responses(
        (status = 302, description = "Created; redirect to the new article, or to sign-in"),
        (status = 400, description = "Body is not a JSON or form article payload", body = Error),
        (status = 422, description = "Invalid attributes; details echo the input", body = Error)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("/articles")]
pub async fn create_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: ArticlePayload,
) -> ApiResult<HttpResponse> {
    redirect_on_denial(
        async {
            let actor = session.require_user_id()?;
            let attributes = into_body(payload)?;
            let article = state.articles.create(&actor, attributes).await?;
            session.flash(Notice::ArticleCreated)?;
            Ok(redirect(&article_path(article.id)))
        }
        .await,
    )
}

/// Change title and/or text of an article the signed-in user owns.
#[utoipa::path(
    patch,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    request_body = ArticleChanges,
    responses(
        (status = 302, description = "Updated; redirect to the article. Non-owners go to the list"),
        (status = 404, description = "No such article", body = Error),
        (status = 400, description = "Body is not a JSON or form article payload", body = Error),
        (status = 422, description = "Invalid attributes; details echo the input", body = Error)
    ),
    tags = ["articles"],
    operation_id = "updateArticle"
)]
#[route("/articles/{id}", method = "PATCH", method = "PUT")]
pub async fn update_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: ArticleChangesPayload,
) -> ApiResult<HttpResponse> {
    redirect_on_denial(
        async {
            let actor = session.require_user_id()?;
            let id = parse_article_id(&path)?;
            let changes = match into_body(payload) {
                Ok(changes) => changes,
                Err(err) => {
                    ensure_mutable(&state, &actor, id).await?;
                    return Err(err);
                }
            };
            state.articles.update(&actor, id, changes).await?;
            session.flash(Notice::ArticleUpdated)?;
            Ok(redirect(&article_path(id)))
        }
        .await,
    )
}

/// Delete an article the signed-in user owns.
#[utoipa::path(
    delete,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article identifier")),
    responses(
        (status = 302, description = "Deleted, or denied; redirect to the list or sign-in"),
        (status = 404, description = "No such article", body = Error)
    ),
    tags = ["articles"],
    operation_id = "deleteArticle"
)]
#[delete("/articles/{id}")]
pub async fn delete_article(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    redirect_on_denial(
        async {
            let actor = session.require_user_id()?;
            let id = parse_article_id(&path)?;
            state.articles.destroy(&actor, id).await?;
            session.flash(Notice::ArticleDeleted)?;
            Ok(redirect(ARTICLES_PATH))
        }
        .await,
    )
}
