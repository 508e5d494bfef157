//! HTTP inbound adapter.
//!
//! Handlers translate requests into calls on the domain's driving ports and
//! map outcomes to JSON bodies, redirects, or status codes.

pub mod articles;
pub mod error;
pub mod flash;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the article and sign-in routes.
///
/// The caller provides [`state::HttpState`] as app data and wraps the routes
/// in a session middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(backend::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(articles::list_articles)
        .service(articles::create_article)
        .service(articles::show_article)
        .service(articles::update_article)
        .service(articles::delete_article)
        .service(users::sign_in_form)
        .service(users::sign_in)
        .service(users::sign_out);
}
