//! Tests for the sign-in and sign-out handlers.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::FixtureLoginService;
use crate::inbound::http::configure;
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use crate::outbound::memory::InMemoryArticleRepository;

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(HttpState::with_repository(
            Arc::new(FixtureLoginService),
            Arc::new(InMemoryArticleRepository::default()),
            Arc::new(DefaultClock),
        )))
        .configure(configure)
}

fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[actix_web::test]
async fn sign_in_redirects_to_articles_and_sets_session() {
    let app = actix_test::init_service(test_app()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(SIGN_IN_PATH)
            .set_json(json!({ "email": "alice@example.com", "password": "password" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(ARTICLES_PATH));
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(ARTICLES_PATH)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["notice"], Notice::SignedIn.message());
}

#[actix_web::test]
async fn sign_in_accepts_form_payloads() {
    let app = actix_test::init_service(test_app()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(SIGN_IN_PATH)
            .set_form(SignInRequest {
                email: " Bob@Example.com ".to_owned(),
                password: "password".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(ARTICLES_PATH));
}

#[rstest]
#[case(json!({ "email": "  ", "password": "password" }), "email")]
#[case(json!({ "email": "alice@example.com", "password": "" }), "password")]
#[case(json!({ "password": "password" }), "email")]
#[actix_web::test]
async fn blank_fields_are_rejected(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(SIGN_IN_PATH)
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[case("alice@example.com", "wrong")]
#[case("nobody@example.com", "password")]
#[actix_web::test]
async fn wrong_credentials_are_unauthorised(#[case] email: &str, #[case] password: &str) {
    let app = actix_test::init_service(test_app()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(SIGN_IN_PATH)
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn sign_in_form_reports_session_state() {
    let app = actix_test::init_service(test_app()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(SIGN_IN_PATH).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["action"], SIGN_IN_PATH);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["fields"], json!(["email", "password"]));
    assert_eq!(body["signedIn"], false);
    assert!(body.get("notice").is_none());
}

#[rstest]
#[case(actix_test::TestRequest::delete())]
#[case(actix_test::TestRequest::get())]
#[actix_web::test]
async fn sign_out_ends_session_with_notice(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(SIGN_IN_PATH)
            .set_json(json!({ "email": "alice@example.com", "password": "password" }))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        request.uri("/users/sign_out").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(SIGN_IN_PATH));
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(ARTICLES_PATH)
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(SIGN_IN_PATH));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(SIGN_IN_PATH)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["signedIn"], false);
    assert_eq!(body["notice"], Notice::SignedOut.message());
}

#[actix_web::test]
async fn sign_out_without_session_still_redirects() {
    let app = actix_test::init_service(test_app()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/users/sign_out")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(SIGN_IN_PATH));
}
