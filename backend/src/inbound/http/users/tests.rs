//! Tests for user service API handlers.

use super::*;
use crate::domain::ports::{MockCurrentUserQuery, MockLoginService, MockRegistrationService};
use crate::domain::{EmailAddress, NO_SESSION_MESSAGE, UserId, Username};
use crate::inbound::http::error::json_config;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

fn alice() -> User {
    User::new(
        UserId::new(1).expect("fixture id"),
        Username::new("alice").expect("fixture username"),
        EmailAddress::new("alice@example.com").expect("fixture email"),
    )
}

struct Mocks {
    registration: MockRegistrationService,
    login: MockLoginService,
    current_user: MockCurrentUserQuery,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            registration: MockRegistrationService::new(),
            login: MockLoginService::new(),
            current_user: MockCurrentUserQuery::new(),
        }
    }
}

fn test_app(
    mocks: Mocks,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = UserServiceState {
        registration: Arc::new(mocks.registration),
        login: Arc::new(mocks.login),
        current_user: Arc::new(mocks.current_user),
    };
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(crate::inbound::http::test_utils::test_session_middleware())
        .service(register)
        .service(login)
        .service(current_user)
}

async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(&LoginRequest {
            username: "alice".into(),
            password: "s3cret".into(),
        })
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

#[actix_web::test]
async fn register_returns_created_with_message() {
    let mut mocks = Mocks::default();
    mocks
        .registration
        .expect_register()
        .withf(|registration| {
            registration.username().as_str() == "alice"
                && registration.email().as_str() == "alice@example.com"
                && registration.password() == "s3cret"
        })
        .times(1)
        .returning(|_| Ok(alice()));
    let app = actix_test::init_service(test_app(mocks)).await;

    let request = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(&RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "s3cret".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], REGISTRATION_SUCCESS_MESSAGE);
}

#[rstest]
#[case::missing_username(r#"{"email":"a@example.com","password":"pw"}"#, "Username is required", "username")]
#[case::blank_username(r#"{"username":"  ","email":"a@example.com","password":"pw"}"#, "Username is required", "username")]
#[case::missing_email(r#"{"username":"alice","password":"pw"}"#, "Email is required", "email")]
#[case::empty_password(r#"{"username":"alice","email":"a@example.com","password":""}"#, "Password is required", "password")]
#[actix_web::test]
async fn register_rejects_missing_fields(
    #[case] body: &'static str,
    #[case] message: &str,
    #[case] field: &str,
) {
    let app = actix_test::init_service(test_app(Mocks::default())).await;
    let request = actix_test::TestRequest::post()
        .uri("/register")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["error"], message);
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["field"], field);
    assert_eq!(value["details"]["code"], "required");
}

#[actix_web::test]
async fn register_surfaces_conflicts() {
    let mut mocks = Mocks::default();
    mocks
        .registration
        .expect_register()
        .returning(|_| Err(Error::conflict("Username already exists")));
    let app = actix_test::init_service(test_app(mocks)).await;

    let request = actix_test::TestRequest::post()
        .uri("/register")
        .set_json(&RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "s3cret".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["error"], "Username already exists");
}

#[actix_web::test]
async fn login_returns_user_and_sets_session_cookie() {
    let mut mocks = Mocks::default();
    mocks
        .login
        .expect_authenticate()
        .withf(|credentials| {
            credentials.username().as_str() == "alice" && credentials.password() == "s3cret"
        })
        .times(1)
        .returning(|_| Ok(alice()));
    let app = actix_test::init_service(test_app(mocks)).await;

    let request = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(&LoginRequest {
            username: "alice".into(),
            password: "s3cret".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.response().cookies().any(|c| c.name() == "session"));
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["message"], LOGIN_SUCCESS_MESSAGE);
    assert_eq!(value["user"]["id"], 1);
    assert_eq!(value["user"]["username"], "alice");
    assert_eq!(value["user"]["email"], "alice@example.com");
}

#[rstest]
#[case::wrong_password(Error::unauthorized("Invalid password"), StatusCode::UNAUTHORIZED)]
#[case::unknown_user(Error::not_found("User not found"), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn login_failures_do_not_set_a_session(#[case] error: Error, #[case] status: StatusCode) {
    let expected_message = error.message().to_owned();
    let mut mocks = Mocks::default();
    mocks
        .login
        .expect_authenticate()
        .returning(move |_| Err(error.clone()));
    let app = actix_test::init_service(test_app(mocks)).await;

    let request = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(&LoginRequest {
            username: "alice".into(),
            password: "wrong".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    assert!(!response.response().cookies().any(|c| c.name() == "session"));
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["error"], expected_message.as_str());
}

#[actix_web::test]
async fn login_rejects_blank_username_before_calling_the_service() {
    let mut mocks = Mocks::default();
    mocks.login.expect_authenticate().never();
    let app = actix_test::init_service(test_app(mocks)).await;

    let request = actix_test::TestRequest::post()
        .uri("/login")
        .set_json(&LoginRequest {
            username: "   ".into(),
            password: "pw".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["error"], "Username is required");
}

#[actix_web::test]
async fn me_returns_the_session_user() {
    let mut mocks = Mocks::default();
    mocks.login.expect_authenticate().returning(|_| Ok(alice()));
    mocks
        .current_user
        .expect_current_user()
        .withf(|id| id.get() == 1)
        .times(1)
        .returning(|_| Ok(alice()));
    let app = actix_test::init_service(test_app(mocks)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/me")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["id"], 1);
    assert_eq!(value["username"], "alice");
    assert_eq!(value["email"], "alice@example.com");
    assert!(value.get("last_login").is_none());
}

#[actix_web::test]
async fn me_without_session_is_unauthorised() {
    let mut mocks = Mocks::default();
    mocks.current_user.expect_current_user().never();
    let app = actix_test::init_service(test_app(mocks)).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request())
            .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["error"], NO_SESSION_MESSAGE);
    assert_eq!(value["code"], "unauthorized");
}

#[actix_web::test]
async fn me_for_deleted_user_is_unauthorised() {
    let mut mocks = Mocks::default();
    mocks.login.expect_authenticate().returning(|_| Ok(alice()));
    mocks
        .current_user
        .expect_current_user()
        .returning(|_| Err(Error::unauthorized(NO_SESSION_MESSAGE)));
    let app = actix_test::init_service(test_app(mocks)).await;
    let cookie = login_and_get_cookie(&app).await;

    let request = actix_test::TestRequest::get()
        .uri("/me")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
