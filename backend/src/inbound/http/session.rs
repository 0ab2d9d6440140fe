//! Cookie session access for the user service handlers.
//!
//! The session cookie carries a single value, the signed-in user's numeric id.
//! Login renews the session before storing it, so every successful login is
//! answered with a freshly encrypted cookie.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, NO_SESSION_MESSAGE, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Handler-facing view of the actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Sign `user_id` in, replacing whatever the previous cookie held.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The signed-in user, if any.
    ///
    /// A stored id that is not a valid user id is treated as signed out.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<i64>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| {
            UserId::new(raw)
                .inspect_err(|error| warn!(raw, %error, "discarding session with invalid user id"))
                .ok()
        }))
    }

    /// The signed-in user, or `401` with the "no user logged in" message.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized(NO_SESSION_MESSAGE))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SESSION_COOKIE_NAME;
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_web::cookie::Cookie;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    /// `/login/{id}` signs a user in, `/raw/{id}` writes an id without
    /// validation and `/me` echoes the signed-in id.
    async fn session_app()
    -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
        test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login/{id}",
                    web::post().to(|session: SessionContext, id: web::Path<i64>| async move {
                        let user = UserId::new(id.into_inner())
                            .map_err(|err| Error::invalid_request(err.to_string()))?;
                        session.persist_user(user)?;
                        Ok::<_, Error>(HttpResponse::NoContent())
                    }),
                )
                .route(
                    "/raw/{id}",
                    web::post().to(|session: Session, id: web::Path<i64>| async move {
                        session
                            .insert(USER_ID_KEY, id.into_inner())
                            .expect("write raw user id");
                        HttpResponse::NoContent()
                    }),
                )
                .route(
                    "/me",
                    web::get().to(|session: SessionContext| async move {
                        let user = session.require_user_id()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(user.to_string()))
                    }),
                ),
        )
        .await
    }

    fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .map(Cookie::into_owned)
            .expect("session cookie issued")
    }

    async fn login(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        id: i64,
        cookie: Option<Cookie<'static>>,
    ) -> Cookie<'static> {
        let mut req = test::TestRequest::post().uri(&format!("/login/{id}"));
        if let Some(cookie) = cookie {
            req = req.cookie(cookie);
        }
        let res = test::call_service(app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        session_cookie(&res)
    }

    async fn me(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        cookie: Option<Cookie<'static>>,
    ) -> (StatusCode, String) {
        let mut req = test::TestRequest::get().uri("/me");
        if let Some(cookie) = cookie {
            req = req.cookie(cookie);
        }
        let res = test::call_service(app, req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn login_cookie_identifies_the_user() {
        let app = session_app().await;
        let cookie = login(&app, 42, None).await;

        assert_eq!(me(&app, Some(cookie)).await, (StatusCode::OK, "42".to_owned()));
    }

    #[actix_web::test]
    async fn relogin_issues_a_fresh_cookie_for_the_new_user() {
        let app = session_app().await;
        let alice = login(&app, 1, None).await;
        let bob = login(&app, 2, Some(alice.clone())).await;

        assert_ne!(alice.value(), bob.value());
        assert_eq!(me(&app, Some(bob)).await, (StatusCode::OK, "2".to_owned()));
    }

    #[actix_web::test]
    async fn requests_without_a_session_get_the_no_user_message() {
        let app = session_app().await;
        let (status, body) = me(&app, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = serde_json::from_str(&body).expect("json error body");
        assert_eq!(body["error"], NO_SESSION_MESSAGE);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-7)]
    #[actix_web::test]
    async fn stored_ids_below_one_count_as_signed_out(#[case] raw: i64) {
        let app = session_app().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/raw/{raw}"))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&res);

        let (status, _) = me(&app, Some(cookie)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
