//! Response capture shared by the HTTP behaviour suites.
//!
//! Each suite rebuilds its app per request over long-lived in-memory
//! adapters, so state survives between steps while the service stack stays
//! fresh.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test;
use habit_tracker::domain::TRACE_ID_HEADER;
use habit_tracker::domain::ports::SESSION_COOKIE_NAME;
use serde_json::Value;

/// What a step observed from one request.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub status: u16,
    pub trace_id: Option<String>,
    /// `session=<value>` when the response set the session cookie.
    pub session_cookie: Option<String>,
    pub body: Value,
}

impl Exchange {
    pub async fn read<B>(res: ServiceResponse<B>) -> Self
    where
        B: MessageBody,
    {
        let status = res.status().as_u16();
        let trace_id = res
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let session_cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .map(|cookie| format!("{}={}", cookie.name(), cookie.value()));
        let bytes = test::read_body(res).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON response body")
        };
        Self {
            status,
            trace_id,
            session_cookie,
            body,
        }
    }

    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }

    /// Assert the body is an error envelope echoing the response trace id.
    pub fn assert_error(&self, status: u16, code: &str) {
        assert_eq!(self.status, status, "unexpected status, body: {}", self.body);
        assert_eq!(self.str_at("/code"), Some(code));
        let trace_id = self.trace_id.as_deref().expect("trace id header");
        assert_eq!(self.str_at("/traceId"), Some(trace_id));
    }
}
