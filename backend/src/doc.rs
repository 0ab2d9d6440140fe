//! OpenAPI documentation configuration.
//!
//! Each service publishes its own document:
//!
//! - [`UserServiceApiDoc`]: registration, login, `/me` and health probes
//! - [`TrackerApiDoc`]: habits, statistics, motivation and health probes
//!
//! Error payloads are described through [`ErrorSchema`] and
//! [`ErrorCodeSchema`] so domain types stay free of utoipa derives. Both
//! documents carry the session cookie security scheme; the tracker forwards
//! the same cookie to the user service to resolve the caller.
//!
//! The documents back Swagger UI in debug builds and are exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::habits::{
    CreateHabitRequest, CreateHabitResponse, CreatedHabit, HabitResponse, HabitStatsResponse,
    TrackHabitResponse,
};
use crate::inbound::http::motivation::QuoteResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme registered on both documents.
pub const SESSION_SECURITY_SCHEME: &str = "SessionCookie";

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            SESSION_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login on the user service.",
            ))),
        );
    }
}

/// OpenAPI document for the user service.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Habit tracker user service",
        description = "Account registration, session login and identity lookup."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        MessageResponse,
        UserResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Account and session operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct UserServiceApiDoc;

/// OpenAPI document for the tracker service.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Habit tracker service",
        description = "Habit creation, completion tracking, statistics and motivation quotes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::habits::create_habit,
        crate::inbound::http::habits::list_habits,
        crate::inbound::http::habits::track_habit,
        crate::inbound::http::habits::habit_stats,
        crate::inbound::http::motivation::motivation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateHabitRequest,
        CreateHabitResponse,
        CreatedHabit,
        HabitResponse,
        TrackHabitResponse,
        HabitStatsResponse,
        QuoteResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "habits", description = "Habit tracking operations"),
        (name = "motivation", description = "Motivational quotes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct TrackerApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case::user_service(UserServiceApiDoc::openapi())]
    #[case::tracker(TrackerApiDoc::openapi())]
    fn error_schema_exposes_wire_fields(#[case] doc: utoipa::openapi::OpenApi) {
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "error");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    #[case::user_service(UserServiceApiDoc::openapi())]
    #[case::tracker(TrackerApiDoc::openapi())]
    fn session_cookie_scheme_is_registered(#[case] doc: utoipa::openapi::OpenApi) {
        let components = doc.components.expect("components");
        assert!(
            components
                .security_schemes
                .contains_key(SESSION_SECURITY_SCHEME)
        );
    }

    #[rstest]
    #[case("/register")]
    #[case("/login")]
    #[case("/me")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn user_service_document_lists_path(#[case] path: &str) {
        let doc = UserServiceApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("/habits")]
    #[case("/habits/{id}/track")]
    #[case("/habits/{id}/stats")]
    #[case("/motivation")]
    #[case("/health/ready")]
    fn tracker_document_lists_path(#[case] path: &str) {
        let doc = TrackerApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn documents_do_not_share_business_paths() {
        let users = UserServiceApiDoc::openapi();
        let tracker = TrackerApiDoc::openapi();
        assert!(!users.paths.paths.contains_key("/habits"));
        assert!(!tracker.paths.paths.contains_key("/register"));
    }
}
