//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP path together with the schema
//! wrappers from [`crate::inbound::http::schemas`], so domain types stay free
//! of utoipa derives. Swagger UI serves it in debug builds.

use crate::inbound::http::courses::CourseBody;
use crate::inbound::http::enrollments::{
    EnrollmentCreatedBody, EnrollmentListBody, EnrollmentRequestBody, EnrollmentRowBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::students::StudentBody;
use crate::inbound::http::users::{LoginRequest, LoginResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Register the session cookie issued by login.
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
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the registrar REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Registrar API",
        description = "Course enrollment, catalogue and roster endpoints with health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::enrollments::list_enrollments,
        crate::inbound::http::enrollments::create_enrollment,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        EnrollmentRequestBody,
        EnrollmentRowBody,
        EnrollmentListBody,
        EnrollmentCreatedBody,
        CourseBody,
        StudentBody,
        LoginRequest,
        LoginResponse
    )),
    tags(
        (name = "enrollments", description = "Enroll students and list enrollments"),
        (name = "courses", description = "Course catalogue"),
        (name = "students", description = "Student roster"),
        (name = "users", description = "Login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[test]
    fn error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        for field in ["code", "message", "traceId", "details"] {
            assert!(object_has_field(error_schema, field), "missing {field}");
        }
    }

    #[rstest]
    #[case("/api/v1/enrollments")]
    #[case("/api/v1/courses/{id}")]
    #[case("/api/v1/students/{id}")]
    #[case("/api/v1/login")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
