//! Enrollment API handlers.
//!
//! ```text
//! GET /api/v1/enrollments
//! POST /api/v1/enrollments {"studentName":"Ada Lovelace","courseName":"Algorithms 101"}
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    EnrollmentError, EnrollmentReceipt, EnrollmentRequest, EnrollmentView, Error,
    format_short_date,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Column captions returned alongside the enrollment rows.
pub const ENROLLMENT_HEADERS: [&str; 4] = [
    "StudentName",
    "CourseName",
    "CompletionStatus",
    "EnrollmentDate",
];

/// Request body for `POST /api/v1/enrollments`.
///
/// Both fields are optional at the wire level so a missing name reports the
/// same validation message as an empty one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequestBody {
    /// Student full name, matched verbatim.
    #[serde(default)]
    #[schema(example = "Ada Lovelace")]
    pub student_name: Option<String>,
    /// Course name, matched verbatim.
    #[serde(default)]
    #[schema(example = "Algorithms 101")]
    pub course_name: Option<String>,
}

/// One row of the enrollment listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRowBody {
    /// Student display name or `Unknown`.
    pub student_name: String,
    /// Course name or `Unknown`.
    pub course_name: String,
    /// `"0"` active, `"1"` completed, `"2"` withdrawn.
    #[schema(example = "0")]
    pub completion_status: String,
    /// Enrollment date as `M/D/YYYY`.
    #[schema(example = "9/1/2024")]
    pub enrollment_date: String,
}

impl From<EnrollmentView> for EnrollmentRowBody {
    fn from(value: EnrollmentView) -> Self {
        Self {
            student_name: value.student_name,
            course_name: value.course_name,
            completion_status: value.completion_status,
            enrollment_date: value.enrollment_date,
        }
    }
}

/// Response body for `GET /api/v1/enrollments`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentListBody {
    /// Column captions, in display order.
    pub headers: Vec<String>,
    /// One entry per enrollment record.
    pub data: Vec<EnrollmentRowBody>,
}

/// Response body for a successful `POST /api/v1/enrollments`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentCreatedBody {
    /// Confirmation message for display.
    pub message: String,
    /// Identifier of the new record.
    pub enrollment_id: i32,
    /// Student name as supplied.
    pub student_name: String,
    /// Course name as supplied.
    pub course_name: String,
    /// Always `"0"` for a new enrollment.
    pub completion_status: String,
    /// Enrollment date as `M/D/YYYY`.
    pub enrollment_date: String,
}

impl From<EnrollmentReceipt> for EnrollmentCreatedBody {
    fn from(receipt: EnrollmentReceipt) -> Self {
        Self {
            message: receipt.confirmation(),
            enrollment_id: receipt.enrollment.id.get(),
            completion_status: receipt.enrollment.status.code().to_owned(),
            enrollment_date: format_short_date(receipt.enrollment.enrolled_on),
            student_name: receipt.student_name.as_ref().to_owned(),
            course_name: receipt.course_name.as_ref().to_owned(),
        }
    }
}

/// List every enrollment with resolved student and course names.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments",
    responses(
        (status = 200, description = "Enrollments", body = EnrollmentListBody),
        (status = 404, description = "No enrollments recorded", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollments",
    security([])
)]
#[get("/enrollments")]
pub async fn list_enrollments(state: web::Data<HttpState>) -> ApiResult<web::Json<EnrollmentListBody>> {
    let views = state.enrollments_query.list_enrollments().await?;
    Ok(web::Json(EnrollmentListBody {
        headers: ENROLLMENT_HEADERS.iter().map(|h| (*h).to_owned()).collect(),
        data: views.into_iter().map(EnrollmentRowBody::from).collect(),
    }))
}

/// Enroll a student in a course by name.
///
/// A missing or unparsable body is reported with the same message as empty
/// names.
#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    request_body = EnrollmentRequestBody,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentCreatedBody,
            headers(("Location" = String, description = "URI of the new enrollment"))),
        (status = 400, description = "Invalid request or active enrollment limit reached", body = ErrorSchema),
        (status = 404, description = "Student or course not found", body = ErrorSchema),
        (status = 409, description = "Already enrolled", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["enrollments"],
    operation_id = "createEnrollment",
    security([])
)]
#[post("/enrollments")]
pub async fn create_enrollment(
    state: web::Data<HttpState>,
    payload: Option<web::Json<EnrollmentRequestBody>>,
) -> ApiResult<HttpResponse> {
    let body = payload.map(web::Json::into_inner).unwrap_or_default();
    let request = EnrollmentRequest::from_parts(body.student_name, body.course_name)
        .ok_or_else(|| Error::from(EnrollmentError::InvalidRequest))?;

    let receipt = state.enrollments.enroll(request).await?;
    let location = format!("/api/v1/enrollments/{}", receipt.enrollment.id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(EnrollmentCreatedBody::from(receipt)))
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
