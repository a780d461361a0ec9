//! Course catalogue handlers.
//!
//! ```text
//! GET /api/v1/courses
//! GET /api/v1/courses/3
//! ```

use actix_web::{get, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Course, CourseId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Course as returned by the catalogue endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    /// Store identifier.
    pub course_id: i32,
    /// Course name as used in enrollment requests.
    #[schema(example = "Algorithms 101")]
    pub course_name: String,
    /// Free-text description.
    pub description: String,
    /// Advertised seat count.
    pub max_seats: i32,
    /// Seats taken, as recorded.
    pub current_seats: i32,
    /// First day of the course.
    pub start_date: NaiveDate,
    /// Last day of the course.
    pub end_date: NaiveDate,
}

impl From<Course> for CourseBody {
    fn from(course: Course) -> Self {
        Self {
            course_id: course.id.get(),
            course_name: course.name,
            description: course.description,
            max_seats: course.max_seats,
            current_seats: course.current_seats,
            start_date: course.start_date,
            end_date: course.end_date,
        }
    }
}

/// List every course.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "Courses", body = [CourseBody]),
        (status = 404, description = "No courses recorded", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CourseBody>>> {
    let courses = state.courses.list_courses().await?;
    Ok(web::Json(courses.into_iter().map(CourseBody::from).collect()))
}

/// Fetch one course by id.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = i32, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseBody),
        (status = 404, description = "Unknown course", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse",
    security([])
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CourseBody>> {
    let course = state
        .courses
        .get_course(CourseId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CourseBody::from(course)))
}
