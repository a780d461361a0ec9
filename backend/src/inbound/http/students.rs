//! Student roster handlers.
//!
//! ```text
//! GET /api/v1/students
//! GET /api/v1/students/7
//! ```

use actix_web::{get, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Student as returned by the roster endpoints.
///
/// `enrollmentDate` is the day the account was created.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentBody {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    pub email: String,
    pub enrollment_date: NaiveDate,
    pub user_id: i32,
}

impl From<User> for StudentBody {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email: user.email().to_owned(),
            enrollment_date: user.account_created_on(),
            user_id: user.id().get(),
        }
    }
}

/// List every user with the student type.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students", body = [StudentBody]),
        (status = 404, description = "No students recorded", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents",
    security([])
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<StudentBody>>> {
    let students = state.students.list_students().await?;
    Ok(web::Json(students.into_iter().map(StudentBody::from).collect()))
}

/// Fetch one student by user id.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Student", body = StudentBody),
        (status = 404, description = "Unknown student", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent",
    security([])
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<StudentBody>> {
    let student = state
        .students
        .get_student(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(StudentBody::from(student)))
}
