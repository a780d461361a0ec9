//! Tests for enrollment HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockEnrollmentCommand, MockEnrollmentQuery};
use crate::domain::{CompletionStatus, CourseId, Enrollment, EnrollmentId, UserId};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::fixture_ports;

const INVALID_MESSAGE: &str =
    "Invalid enrollment request. Please provide both student name and course name.";

fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .service(
            web::scope("/api/v1")
                .service(list_enrollments)
                .service(create_enrollment),
        )
}

fn receipt_for(request: &EnrollmentRequest, id: i32) -> EnrollmentReceipt {
    EnrollmentReceipt {
        enrollment: Enrollment {
            id: EnrollmentId::new(id),
            student_id: UserId::new(7),
            course_id: CourseId::new(3),
            enrolled_on: NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date"),
            status: CompletionStatus::Active,
        },
        student_name: request.student_name.clone(),
        course_name: request.course_name.clone(),
    }
}

async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[actix_web::test]
async fn create_returns_created_with_location_and_receipt() {
    let mut command = MockEnrollmentCommand::new();
    command
        .expect_enroll()
        .withf(|request| {
            request.student_name.as_ref() == "Ada Lovelace"
                && request.course_name.as_ref() == "Algorithms 101"
        })
        .times(1)
        .returning(|request| Ok(receipt_for(&request, 42)));
    let ports = HttpStatePorts {
        enrollments: Arc::new(command),
        ..fixture_ports()
    };
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/enrollments")
            .set_json(json!({ "studentName": "Ada Lovelace", "courseName": "Algorithms 101" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/api/v1/enrollments/42")
    );
    let body = read_json(response).await;
    assert_eq!(
        body,
        json!({
            "message": "Student 'Ada Lovelace' has been enrolled in 'Algorithms 101'.",
            "enrollmentId": 42,
            "studentName": "Ada Lovelace",
            "courseName": "Algorithms 101",
            "completionStatus": "0",
            "enrollmentDate": "9/1/2024",
        })
    );
}

#[rstest]
#[case::missing_course(json!({ "studentName": "Ada Lovelace" }))]
#[case::missing_student(json!({ "courseName": "Algorithms 101" }))]
#[case::empty_student(json!({ "studentName": "", "courseName": "Algorithms 101" }))]
#[case::empty_course(json!({ "studentName": "Ada Lovelace", "courseName": "" }))]
#[case::null_fields(json!({ "studentName": null, "courseName": null }))]
#[case::not_an_object(json!([1, 2, 3]))]
#[actix_web::test]
async fn create_rejects_incomplete_requests_without_calling_the_service(#[case] payload: Value) {
    let mut command = MockEnrollmentCommand::new();
    command.expect_enroll().times(0);
    let ports = HttpStatePorts {
        enrollments: Arc::new(command),
        ..fixture_ports()
    };
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/enrollments")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], INVALID_MESSAGE);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn create_without_a_body_is_an_invalid_request() {
    let app = actix_test::init_service(test_app(fixture_ports())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/enrollments")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], INVALID_MESSAGE);
}

#[rstest]
#[case(Error::not_found("Student 'Ada Lovelace' not found."), StatusCode::NOT_FOUND)]
#[case(
    Error::business_rule_violation("Student 'Ada Lovelace' is already enrolled in 3 active classes."),
    StatusCode::BAD_REQUEST
)]
#[case(
    Error::conflict("Student 'Ada Lovelace' is already enrolled in 'Algorithms 101'."),
    StatusCode::CONFLICT
)]
#[case(Error::service_unavailable("record store unavailable"), StatusCode::SERVICE_UNAVAILABLE)]
#[actix_web::test]
async fn create_passes_service_rejections_through(
    #[case] error: Error,
    #[case] expected: StatusCode,
) {
    let message = error.message().to_owned();
    let mut command = MockEnrollmentCommand::new();
    command
        .expect_enroll()
        .times(1)
        .returning(move |_| Err(error.clone()));
    let ports = HttpStatePorts {
        enrollments: Arc::new(command),
        ..fixture_ports()
    };
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/enrollments")
            .set_json(json!({ "studentName": "Ada Lovelace", "courseName": "Algorithms 101" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), expected);
    assert_eq!(read_json(response).await["message"], message.as_str());
}

#[actix_web::test]
async fn list_returns_headers_and_rows() {
    let mut query = MockEnrollmentQuery::new();
    query.expect_list_enrollments().times(1).returning(|| {
        Ok(vec![
            EnrollmentView {
                student_name: "Ada Lovelace".to_owned(),
                course_name: "Algorithms 101".to_owned(),
                completion_status: "0".to_owned(),
                enrollment_date: "9/1/2024".to_owned(),
            },
            EnrollmentView {
                student_name: "Unknown".to_owned(),
                course_name: "Compilers".to_owned(),
                completion_status: "1".to_owned(),
                enrollment_date: "1/15/2024".to_owned(),
            },
        ])
    });
    let ports = HttpStatePorts {
        enrollments_query: Arc::new(query),
        ..fixture_ports()
    };
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/enrollments")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["headers"],
        json!(["StudentName", "CourseName", "CompletionStatus", "EnrollmentDate"])
    );
    assert_eq!(
        body["data"][1],
        json!({
            "studentName": "Unknown",
            "courseName": "Compilers",
            "completionStatus": "1",
            "enrollmentDate": "1/15/2024",
        })
    );
}

#[actix_web::test]
async fn list_reports_an_empty_store_as_not_found() {
    let app = actix_test::init_service(test_app(fixture_ports())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/enrollments")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["message"], "No enrollments found.");
}
