//! End-to-end tests for the catalogue, roster and login endpoints over the
//! in-memory record store.

use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use registrar::domain::{Course, CourseId, User, UserDraft, UserId, UserType};
use registrar::inbound::http::health::HealthState;
use registrar::outbound::memory::InMemoryRecordStore;
use registrar::server::{AppDependencies, build_app, http_state_in_memory};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn user(id: i32, first: &str, last: &str, user_type: UserType) -> User {
    User::new(UserDraft {
        id: UserId::new(id),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: format!("{}@example.edu", first.to_lowercase()),
        user_type,
        account_created_on: date(2023, 8, 28),
    })
}

fn seeded_store() -> InMemoryRecordStore {
    InMemoryRecordStore::new()
        .with_user(user(1, "Grace", "Hopper", UserType::Admin), "cobol")
        .with_user(user(7, "Ada", "Lovelace", UserType::Student), "analytical")
        .with_course(Course {
            id: CourseId::new(3),
            name: "Algorithms 101".to_owned(),
            description: "Sorting and searching".to_owned(),
            max_seats: 30,
            current_seats: 12,
            start_date: date(2024, 9, 1),
            end_date: date(2024, 12, 20),
        })
}

async fn app(
    store: InMemoryRecordStore,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    actix_test::init_service(build_app(AppDependencies {
        health_state,
        http_state: web::Data::new(http_state_in_memory(
            Arc::new(store),
            Arc::new(DefaultClock),
        )),
        key: Key::generate(),
        cookie_secure: false,
    }))
    .await
}

async fn get_json(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
) -> (StatusCode, Value) {
    let response =
        actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[actix_web::test]
async fn course_catalogue_is_served_from_the_store() {
    let app = app(seeded_store()).await;

    let (status, body) = get_json(&app, "/api/v1/courses").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["courseName"], "Algorithms 101");
    assert_eq!(body[0]["currentSeats"], 12);

    let (status, body) = get_json(&app, "/api/v1/courses/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["courseId"], 3);

    let (status, body) = get_json(&app, "/api/v1/courses/4").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course with ID 4 not found.");
}

#[rstest]
#[case("/api/v1/students/7", StatusCode::OK)]
#[case("/api/v1/students/1", StatusCode::NOT_FOUND)]
#[case("/api/v1/students/99", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn only_students_are_on_the_roster(#[case] uri: &str, #[case] expected: StatusCode) {
    let app = app(seeded_store()).await;

    let (status, _) = get_json(&app, uri).await;

    assert_eq!(status, expected);
}

#[actix_web::test]
async fn roster_lists_students_and_empty_stores_are_not_found() {
    let seeded = app(seeded_store()).await;
    let (status, body) = get_json(&seeded, "/api/v1/students").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.edu",
            "enrollmentDate": "2023-08-28",
            "userId": 7,
        }])
    );

    let empty = app(InMemoryRecordStore::new()).await;
    let (status, body) = get_json(&empty, "/api/v1/students").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No students found.");
    let (status, body) = get_json(&empty, "/api/v1/courses").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No courses found.");
}

#[rstest]
#[case("ada@example.edu", "analytical", StatusCode::OK)]
#[case("ada@example.edu", "Analytical", StatusCode::UNAUTHORIZED)]
#[case("nobody@example.edu", "analytical", StatusCode::UNAUTHORIZED)]
#[case("", "analytical", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn login_checks_credentials_against_the_store(
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: StatusCode,
) {
    let app = app(seeded_store()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), expected);
    if expected == StatusCode::OK {
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({ "statusCode": 200, "fullName": "Ada Lovelace", "userType": 2, "userId": 7 })
        );
    }
}

#[actix_web::test]
async fn health_probes_are_mounted_outside_the_api_scope() {
    let app = app(InMemoryRecordStore::new()).await;

    for uri in ["/health/ready", "/health/live"] {
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}
