//! Login and logout handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"ada@example.edu","password":"password"}
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned when either login field is missing or blank.
pub const INVALID_LOGIN_DATA_MESSAGE: &str = "Invalid login data.";

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ada@example.edu")]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Always 200; kept for clients that read it from the body.
    pub status_code: u16,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    /// Numeric account type: 1 admin, 2 student.
    #[schema(example = 2)]
    pub user_type: i16,
    pub user_id: i32,
}

impl From<&User> for LoginResponse {
    fn from(user: &User) -> Self {
        Self {
            status_code: 200,
            full_name: user.display_name(),
            user_type: user.user_type().code(),
            user_id: user.id().get(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(INVALID_LOGIN_DATA_MESSAGE)
        .with_details(json!({ "field": field, "code": format!("empty_{field}") }))
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing email or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Option<web::Json<LoginRequest>>,
) -> ApiResult<web::Json<LoginResponse>> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    let credentials = LoginCredentials::try_from(request).map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(user.id())?;
    tracing::info!(user_id = %user.id(), "user logged in");
    Ok(web::Json(LoginResponse::from(&user)))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}
