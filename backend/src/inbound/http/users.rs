//! Login and logout handlers.
//!
//! ```text
//! GET  /auth/login/?next=/add/
//! POST /auth/login/?next=/add/ {"username":"author","password":"secret"}
//! GET|POST /auth/logout/
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirect::{found, safe_next};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "author")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Destination after a successful login.
#[derive(Debug, Deserialize, IntoParams)]
pub struct NextQuery {
    /// Local path to return to; anything else falls back to `/`.
    pub next: Option<String>,
}

/// Login page payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    /// Where the visitor will land after logging in.
    #[schema(example = "/add/")]
    pub next: String,
}

/// Logout confirmation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub logged_out: bool,
}

/// Login page.
#[utoipa::path(
    get,
    path = "/auth/login/",
    params(NextQuery),
    responses((status = 200, description = "Login page", body = LoginPage)),
    tags = ["users"],
    operation_id = "loginPage",
    security([])
)]
#[get("/auth/login/")]
pub async fn login_page(query: web::Query<NextQuery>) -> web::Json<LoginPage> {
    web::Json(LoginPage {
        next: safe_next(query.next.as_deref()).to_owned(),
    })
}

/// Authenticate and establish a session, then redirect to `next`.
#[utoipa::path(
    post,
    path = "/auth/login/",
    params(NextQuery),
    request_body = LoginRequest,
    responses(
        (status = 302, description = "Logged in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(found(safe_next(query.next.as_deref())))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn logged_out(session: &SessionContext) -> web::Json<LogoutResponse> {
    session.clear();
    web::Json(LogoutResponse { logged_out: true })
}

/// Drop the session.
#[utoipa::path(
    get,
    path = "/auth/logout/",
    responses((status = 200, description = "Logged out", body = LogoutResponse)),
    tags = ["users"],
    operation_id = "logoutPage",
    security([])
)]
#[get("/auth/logout/")]
pub async fn logout_page(session: SessionContext) -> web::Json<LogoutResponse> {
    logged_out(&session)
}

/// Drop the session.
#[utoipa::path(
    post,
    path = "/auth/logout/",
    responses((status = 200, description = "Logged out", body = LogoutResponse)),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout/")]
pub async fn logout(session: SessionContext) -> web::Json<LogoutResponse> {
    logged_out(&session)
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
