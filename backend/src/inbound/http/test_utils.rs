//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use super::configure_routes;
use super::session::USER_ID_KEY;
use super::state::HttpState;
use crate::domain::UserId;
use crate::domain::ports::{
    MockCommentsCommand, MockLoginService, MockNewsQuery, MockNotesCommand, MockNotesQuery,
};
use crate::middleware::LoginRedirect;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub notes: MockNotesCommand,
    pub notes_query: MockNotesQuery,
    pub news: MockNewsQuery,
    pub comments: MockCommentsCommand,
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.login),
            Arc::new(self.notes),
            Arc::new(self.notes_query),
            Arc::new(self.news),
            Arc::new(self.comments),
        )
    }
}

/// Route that logs the given user in without credentials.
pub const TEST_LOGIN_PATH: &str = "/__test/login/{user_id}";

async fn force_login(session: Session, user_id: web::Path<String>) -> HttpResponse {
    session
        .insert(USER_ID_KEY, user_id.into_inner())
        .expect("store user id");
    HttpResponse::Ok().finish()
}

/// Full page app wired to `state`, with the production middleware order.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_routes)
        .route(TEST_LOGIN_PATH, web::get().to(force_login))
        .wrap(LoginRedirect)
        .wrap(test_session_middleware())
}

/// Log `user` in and return the session cookie.
pub async fn login_cookie<S, B>(app: &S, user: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::get()
        .uri(&format!("/__test/login/{user}"))
        .to_request();
    let response = test::call_service(app, request).await;
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Value of the `Location` header.
pub fn location<B>(response: &ServiceResponse<B>) -> Option<&str> {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
