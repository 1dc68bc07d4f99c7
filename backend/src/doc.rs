//! OpenAPI document for the noticeboard HTTP surface.
//!
//! [`ApiDoc`] collects every handler annotated with `#[utoipa::path]`, the
//! request and response DTOs, and the session cookie security scheme. Swagger
//! UI serves it in debug builds; `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::news::{
    CommentForm, CommentFormPage, CommentResponse, NewsDetailResponse, NewsPage, NewsResponse,
};
use crate::inbound::http::notes::{DoneResponse, NoteForm, NoteFormPage, NoteResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginPage, LoginRequest, LogoutResponse};

/// Name of the session cookie security scheme.
pub const SESSION_SCHEME: &str = "SessionCookie";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            SESSION_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Noticeboard API",
        description = "Private notes, a public news feed, and moderated comments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::news::home,
        crate::inbound::http::news::news_detail,
        crate::inbound::http::news::create_comment,
        crate::inbound::http::news::edit_comment_form,
        crate::inbound::http::news::edit_comment,
        crate::inbound::http::news::delete_comment_confirm,
        crate::inbound::http::news::delete_comment,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::add_note_form,
        crate::inbound::http::notes::add_note,
        crate::inbound::http::notes::done,
        crate::inbound::http::notes::note_detail,
        crate::inbound::http::notes::edit_note_form,
        crate::inbound::http::notes::edit_note,
        crate::inbound::http::notes::delete_note_confirm,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::notes::delete_note_verb,
        crate::inbound::http::users::login_page,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout_page,
        crate::inbound::http::users::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        NewsResponse,
        NewsPage,
        NewsDetailResponse,
        CommentResponse,
        CommentForm,
        CommentFormPage,
        NoteResponse,
        NoteForm,
        NoteFormPage,
        DoneResponse,
        LoginRequest,
        LoginPage,
        LogoutResponse,
    )),
    tags(
        (name = "news", description = "Public news feed"),
        (name = "comments", description = "Comments on news items"),
        (name = "notes", description = "Private notes owned by the logged-in user"),
        (name = "users", description = "Login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
