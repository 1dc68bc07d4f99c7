//! Notes API handlers.
//!
//! ```text
//! GET  /notes/              own notes
//! GET  /add/  POST /add/    add form / submit
//! GET  /done/               success page
//! GET  /note/{slug}/        detail
//! GET  /edit/{slug}/  POST  edit form / submit
//! GET  /delete/{slug}/  POST|DELETE  confirm / submit
//! ```
//!
//! Every route requires a login. Successful writes redirect to
//! [`SUCCESS_PATH`].

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Action, Note, NoteDraft, acting_user};
use crate::inbound::http::ApiResult;
use crate::inbound::http::form::Submission;
use crate::inbound::http::redirect::{SUCCESS_PATH, found};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Note as returned to its author.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Заголовок")]
    pub title: String,
    pub text: String,
    #[schema(example = "zagolovok")]
    pub slug: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub author: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.get(),
            title: note.title,
            text: note.text,
            slug: note.slug,
            author: note.author.to_string(),
        }
    }
}

/// Submitted or prefilled note form.
///
/// An empty or missing `slug` is derived from the title.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl From<NoteForm> for NoteDraft {
    fn from(form: NoteForm) -> Self {
        Self {
            title: form.title,
            text: form.text,
            slug: form.slug,
        }
    }
}

impl From<NoteDraft> for NoteForm {
    fn from(draft: NoteDraft) -> Self {
        Self {
            title: draft.title,
            text: draft.text,
            slug: draft.slug,
        }
    }
}

/// Form page payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteFormPage {
    pub form: NoteForm,
}

/// Body of the success page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoneResponse {
    #[schema(example = "done")]
    pub status: String,
}

/// List the principal's own notes ordered by id.
#[utoipa::path(
    get,
    path = "/notes/",
    responses(
        (status = 200, description = "Own notes", body = [NoteResponse]),
        (status = 302, description = "Login required"),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes/")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<NoteResponse>>> {
    let principal = session.principal()?;
    let notes = state.notes_query.list_own(&principal).await?;
    Ok(web::Json(notes.into_iter().map(NoteResponse::from).collect()))
}

/// Empty add form.
#[utoipa::path(
    get,
    path = "/add/",
    responses(
        (status = 200, description = "Empty note form", body = NoteFormPage),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "addNoteForm"
)]
#[get("/add/")]
pub async fn add_note_form(session: SessionContext) -> ApiResult<web::Json<NoteFormPage>> {
    let principal = session.principal()?;
    acting_user(&principal, Action::Create)?;
    Ok(web::Json(NoteFormPage {
        form: NoteForm::default(),
    }))
}

/// Create a note owned by the principal.
#[utoipa::path(
    post,
    path = "/add/",
    request_body = NoteForm,
    responses(
        (status = 302, description = "Created; redirects to /done/, or to login when anonymous"),
        (status = 400, description = "Field error with the submitted form echoed back", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "addNote"
)]
#[post("/add/")]
pub async fn add_note(
    state: web::Data<HttpState>,
    submission: Submission<NoteForm>,
) -> ApiResult<HttpResponse> {
    let Submission { principal, form } = submission;
    state.notes.create(&principal, form.into()).await?;
    Ok(found(SUCCESS_PATH))
}

/// Success page shown after a note write.
#[utoipa::path(
    get,
    path = "/done/",
    responses(
        (status = 200, description = "Success", body = DoneResponse),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "noteDone"
)]
#[get("/done/")]
pub async fn done(session: SessionContext) -> ApiResult<web::Json<DoneResponse>> {
    let principal = session.principal()?;
    acting_user(&principal, Action::ViewList)?;
    Ok(web::Json(DoneResponse {
        status: "done".to_owned(),
    }))
}

/// Show one of the principal's notes.
#[utoipa::path(
    get,
    path = "/note/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note", body = NoteResponse),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or owned by someone else", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "noteDetail"
)]
#[get("/note/{slug}/")]
pub async fn note_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<web::Json<NoteResponse>> {
    let principal = session.principal()?;
    let note = state
        .notes_query
        .note(&principal, &slug, Action::ViewDetail)
        .await?;
    Ok(web::Json(note.into()))
}

/// Edit form prefilled with the note's current values.
#[utoipa::path(
    get,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Prefilled note form", body = NoteFormPage),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or owned by someone else", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "editNoteForm"
)]
#[get("/edit/{slug}/")]
pub async fn edit_note_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<web::Json<NoteFormPage>> {
    let principal = session.principal()?;
    let note = state
        .notes_query
        .note(&principal, &slug, Action::Edit)
        .await?;
    Ok(web::Json(NoteFormPage {
        form: NoteDraft::from_note(&note).into(),
    }))
}

/// Replace a note's title, text, and slug.
#[utoipa::path(
    post,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Current note slug")),
    request_body = NoteForm,
    responses(
        (status = 302, description = "Updated; redirects to /done/, or to login when anonymous"),
        (status = 400, description = "Field error with the submitted form echoed back", body = ErrorSchema),
        (status = 404, description = "Missing or owned by someone else", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "editNote"
)]
#[post("/edit/{slug}/")]
pub async fn edit_note(
    state: web::Data<HttpState>,
    slug: web::Path<String>,
    submission: Submission<NoteForm>,
) -> ApiResult<HttpResponse> {
    let Submission { principal, form } = submission;
    state.notes.edit(&principal, &slug, form.into()).await?;
    Ok(found(SUCCESS_PATH))
}

/// Delete confirmation page.
#[utoipa::path(
    get,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note about to be deleted", body = NoteResponse),
        (status = 302, description = "Login required"),
        (status = 404, description = "Missing or owned by someone else", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "deleteNoteConfirm"
)]
#[get("/delete/{slug}/")]
pub async fn delete_note_confirm(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<web::Json<NoteResponse>> {
    let principal = session.principal()?;
    let note = state
        .notes_query
        .note(&principal, &slug, Action::Delete)
        .await?;
    Ok(web::Json(note.into()))
}

async fn remove_note(state: &HttpState, session: &SessionContext, slug: &str) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    state.notes.delete(&principal, slug).await?;
    Ok(found(SUCCESS_PATH))
}

/// Delete a note.
#[utoipa::path(
    post,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Deleted; redirects to /done/, or to login when anonymous"),
        (status = 404, description = "Missing or owned by someone else", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[post("/delete/{slug}/")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    remove_note(&state, &session, &slug).await
}

/// Delete a note using the `DELETE` verb.
#[utoipa::path(
    delete,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Deleted; redirects to /done/, or to login when anonymous"),
        (status = 404, description = "Missing or owned by someone else", body = ErrorSchema)
    ),
    tags = ["notes"],
    operation_id = "deleteNoteVerb"
)]
#[delete("/delete/{slug}/")]
pub async fn delete_note_verb(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    remove_note(&state, &session, &slug).await
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
