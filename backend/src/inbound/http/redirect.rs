//! Redirect targets shared by the form handlers.

use actix_web::HttpResponse;
use actix_web::http::header;

use crate::domain::NewsId;

/// Where note create, edit, and delete land on success.
pub const SUCCESS_PATH: &str = "/done/";

/// Fallback destination after login.
pub const HOME_PATH: &str = "/";

/// Comment section anchor of a news detail page.
#[must_use]
pub fn comments_url(news: NewsId) -> String {
    format!("/news/{news}/#comments")
}

/// `302 Found` to `location`.
#[must_use]
pub fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Accept a post-login destination only when it stays on this site.
///
/// Relative paths are allowed; scheme-relative (`//host`) and absolute URLs
/// fall back to [`HOME_PATH`].
#[must_use]
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => HOME_PATH,
    }
}
