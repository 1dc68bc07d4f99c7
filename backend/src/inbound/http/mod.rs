//! HTTP inbound adapter exposing the notes, news, and login endpoints.

pub mod error;
pub mod form;
pub mod health;
pub mod news;
pub mod notes;
pub mod redirect;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every page route on `cfg`.
///
/// The caller wraps the routes in the session and login redirect middleware
/// and supplies [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use noticeboard::inbound::http::configure_routes;
///
/// let _app = App::new().configure(configure_routes);
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(news::home)
        .service(news::news_detail)
        .service(news::create_comment)
        .service(news::edit_comment_form)
        .service(news::edit_comment)
        .service(news::delete_comment_confirm)
        .service(news::delete_comment)
        .service(notes::list_notes)
        .service(notes::add_note_form)
        .service(notes::add_note)
        .service(notes::done)
        .service(notes::note_detail)
        .service(notes::edit_note_form)
        .service(notes::edit_note)
        .service(notes::delete_note_confirm)
        .service(notes::delete_note)
        .service(notes::delete_note_verb)
        .service(users::login_page)
        .service(users::login)
        .service(users::logout_page)
        .service(users::logout);
}
