//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and sending anonymous visitors to the login page.

pub mod login_redirect;
pub mod trace;

pub use login_redirect::{LOGIN_PATH, LoginRedirect, login_url};
pub use trace::Trace;
