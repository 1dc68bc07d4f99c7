//! Middleware sending anonymous visitors to the login page.
//!
//! Handlers report a missing login as `401 Unauthorized`. This middleware
//! rewrites those responses into `302 Found` pointing at [`LOGIN_PATH`] with
//! the original path and query in the `next` parameter. The login endpoint
//! itself is exempt so failed credentials still answer with the JSON error.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{StatusCode, header};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/login/";

/// Build the login URL carrying `next` as the post-login destination.
///
/// # Examples
/// ```
/// use noticeboard::middleware::login_url;
///
/// assert_eq!(login_url("/add/"), "/auth/login/?next=/add/");
/// assert_eq!(
///     login_url("/news/1/?page=2"),
///     "/auth/login/?next=/news/1/%3Fpage%3D2"
/// );
/// ```
#[must_use]
pub fn login_url(next: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(next.as_bytes()).collect();
    format!("{LOGIN_PATH}?next={}", encoded.replace("%2F", "/"))
}

/// Login redirect middleware.
///
/// Must sit inside the session middleware so handlers can read the session.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use noticeboard::middleware::LoginRedirect;
///
/// let _app = App::new().wrap(LoginRedirect);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoginRedirect;

impl<S, B> Transform<S, ServiceRequest> for LoginRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LoginRedirectMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRedirectMiddleware { service }))
    }
}

/// Service wrapper produced by [`LoginRedirect`].
pub struct LoginRedirectMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for LoginRedirectMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let exempt = req.path() == LOGIN_PATH;
        let next = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            if exempt || res.status() != StatusCode::UNAUTHORIZED {
                return Ok(res.map_into_left_body());
            }
            let location = login_url(&next);
            debug!(%location, "redirecting anonymous request to login");
            let (request, _) = res.into_parts();
            let redirect = HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish();
            Ok(ServiceResponse::new(request, redirect).map_into_right_body())
        })
    }
}
