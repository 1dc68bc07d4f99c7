//! Form submissions from logged-in users.
//!
//! [`Submission`] resolves the session before the body is touched, so an
//! anonymous POST is answered with the login redirect whatever it sent.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Error, Principal};
use crate::inbound::http::session::SessionContext;

/// A JSON form body together with the authenticated principal who sent it.
#[derive(Debug)]
pub struct Submission<T> {
    /// Always [`Principal::Authenticated`].
    pub principal: Principal,
    /// The decoded form.
    pub form: T,
}

impl<T> FromRequest for Submission<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let session = SessionContext::from_request(&req, &mut Payload::None);
        let mut payload = payload.take();
        Box::pin(async move {
            let principal = session.await?.principal()?;
            if !principal.is_authenticated() {
                debug!(path = req.path(), "form submitted without a login");
                return Err(Error::unauthorized("login required").into());
            }
            let form = web::Json::<T>::from_request(&req, &mut payload)
                .await?
                .into_inner();
            Ok(Self { principal, form })
        })
    }
}
