//! Session-based identity resolution for HTTP handlers.
//!
//! The auth provider that verifies credentials and issues the session is an
//! external collaborator; this extractor only reads the identity it stored
//! in the cookie and trusts it completely.

use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// The authenticated identity for the current request.
///
/// Extracting it fails with `401 Unauthorized` when no identity is present.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(UserId);

impl CurrentUser {
    /// The resolved user id.
    pub fn id(&self) -> &UserId {
        &self.0
    }
}

fn resolve(session: &Session) -> Result<UserId, Error> {
    let raw = session
        .get::<String>(USER_ID_KEY)
        .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
        .ok_or_else(|| Error::unauthorized("login required"))?;

    UserId::parse(&raw).map_err(|_| {
        tracing::warn!("session cookie carries a malformed user id");
        Error::unauthorized("login required")
    })
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            resolve(&session)
                .map(CurrentUser)
                .map_err(actix_web::Error::from)
        })
    }
}

/// Cookie-session middleware shared by the server and tests.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}
