use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use async_graphql::Context;

use crate::errors::{AppError, AppResult};

pub const SESSION_HEADER: &str = "x-session-id";
const MAX_SESSION_ID_LEN: usize = 128;

/// Identifies whose run counter a request is charged to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey(pub String);

impl SessionKey {
    /// `X-Session-Id` when present and sane, otherwise the peer address.
    pub fn resolve(req: &HttpRequest) -> Self {
        let header = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_SESSION_ID_LEN);

        match header {
            Some(id) => SessionKey(format!("sid:{id}")),
            None => SessionKey(
                req.peer_addr()
                    .map(|addr| format!("ip:{}", addr.ip()))
                    .unwrap_or_else(|| "anonymous".to_string()),
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Present only on requests that passed the passcode gate.
#[derive(Clone, Debug)]
pub struct AuthorizedSession(pub SessionKey);

impl FromRequest for AuthorizedSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req
            .extensions()
            .get::<AuthorizedSession>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Passcode required".to_string()));

        ready(session)
    }
}

pub fn session_from_context(ctx: &Context<'_>) -> AppResult<SessionKey> {
    ctx.data::<AuthorizedSession>()
        .map(|session| session.0.clone())
        .map_err(|_| AppError::Unauthorized("Passcode required".to_string()))
}
