use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::Header,
    web, Error, HttpMessage,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{passcode::PasscodeVerifier, session::AuthorizedSession, SessionKey},
    errors::{AppError, AppResult},
};

/// Rejects requests without `Authorization: Bearer <passcode>` and tags the
/// rest with their session key.
pub struct PasscodeMiddleware;

impl<S, B> Transform<S, ServiceRequest> for PasscodeMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PasscodeMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PasscodeMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct PasscodeMiddlewareService<S> {
    service: Rc<S>,
}

fn authorize(req: &ServiceRequest) -> AppResult<SessionKey> {
    let verifier = req
        .app_data::<web::Data<PasscodeVerifier>>()
        .ok_or_else(|| AppError::ConfigurationError("Passcode gate not configured".to_string()))?;

    let header = Authorization::<Bearer>::parse(req)
        .map_err(|_| AppError::Unauthorized("Missing or malformed passcode".to_string()))?;

    if !verifier.verify(header.as_ref().token()) {
        return Err(AppError::Unauthorized("Incorrect passcode".to_string()));
    }

    Ok(SessionKey::resolve(req.request()))
}

impl<S, B> Service<ServiceRequest> for PasscodeMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authorize(&req) {
                Ok(session) => {
                    req.extensions_mut().insert(AuthorizedSession(session));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("Rejected {} {}: {}", req.method(), req.path(), err);
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}
