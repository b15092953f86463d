use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use entity::users::UserRole;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::errors::AppError;
use crate::utils::jwt::verify_jwt_token;

/// Principal attached to every authenticated request. Handlers ask it what
/// the caller may do instead of inspecting roles themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn new(id: i32, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn can_review_requests(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn can_submit_requests(&self) -> bool {
        self.role != UserRole::Blocked
    }
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        Box::pin(async move {
            let principal = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .and_then(|token| verify_jwt_token(token).ok())
                .and_then(|claims| {
                    let id = claims.sub.parse::<i32>().ok()?;
                    Some(AuthenticatedUser::new(id, claims.role))
                });

            match principal {
                Some(user) => {
                    req.extensions_mut().insert(user);
                    svc.call(req).await
                }
                None => Err(AppError::Unauthorized.into()),
            }
        })
    }
}
