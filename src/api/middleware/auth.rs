use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, trace};

use crate::api::constants;
use crate::api::services::admin::error_from_linkshelf;
use crate::errors::LinkshelfError;
use crate::services::AuthService;

/// Admin authentication middleware
///
/// 校验 `sessionToken` + `authToken` cookie 对，并把 `AuthenticatedUser`
/// 写入 request extensions。登录、登出、刷新与 analytics 端点放行。
#[derive(Clone)]
pub struct AdminAuth {
    api_prefix: String,
}

impl AdminAuth {
    pub fn new(api_prefix: impl Into<String>) -> Self {
        Self {
            api_prefix: api_prefix.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            api_prefix: self.api_prefix.clone(),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    api_prefix: String,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// 无需身份的端点
    fn is_public_endpoint(req: &ServiceRequest, api_prefix: &str) -> bool {
        let Some(rest) = req.path().strip_prefix(api_prefix) else {
            return false;
        };
        matches!(
            rest.trim_end_matches('/'),
            "/auth/login" | "/auth/logout" | "/auth/refresh" | "/analytics"
        )
    }

    fn handle_unauthorized(
        req: ServiceRequest,
        err: &LinkshelfError,
    ) -> ServiceResponse<EitherBody<B>> {
        info!("Admin authentication failed: {}", err);
        req.into_response(error_from_linkshelf(err).map_into_right_body())
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let api_prefix = self.api_prefix.clone();

        Box::pin(async move {
            if Self::is_public_endpoint(&req, &api_prefix) {
                trace!("Public endpoint, skipping authentication: {}", req.path());
                return srv.call(req).await.map(|res| res.map_into_left_body());
            }

            let Some(auth) = req.app_data::<web::Data<Arc<AuthService>>>().cloned() else {
                let err = LinkshelfError::internal("AuthService is not registered");
                return Ok(req.into_response(error_from_linkshelf(&err).map_into_right_body()));
            };

            let session_token = req
                .cookie(constants::SESSION_COOKIE_NAME)
                .map(|c| c.value().to_string());
            let auth_token = req
                .cookie(constants::AUTH_COOKIE_NAME)
                .map(|c| c.value().to_string());

            match auth
                .authenticate(session_token.as_deref(), auth_token.as_deref())
                .await
            {
                Ok(user) => {
                    trace!("Authenticated user {} for {}", user.id, req.path());
                    req.extensions_mut().insert(user);
                    srv.call(req).await.map(|res| res.map_into_left_body())
                }
                Err(e) if e.is_internal() => {
                    Ok(req.into_response(error_from_linkshelf(&e).map_into_right_body()))
                }
                Err(e) => Ok(Self::handle_unauthorized(req, &e)),
            }
        })
    }
}
