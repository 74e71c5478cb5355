//! Request gate middleware

use super::helpers::{client_addr, header_value, rewrite_user_param};
use crate::core::gate::{AuthenticatedUser, GateRequest, Gatekeeper};
use crate::utils::error::GatewayError;
use actix_web::HttpMessage;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// Gates every request through a [`Gatekeeper`]
///
/// Rejections are answered directly and never reach the wrapped service. For
/// admitted requests the handling time is charged to the rate limit subject
/// once the service returns.
pub struct RequestGate {
    gatekeeper: Arc<Gatekeeper>,
}

impl RequestGate {
    pub fn new(gatekeeper: Arc<Gatekeeper>) -> Self {
        Self { gatekeeper }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestGateService {
            service: Rc::new(service),
            gatekeeper: self.gatekeeper.clone(),
        }))
    }
}

/// Service implementation for the request gate
pub struct RequestGateService<S> {
    service: Rc<S>,
    gatekeeper: Arc<Gatekeeper>,
}

impl<S, B> Service<ServiceRequest> for RequestGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gatekeeper = self.gatekeeper.clone();

        Box::pin(async move {
            let settings = gatekeeper.settings();
            let method = req.method().as_str().to_string();
            let path = req.path().to_string();
            let pattern = req.match_pattern();
            let policy = gatekeeper.policies().get(pattern.as_deref());

            let remote_addr = client_addr(
                req.peer_addr().map(|a| a.ip()),
                req.headers(),
                settings.trust_forwarded_for,
            );
            let api_token =
                header_value(req.headers(), &settings.api_token_header).map(str::to_string);
            let user_token =
                header_value(req.headers(), &settings.user_token_header).map(str::to_string);

            let gate_req = GateRequest {
                method: &method,
                remote_addr: &remote_addr,
                api_token: api_token.as_deref(),
                user_token: user_token.as_deref(),
            };

            let admission = match gatekeeper.admit(policy, &gate_req).await {
                Ok(admission) => admission,
                Err(e) => return Ok(reject(req, e, &method, &path)),
            };

            // A client supplied identity is never passed on
            let user = admission.user.as_deref();
            match rewrite_user_param(req.uri(), &settings.user_param, user) {
                Ok(Some(uri)) => {
                    req.match_info_mut().get_mut().update(&uri);
                    req.head_mut().uri = uri;
                }
                Ok(None) => {}
                Err(e) => return Ok(reject(req, e, &method, &path)),
            }
            if let Some(user) = &admission.user {
                req.extensions_mut().insert(AuthenticatedUser(user.clone()));
            }

            let start = Instant::now();
            let res = service.call(req).await;
            let elapsed = start.elapsed();

            if let Err(e) = gatekeeper.settle(&admission, elapsed).await {
                error!("Failed to charge {} {}: {}", method, path, e);
            }

            res.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn reject<B>(
    req: ServiceRequest,
    err: GatewayError,
    method: &str,
    path: &str,
) -> ServiceResponse<EitherBody<B>> {
    if err.is_fatal() {
        error!("FATAL: {} {}: {}", method, path, err);
    } else if err.is_rejection() {
        debug!("Rejected {} {}: {}", method, path, err);
    } else {
        error!("Unknown problem on {} {}: {}", method, path, err);
    }
    req.error_response(err).map_into_right_body()
}
