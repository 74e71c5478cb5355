//! Token issuing and identity endpoints

use crate::core::gate::{AuthenticatedUser, HandlerPolicy, PolicyRegistry};
use crate::server::handlers::health_check;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;

pub const TOKEN_PATH: &str = "/token";
pub const WHOAMI_PATH: &str = "/whoami";
pub const HEALTH_PATH: &str = "/health";

/// Issued api token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Identity as seen by a handler
#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    /// Value of the propagation query parameter
    pub user: Option<String>,
    /// Whether the request extensions agree with it
    pub authenticated: bool,
}

/// Policies of the built-in routes
///
/// `/token` hands out api tokens so it can only be limited by address.
pub fn builtin_policies() -> PolicyRegistry {
    PolicyRegistry::new()
        .with(TOKEN_PATH, HandlerPolicy::by_address())
        .with(HEALTH_PATH, HandlerPolicy::open())
        .with(
            WHOAMI_PATH,
            HandlerPolicy::default().require_user_auth_always(),
        )
}

/// Configure the built-in routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(TOKEN_PATH, web::get().to(issue_token))
        .route(WHOAMI_PATH, web::get().to(whoami))
        .route(HEALTH_PATH, web::get().to(health_check));
}

/// Issue a fresh api token
pub async fn issue_token(state: web::Data<AppState>) -> Result<HttpResponse, GatewayError> {
    let token = state.gatekeeper.new_api_token()?;
    debug!("Issued api token");
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Echo the identity the gate passed on
pub async fn whoami(
    req: HttpRequest,
    state: web::Data<AppState>,
    authenticated: Option<web::ReqData<AuthenticatedUser>>,
) -> HttpResponse {
    let param = &state.gatekeeper.settings().user_param;
    let user = form_urlencoded::parse(req.query_string().as_bytes())
        .find(|(k, _)| k == param.as_str())
        .map(|(_, v)| v.into_owned());

    let authenticated = match (&user, authenticated) {
        (Some(user), Some(from_gate)) => from_gate.name() == user,
        _ => false,
    };

    HttpResponse::Ok().json(WhoAmIResponse {
        user,
        authenticated,
    })
}
