//! HTTP server core implementation

use crate::config::{Config, ServerConfig, StorageBackend};
use crate::core::rate_limiter::{MemoryRateLimitStore, RateLimitStore};
use crate::server::middleware::RequestGate;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, connecting the configured store
    pub async fn new(config: &Config) -> Result<Self> {
        let store = Self::create_store(config).await?;
        Ok(Self::with_store(config, store))
    }

    /// Create a server over an existing store
    pub fn with_store(config: &Config, store: Arc<dyn RateLimitStore>) -> Self {
        info!("Creating HTTP server with {} rate limit store", store.name());
        Self {
            config: config.gateway.server.clone(),
            state: AppState::new(config.clone(), store),
        }
    }

    async fn create_store(config: &Config) -> Result<Arc<dyn RateLimitStore>> {
        match config.storage().backend {
            StorageBackend::Memory => Ok(Arc::new(MemoryRateLimitStore::new())),
            #[cfg(feature = "redis")]
            StorageBackend::Redis => {
                let store = crate::core::rate_limiter::RedisRateLimitStore::connect(
                    &config.storage().redis_url,
                    config.storage().key_prefix.clone(),
                    config.rate_limit().stale_after(),
                )
                .await?;
                Ok(Arc::new(store))
            }
            #[cfg(not(feature = "redis"))]
            StorageBackend::Redis => Err(GatewayError::config(
                "Redis storage needs the 'redis' feature",
            )),
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let gate = RequestGate::new(state.gatekeeper.clone());

        App::new()
            .app_data(state)
            .wrap(gate)
            .wrap(DefaultHeaders::new().add(("Server", "shield-rs")))
            .wrap(TracingLogger::default())
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server and the store sweep
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let rate_limit = self.state.config().rate_limit().clone();
        let limiter = self.state.limiter().clone();

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }
        let server = server
            .bind(&bind_addr)
            .map_err(|e| GatewayError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        let sweep =
            limiter.start_cleanup_task(rate_limit.clean_interval(), rate_limit.stale_after());
        info!("HTTP server listening on {}", bind_addr);

        let result = server.await;
        sweep.abort();

        result.map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;
        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
