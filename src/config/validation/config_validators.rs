//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;
        self.auth.validate()?;
        self.rate_limit.validate()?;
        self.storage.validate()?;

        let mut patterns = HashSet::new();
        for route in &self.routes {
            route.validate()?;
            if !patterns.insert(route.pattern.as_str()) {
                return Err(format!("Duplicate route pattern: {}", route.pattern));
            }
        }

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
            if workers > 1000 {
                return Err("Worker count seems too high (>1000)".to_string());
            }
        }

        Ok(())
    }
}

fn validate_header_name(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    if !value
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(format!("{} is not a valid header name: {}", field, value));
    }
    Ok(())
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        validate_header_name("api_token_header", &self.api_token_header)?;
        validate_header_name("user_token_header", &self.user_token_header)?;

        if self.api_token_header.eq_ignore_ascii_case(&self.user_token_header) {
            return Err("api and user token headers must differ".to_string());
        }

        if self.user_param.is_empty() {
            return Err("user_param cannot be empty".to_string());
        }

        if self.user_token_ttl_secs == 0 {
            return Err("user_token_ttl_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.capacity_ms == 0 {
            return Err("capacity_ms must be greater than 0".to_string());
        }

        if self.interval_ms == 0 {
            return Err("interval_ms must be greater than 0".to_string());
        }

        if self.per_interval_ms == 0 {
            return Err("per_interval_ms must be greater than 0".to_string());
        }

        if self.token_timeout_secs == Some(0) {
            return Err("token_timeout_secs must be greater than 0 when set".to_string());
        }

        if self.clean_interval_secs == 0 {
            return Err("clean_interval_secs must be greater than 0".to_string());
        }

        // A swept bucket comes back full, so it must have been able to refill
        let refill_ms = (self.stale_after_secs.saturating_mul(1000) / self.interval_ms)
            .saturating_mul(self.per_interval_ms);
        if refill_ms < self.capacity_ms {
            return Err(
                "stale_after_secs is shorter than an empty bucket takes to refill".to_string(),
            );
        }

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackend::Redis {
            if !cfg!(feature = "redis") {
                return Err("Redis storage needs the 'redis' feature".to_string());
            }
            if !self.redis_url.starts_with("redis://") && !self.redis_url.starts_with("rediss://")
            {
                return Err(format!("Invalid redis URL: {}", self.redis_url));
            }
        }
        Ok(())
    }
}

impl Validate for RouteConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.pattern.starts_with('/') {
            return Err(format!("Route pattern must start with '/': {}", self.pattern));
        }

        if self.policy.by_address_not_token && self.policy.token_not_required {
            return Err(format!(
                "Route {} cannot be both address limited and tokenless",
                self.pattern
            ));
        }

        Ok(())
    }
}
