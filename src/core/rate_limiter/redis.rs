//! Redis backed rate limit store

use super::store::RateLimitStore;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client, Script, aio::MultiplexedConnection};
use std::time::Duration;
use tracing::{debug, info};

/// Both scripts keep the value and timestamp in one hash so the pair is
/// always updated together. ARGV: amount, [max,] now micros, ttl secs.
const INCR_BY_CEIL_SCRIPT: &str = r#"
local v = tonumber(redis.call('HGET', KEYS[1], 'v') or '0') + tonumber(ARGV[1])
local clamped = 0
if v > tonumber(ARGV[2]) then
    v = tonumber(ARGV[2])
    clamped = 1
end
redis.call('HSET', KEYS[1], 'v', string.format('%d', v), 'ts', ARGV[3])
redis.call('EXPIRE', KEYS[1], ARGV[4])
return {v, clamped}
"#;

const DECR_BY_SCRIPT: &str = r#"
local v = tonumber(redis.call('HGET', KEYS[1], 'v') or '0') - tonumber(ARGV[1])
redis.call('HSET', KEYS[1], 'v', string.format('%d', v), 'ts', ARGV[2])
redis.call('EXPIRE', KEYS[1], ARGV[3])
return v
"#;

const VALUE_FIELD: &str = "v";
const TIMESTAMP_FIELD: &str = "ts";

/// Stores each bucket as a redis hash, shared by every gateway process
///
/// Keys carry an `EXPIRE` equal to the staleness window, so redis sweeps
/// them itself and [`clean`](RateLimitStore::clean) does nothing.
#[derive(Clone)]
pub struct RedisRateLimitStore {
    conn: MultiplexedConnection,
    prefix: String,
    key_ttl_secs: u64,
    incr_by_ceil: Script,
    decr_by: Script,
}

impl std::fmt::Debug for RedisRateLimitStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRateLimitStore")
            .field("prefix", &self.prefix)
            .field("key_ttl_secs", &self.key_ttl_secs)
            .finish()
    }
}

impl RedisRateLimitStore {
    /// Connect to redis at `url`
    pub async fn connect(url: &str, prefix: impl Into<String>, key_ttl: Duration) -> Result<Self> {
        info!("Connecting rate limit store to redis");
        let client = Client::open(url).map_err(GatewayError::Redis)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(GatewayError::Redis)?;

        Ok(Self::with_connection(conn, prefix, key_ttl))
    }

    /// Wrap an existing connection
    pub fn with_connection(
        conn: MultiplexedConnection,
        prefix: impl Into<String>,
        key_ttl: Duration,
    ) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
            key_ttl_secs: key_ttl.as_secs().max(1),
            incr_by_ceil: Script::new(INCR_BY_CEIL_SCRIPT),
            decr_by: Script::new(DECR_BY_SCRIPT),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn incr_by_ceil(&self, key: &str, amount: i64, max: i64) -> Result<(i64, bool)> {
        let mut conn = self.conn.clone();
        let (value, clamped): (i64, i64) = self
            .incr_by_ceil
            .key(self.key(key))
            .arg(amount)
            .arg(max)
            .arg(Utc::now().timestamp_micros())
            .arg(self.key_ttl_secs)
            .invoke_async(&mut conn)
            .await?;
        Ok((value, clamped != 0))
    }

    async fn decr_by(&self, key: &str, amount: i64) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = self
            .decr_by
            .key(self.key(key))
            .arg(amount)
            .arg(Utc::now().timestamp_micros())
            .arg(self.key_ttl_secs)
            .invoke_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn get(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: Option<i64> = conn.hget(self.key(key), VALUE_FIELD).await?;
        Ok(value.unwrap_or(0))
    }

    async fn last_modified(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let mut conn = self.conn.clone();
        let micros: Option<i64> = conn.hget(self.key(key), TIMESTAMP_FIELD).await?;
        match micros {
            None => Ok(None),
            Some(micros) => DateTime::from_timestamp_micros(micros)
                .map(Some)
                .ok_or_else(|| GatewayError::storage(format!("Bad timestamp for {}", key))),
        }
    }

    async fn clean(&self, _stale_after: Duration) -> Result<()> {
        debug!("Redis expires rate limit keys on its own");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
