// Redis cache backend
// Author: kelexine (https://github.com/kelexine)

use super::CacheProvider;
use crate::config::RedisConfig;
use crate::error::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::{debug, trace};

/// Cache backend storing entries in a Redis server.
///
/// Every key is namespaced with the configured prefix. Writes overwrite by
/// default; with [`RedisProvider::write_once`] they become `SET ... NX`, so an
/// entry cannot be refreshed until it expires.
#[derive(Clone)]
pub struct RedisProvider {
    connection: ConnectionManager,
    prefix: String,
    default_ttl: Duration,
    write_once: bool,
}

impl RedisProvider {
    /// Connect to the server described by `config`.
    pub async fn connect(config: &RedisConfig, default_ttl: Duration) -> Result<Self> {
        let url = connection_url(config);
        debug!(host = %config.host, port = config.port, "Connecting to Redis cache");

        let client = redis::Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self::with_connection(connection, config.prefix.clone(), default_ttl))
    }

    /// Wrap an already established connection.
    pub fn with_connection(
        connection: ConnectionManager,
        prefix: impl Into<String>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            connection,
            prefix: prefix.into(),
            default_ttl,
            write_once: false,
        }
    }

    /// Only write keys that do not exist yet.
    pub fn write_once(mut self, write_once: bool) -> Self {
        self.write_once = write_once;
        self
    }

    fn namespaced(&self, key: &str) -> String {
        namespaced(&self.prefix, key)
    }
}

#[async_trait]
impl CacheProvider for RedisProvider {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let key = self.namespaced(key);
        let cmd = set_command(&key, value, ttl, self.write_once);

        let mut conn = self.connection.clone();
        // NX replies nil when the key already existed
        let reply: Option<String> = cmd.query_async(&mut conn).await?;
        trace!(key = %key, stored = reply.is_some(), "Redis SET");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(self.namespaced(key))
            .query_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection.clone();
        let removed: i64 = redis::cmd("DEL")
            .arg(self.namespaced(key))
            .query_async(&mut conn)
            .await?;
        Ok(removed > 0)
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

fn namespaced(prefix: &str, key: &str) -> String {
    format!("{}{}", prefix, key)
}

/// `SET key value [EX secs] [NX]`; no expiry for a zero TTL.
fn set_command(key: &str, value: &str, ttl: Duration, write_once: bool) -> redis::Cmd {
    let mut cmd = redis::cmd("SET");
    cmd.arg(key).arg(value);
    if let Some(secs) = ttl_seconds(ttl) {
        cmd.arg("EX").arg(secs);
    }
    if write_once {
        cmd.arg("NX");
    }
    cmd
}

/// Build a `redis://` URL, percent-encoding the password.
fn connection_url(config: &RedisConfig) -> String {
    match config.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => format!(
            "redis://:{}@{}:{}/",
            urlencoding::encode(password),
            config.host,
            config.port
        ),
        None => format!("redis://{}:{}/", config.host, config.port),
    }
}

/// Redis expiry is whole seconds; sub-second TTLs round up.
fn ttl_seconds(ttl: Duration) -> Option<u64> {
    if ttl.is_zero() {
        return None;
    }
    let secs = ttl.as_secs().saturating_add(u64::from(ttl.subsec_nanos() > 0));
    Some(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_url_without_password() {
        let config = RedisConfig::default();
        assert_eq!(connection_url(&config), "redis://127.0.0.1:6379/");
    }

    #[test]
    fn test_connection_url_encodes_password() {
        let config = RedisConfig {
            host: "cache.internal".to_string(),
            port: 6380,
            password: Some("p@ss/word".to_string()),
            prefix: "test:".to_string(),
        };
        assert_eq!(
            connection_url(&config),
            "redis://:p%40ss%2Fword@cache.internal:6380/"
        );
    }

    #[test]
    fn test_empty_password_ignored() {
        let config = RedisConfig {
            password: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(connection_url(&config), "redis://127.0.0.1:6379/");
    }

    /// RESP encoding of a command, as sent on the wire.
    fn resp(args: &[&str]) -> Vec<u8> {
        let mut out = format!("*{}\r\n", args.len());
        for arg in args {
            out.push_str(&format!("${}\r\n{}\r\n", arg.len(), arg));
        }
        out.into_bytes()
    }

    #[test]
    fn test_set_command_without_ttl() {
        let cmd = set_command("places:k", "v", Duration::ZERO, false);
        assert_eq!(cmd.get_packed_command(), resp(&["SET", "places:k", "v"]));
    }

    #[test]
    fn test_set_command_with_ttl() {
        let cmd = set_command("places:k", "v", Duration::from_secs(90), false);
        assert_eq!(
            cmd.get_packed_command(),
            resp(&["SET", "places:k", "v", "EX", "90"])
        );
    }

    #[test]
    fn test_set_command_write_once() {
        let cmd = set_command("places:k", "v", Duration::from_secs(90), true);
        assert_eq!(
            cmd.get_packed_command(),
            resp(&["SET", "places:k", "v", "EX", "90", "NX"])
        );

        let cmd = set_command("places:k", "v", Duration::ZERO, true);
        assert_eq!(cmd.get_packed_command(), resp(&["SET", "places:k", "v", "NX"]));
    }

    #[test]
    fn test_set_command_uses_prefix() {
        let key = namespaced("test:", "textsearch/json:abc");
        assert_eq!(key, "test:textsearch/json:abc");

        let cmd = set_command(&key, "{}", Duration::ZERO, false);
        assert_eq!(
            cmd.get_packed_command(),
            resp(&["SET", "test:textsearch/json:abc", "{}"])
        );
    }

    #[test]
    fn test_ttl_seconds() {
        assert_eq!(ttl_seconds(Duration::ZERO), None);
        assert_eq!(ttl_seconds(Duration::from_secs(30)), Some(30));
        assert_eq!(ttl_seconds(Duration::from_millis(1500)), Some(2));
        assert_eq!(ttl_seconds(Duration::from_millis(1)), Some(1));
        assert_eq!(ttl_seconds(Duration::MAX), Some(u64::MAX));
    }
}
