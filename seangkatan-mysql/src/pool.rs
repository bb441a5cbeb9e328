//! Connection pool for MySQL.

use std::sync::Arc;

use mysql_async::Pool;
use tracing::{debug, info};

use crate::config::MysqlConfig;
use crate::connection::MysqlConnection;
use crate::error::{MysqlError, MysqlResult};

/// A connection pool for MySQL.
///
/// Creating the pool performs no I/O; the first [`MysqlPool::get`] opens the
/// first connection.
#[derive(Clone)]
pub struct MysqlPool {
    inner: Pool,
    config: Arc<MysqlConfig>,
}

impl MysqlPool {
    /// Create a new connection pool from configuration.
    pub fn new(config: MysqlConfig) -> Self {
        let pool = Pool::new(config.to_opts());

        debug!(
            host = %config.host,
            port = config.port,
            database = config.database.as_deref().unwrap_or("<server>"),
            max_connections = config.max_connections,
            "MySQL connection pool created"
        );

        Self {
            inner: pool,
            config: Arc::new(config),
        }
    }

    /// Get a connection from the pool, bounded by the configured timeout.
    pub async fn get(&self) -> MysqlResult<MysqlConnection> {
        debug!("Acquiring connection from pool");
        let conn = match self.config.connect_timeout {
            Some(after) => tokio::time::timeout(after, self.inner.get_conn())
                .await
                .map_err(|_| MysqlError::Timeout {
                    host: self.config.host.clone(),
                    after,
                })??,
            None => self.inner.get_conn().await?,
        };

        info!(
            host = %self.config.host,
            database = self.config.database.as_deref().unwrap_or("<server>"),
            "Connected to MySQL"
        );
        Ok(MysqlConnection::new(conn))
    }

    /// Disconnect all connections and close the pool.
    ///
    /// Connections checked out of the pool must be dropped or closed first.
    pub async fn disconnect(self) -> MysqlResult<()> {
        self.inner.disconnect().await?;
        debug!("MySQL connection pool closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_get_fails_against_closed_port() {
        let config = MysqlConfig::new("school")
            .host("127.0.0.1")
            .port(1)
            .connect_timeout(Duration::from_secs(5));
        let pool = MysqlPool::new(config);

        let err = pool.get().await.err().expect("connection should fail");
        assert!(err.is_connectivity(), "unexpected error: {err}");

        pool.disconnect().await.ok();
    }
}
