//! MySQL connection layer for the Seangkatan database tool.
//!
//! This crate wraps the `mysql_async` driver with the small surface the
//! lifecycle commands need: a configuration type that can select a database
//! or stay at server level, a pool that bounds connection attempts with a
//! timeout, and a connection wrapper whose statements always bind their
//! parameters.
//!
//! # Example
//!
//! ```rust,ignore
//! use seangkatan_mysql::{MysqlConfig, MysqlPool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MysqlConfig::from_url("mysql://root@localhost/seangkatan_db")?;
//!     let pool = MysqlPool::new(config);
//!
//!     let mut conn = pool.get().await?;
//!     let users = conn.count("SELECT COUNT(*) FROM `users`").await?;
//!     println!("{users} users");
//!
//!     conn.close().await?;
//!     pool.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod pool;
pub mod types;

pub use config::MysqlConfig;
pub use connection::MysqlConnection;
pub use error::{MysqlError, MysqlResult};
pub use pool::MysqlPool;
pub use types::SqlValue;
