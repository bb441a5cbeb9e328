//! MySQL connection wrapper.

use mysql_async::prelude::*;
use mysql_async::{Conn, Params, Value};
use tracing::debug;

use crate::error::{MysqlError, MysqlResult};
use crate::types::SqlValue;

/// A wrapper around a MySQL connection.
pub struct MysqlConnection {
    conn: Conn,
}

fn bind(params: Vec<SqlValue>) -> Params {
    if params.is_empty() {
        Params::Empty
    } else {
        Params::Positional(params.into_iter().map(Value::from).collect())
    }
}

impl MysqlConnection {
    /// Create a new connection wrapper.
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    /// Execute a statement and return the number of affected rows.
    pub async fn execute(&mut self, query: &str) -> MysqlResult<u64> {
        debug!(query = %query, "Executing statement");
        self.conn.query_drop(query).await?;
        Ok(self.conn.affected_rows())
    }

    /// Execute an insert with parameters and return the generated id.
    pub async fn insert(&mut self, query: &str, params: Vec<SqlValue>) -> MysqlResult<u64> {
        debug!(query = %query, "Executing parameterized insert");
        self.conn.exec_drop(query, bind(params)).await?;
        self.conn
            .last_insert_id()
            .ok_or_else(|| MysqlError::query("insert did not report a generated id"))
    }

    /// Run a `SELECT COUNT(*)`-style query and return its scalar.
    pub async fn count(&mut self, query: &str) -> MysqlResult<u64> {
        debug!(query = %query, "Executing scalar query");
        let value: Option<u64> = self.conn.query_first(query).await?;
        value.ok_or_else(|| MysqlError::query("expected scalar value, got none"))
    }

    /// Run a parameterized query and collect its first column as strings.
    pub async fn column_params(
        &mut self,
        query: &str,
        params: Vec<SqlValue>,
    ) -> MysqlResult<Vec<String>> {
        debug!(query = %query, "Executing parameterized column query");
        let rows: Vec<String> = self.conn.exec(query, bind(params)).await?;
        Ok(rows)
    }

    /// Close this connection.
    pub async fn close(self) -> MysqlResult<()> {
        self.conn.disconnect().await?;
        Ok(())
    }
}
