//! The statement executor every orchestration step runs against.

use async_trait::async_trait;
use seangkatan_mysql::{MysqlConnection, MysqlResult, SqlValue};

/// Statement execution over one open connection.
///
/// The orchestration functions are generic over this trait so that they can
/// run against a live [`MysqlConnection`] or an in-memory double in tests.
#[async_trait]
pub trait Executor: Send {
    /// Execute a statement without parameters, returning affected rows.
    async fn execute(&mut self, sql: &str) -> MysqlResult<u64>;

    /// Execute a parameterized insert, returning the generated id.
    async fn insert(&mut self, sql: &str, params: Vec<SqlValue>) -> MysqlResult<u64>;

    /// Run a single-scalar count query.
    async fn count(&mut self, sql: &str) -> MysqlResult<u64>;

    /// Names of every table and view in `schema`, sorted by name.
    async fn table_names(&mut self, schema: &str) -> MysqlResult<Vec<String>>;
}

/// Lists the tables of a schema; the schema name is bound, never interpolated.
pub const TABLE_NAMES_SQL: &str = "SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES \
     WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME";

#[async_trait]
impl Executor for MysqlConnection {
    async fn execute(&mut self, sql: &str) -> MysqlResult<u64> {
        MysqlConnection::execute(self, sql).await
    }

    async fn insert(&mut self, sql: &str, params: Vec<SqlValue>) -> MysqlResult<u64> {
        MysqlConnection::insert(self, sql, params).await
    }

    async fn count(&mut self, sql: &str) -> MysqlResult<u64> {
        MysqlConnection::count(self, sql).await
    }

    async fn table_names(&mut self, schema: &str) -> MysqlResult<Vec<String>> {
        self.column_params(TABLE_NAMES_SQL, vec![SqlValue::from(schema)])
            .await
    }
}
