//! In-memory [`Executor`] for unit tests.
//!
//! Understands just the statements the orchestrator issues: table creation,
//! inserts, truncates, anchor counts, foreign-key toggles and database
//! create/drop. Row contents are recorded, not interpreted.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use seangkatan_mysql::{MysqlError, MysqlResult, SqlValue};

use crate::error::MigrateResult;
use crate::executor::Executor;
use crate::password::PasswordHasher;
use crate::schema::TABLES;

#[derive(Debug, Default)]
struct FakeTable {
    rows: u64,
    last_id: u64,
}

#[derive(Debug)]
pub struct FakeExecutor {
    tables: BTreeMap<String, FakeTable>,
    databases: BTreeSet<String>,
    foreign_key_checks: bool,
    fail_on: Vec<String>,
    statements: Vec<String>,
    inserts: Vec<(String, Vec<SqlValue>)>,
}

impl Default for FakeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            databases: BTreeSet::new(),
            foreign_key_checks: true,
            fail_on: Vec::new(),
            statements: Vec::new(),
            inserts: Vec::new(),
        }
    }

    /// Fail every statement containing `fragment`.
    pub fn fail_on(mut self, fragment: &str) -> Self {
        self.fail_on.push(fragment.to_string());
        self
    }

    /// Pretend `table` already holds `rows` rows.
    pub fn with_rows(mut self, table: &str, rows: u64) -> Self {
        let entry = self.tables.entry(table.to_string()).or_default();
        entry.rows = rows;
        entry.last_id = rows;
        self
    }

    pub fn tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn row_count(&self, table: &str) -> u64 {
        self.tables.get(table).map_or(0, |t| t.rows)
    }

    pub fn databases(&self) -> Vec<String> {
        self.databases.iter().cloned().collect()
    }

    pub fn foreign_key_checks(&self) -> bool {
        self.foreign_key_checks
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Parameters of every insert into `table`, in order.
    pub fn inserted(&self, table: &str) -> Vec<&[SqlValue]> {
        self.inserts
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, params)| params.as_slice())
            .collect()
    }

    fn record(&mut self, sql: &str) -> MysqlResult<()> {
        self.statements.push(sql.to_string());
        if let Some(fragment) = self.fail_on.iter().find(|f| sql.contains(f.as_str())) {
            return Err(MysqlError::query(format!("injected failure on '{fragment}'")));
        }
        Ok(())
    }

    fn table_mut(&mut self, name: &str) -> MysqlResult<&mut FakeTable> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| MysqlError::query(format!("Table '{name}' doesn't exist")))
    }
}

/// The identifier following `prefix`, without backticks or schema qualifier.
fn name_after<'a>(sql: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = sql.strip_prefix(prefix)?;
    let token = rest.split(|c: char| c.is_whitespace() || c == '(').next()?;
    let name = token.rsplit('.').next()?;
    Some(name.trim_matches('`'))
}

#[async_trait]
impl Executor for FakeExecutor {
    async fn execute(&mut self, sql: &str) -> MysqlResult<u64> {
        self.record(sql)?;

        if let Some(name) = name_after(sql, "CREATE TABLE IF NOT EXISTS ") {
            self.tables.entry(name.to_string()).or_default();
        } else if let Some(name) = name_after(sql, "TRUNCATE TABLE ") {
            if self.foreign_key_checks {
                let referenced = TABLES.iter().any(|t| {
                    t.depends_on.iter().any(|d| *d == name) && self.row_count(t.name) > 0
                });
                if referenced {
                    return Err(MysqlError::query(format!(
                        "Cannot truncate table '{name}' referenced in a foreign key constraint"
                    )));
                }
            }
            *self.table_mut(name)? = FakeTable::default();
        } else if let Some(value) = sql.strip_prefix("SET FOREIGN_KEY_CHECKS = ") {
            self.foreign_key_checks = value.trim() == "1";
        } else if let Some(name) = name_after(sql, "DROP DATABASE IF EXISTS ") {
            self.databases.remove(name);
            self.tables.clear();
        } else if let Some(name) = name_after(sql, "CREATE DATABASE IF NOT EXISTS ") {
            self.databases.insert(name.to_string());
        } else if let Some(name) = name_after(sql, "CREATE DATABASE ") {
            if !self.databases.insert(name.to_string()) {
                return Err(MysqlError::query(format!("database '{name}' exists")));
            }
        }

        Ok(0)
    }

    async fn insert(&mut self, sql: &str, params: Vec<SqlValue>) -> MysqlResult<u64> {
        self.record(sql)?;

        let name = name_after(sql, "INSERT INTO ")
            .ok_or_else(|| MysqlError::query("not an insert"))?
            .to_string();
        let table = self.table_mut(&name)?;
        table.rows += 1;
        table.last_id += 1;
        let id = table.last_id;

        self.inserts.push((name, params));
        Ok(id)
    }

    async fn count(&mut self, sql: &str) -> MysqlResult<u64> {
        self.record(sql)?;

        let name = name_after(sql, "SELECT COUNT(*) FROM ")
            .ok_or_else(|| MysqlError::query("not a count"))?;
        Ok(self.table_mut(name)?.rows)
    }

    async fn table_names(&mut self, schema: &str) -> MysqlResult<Vec<String>> {
        self.record(&format!("SHOW TABLES FROM `{schema}`"))?;
        Ok(self.tables())
    }
}

/// Reversible stand-in for Argon2 so tests stay fast.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> MigrateResult<String> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> MigrateResult<bool> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}
