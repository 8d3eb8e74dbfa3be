//! Connection pool
//!
//! One bounded pool per process, created at startup and handed to every
//! handler through router state. Parameters are always bound positionally;
//! statement text never contains caller data.

use sqlx::any::{Any, AnyArguments, AnyPoolOptions, AnyRow};
use sqlx::query::Query;
use sqlx::{AnyPool, Row};

use super::config::DatabaseConfig;
use super::errors::DbResult;

/// A positional statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

/// Metadata of a statement that returns no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    /// Store-generated key of the last inserted row, when the driver reports one
    pub last_insert_id: Option<i64>,
}

/// Shared handle to the connection pool. Clones share the same connections.
#[derive(Debug, Clone)]
pub struct DbPool {
    inner: AnyPool,
}

impl DbPool {
    /// Build the pool without opening a connection.
    ///
    /// The first statement opens a connection; an unreachable store surfaces
    /// then as `DbError::Connection`.
    pub fn connect_lazy(config: &DatabaseConfig) -> DbResult<Self> {
        sqlx::any::install_default_drivers();
        let options = config.connect_options()?;

        let inner = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(options);

        Ok(Self { inner })
    }

    /// Build the pool and open one connection up front
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        sqlx::any::install_default_drivers();
        let options = config.connect_options()?;

        let inner = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await?;

        Ok(Self { inner })
    }

    /// Run a statement and collect every returned row
    pub async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<AnyRow>> {
        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&self.inner)
            .await?;
        Ok(rows)
    }

    /// Run a statement and return its first row, if any
    pub async fn fetch_optional(&self, sql: &str, params: &[SqlValue]) -> DbResult<Option<AnyRow>> {
        let row = bind_all(sqlx::query(sql), params)
            .fetch_optional(&self.inner)
            .await?;
        Ok(row)
    }

    /// Run a statement that returns no rows
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> DbResult<ExecOutcome> {
        let result = bind_all(sqlx::query(sql), params)
            .execute(&self.inner)
            .await?;

        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        })
    }

    /// Run an `INSERT` and report the generated key of the new row.
    ///
    /// Drivers that do not surface the key in the statement result are asked
    /// for it on the same connection, so concurrent inserts never see each
    /// other's ids.
    pub async fn insert(&self, sql: &str, params: &[SqlValue]) -> DbResult<ExecOutcome> {
        let mut conn = self.inner.acquire().await?;

        let result = bind_all(sqlx::query(sql), params)
            .execute(&mut *conn)
            .await?;

        let last_insert_id = match result.last_insert_id() {
            Some(id) => Some(id),
            None => match last_insert_id_query(conn.backend_name()) {
                Some(query) => {
                    let row = sqlx::query(query).fetch_one(&mut *conn).await?;
                    Some(row.try_get::<i64, _>(0)?)
                }
                None => None,
            },
        };

        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id,
        })
    }

    /// Round-trip `SELECT 1` to prove the store is reachable
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.inner).await?;
        Ok(())
    }

    /// Close every connection; later statements fail with a connection error
    pub async fn close(&self) {
        self.inner.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

fn last_insert_id_query(backend: &str) -> Option<&'static str> {
    match backend {
        "SQLite" => Some("SELECT last_insert_rowid()"),
        "MySQL" => Some("SELECT LAST_INSERT_ID()"),
        _ => None,
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Any, AnyArguments<'q>>,
    params: &'q [SqlValue],
) -> Query<'q, Any, AnyArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;

    async fn memory_pool() -> DbPool {
        let config = DatabaseConfig {
            max_connections: 1,
            ..DatabaseConfig::with_url("sqlite::memory:")
        };
        DbPool::connect(&config).await.unwrap()
    }

    #[test]
    fn test_sql_value_conversions() {
        assert_eq!(SqlValue::from(7_i64), SqlValue::Int(7));
        assert_eq!(SqlValue::from(1.5_f64), SqlValue::Real(1.5));
        assert_eq!(SqlValue::from("Ada"), SqlValue::Text("Ada".to_string()));
    }

    #[tokio::test]
    async fn test_ping_memory_store() {
        let pool = memory_pool().await;
        pool.ping().await.unwrap();
    }

    #[test]
    fn test_last_insert_id_query_per_backend() {
        assert_eq!(last_insert_id_query("SQLite"), Some("SELECT last_insert_rowid()"));
        assert_eq!(last_insert_id_query("MySQL"), Some("SELECT LAST_INSERT_ID()"));
        assert_eq!(last_insert_id_query("PostgreSQL"), None);
    }

    #[tokio::test]
    async fn test_insert_reports_generated_ids() {
        let pool = memory_pool().await;
        pool.execute(
            "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, label TEXT)",
            &[],
        )
        .await
        .unwrap();

        let first = pool
            .insert("INSERT INTO t(label) VALUES (?)", &[SqlValue::from("a")])
            .await
            .unwrap();
        let second = pool
            .insert("INSERT INTO t(label) VALUES (?)", &[SqlValue::from("b")])
            .await
            .unwrap();

        assert_eq!(first.rows_affected, 1);
        assert_eq!(first.last_insert_id, Some(1));
        assert_eq!(second.last_insert_id, Some(2));
    }

    #[tokio::test]
    async fn test_execute_reports_affected_rows() {
        let pool = memory_pool().await;
        pool.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, label TEXT)", &[])
            .await
            .unwrap();

        let inserted = pool
            .execute(
                "INSERT INTO t(id, label) VALUES (?, ?), (?, ?)",
                &[
                    SqlValue::Int(1),
                    SqlValue::from("a"),
                    SqlValue::Int(2),
                    SqlValue::from("b"),
                ],
            )
            .await
            .unwrap();
        assert_eq!(inserted.rows_affected, 2);

        let deleted = pool
            .execute("DELETE FROM t WHERE id = ?", &[SqlValue::Int(99)])
            .await
            .unwrap();
        assert_eq!(deleted.rows_affected, 0);
    }

    #[tokio::test]
    async fn test_parameters_are_not_interpolated() {
        let pool = memory_pool().await;
        pool.execute("CREATE TABLE t (label TEXT)", &[]).await.unwrap();

        let hostile = "x'); DROP TABLE t; --";
        pool.execute("INSERT INTO t(label) VALUES (?)", &[SqlValue::from(hostile)])
            .await
            .unwrap();

        let row = pool
            .fetch_optional("SELECT label FROM t", &[])
            .await
            .unwrap()
            .unwrap();
        let label: String = row.try_get("label").unwrap();
        assert_eq!(label, hostile);
    }

    #[tokio::test]
    async fn test_bad_statement_is_query_error() {
        let pool = memory_pool().await;
        let Err(err) = pool.fetch_all("SELECT * FROM missing_table", &[]).await else {
            panic!("query against a missing table succeeded");
        };
        assert!(matches!(err, DbError::Query(_)));
    }

    #[tokio::test]
    async fn test_closed_pool_is_connection_error() {
        let pool = memory_pool().await;
        pool.close().await;

        assert!(pool.is_closed());
        let err = pool.ping().await.unwrap_err();
        assert!(err.is_connection());
    }
}
