//! Employee statements
//!
//! One statement per operation; create and update add a re-read of the row.
//!
//! Reads multiply `salary` by a floating literal so the store hands back a
//! DOUBLE whatever the declared column type (DECIMAL, TINYINT, ...). The
//! runtime-selected driver only decodes a handful of column types.

use crate::db::{DbError, DbPool, DbResult, SqlValue};

use super::model::{Employee, EmployeeChanges, NewEmployee};

const SELECT_ALL: &str = "SELECT id, name, salary * 1e0 AS salary FROM employee";
const SELECT_BY_ID: &str = "SELECT id, name, salary * 1e0 AS salary FROM employee WHERE id = ?";
const INSERT: &str = "INSERT INTO employee(name, salary) VALUES (?, ?)";
const DELETE_BY_ID: &str = "DELETE FROM employee WHERE id = ?";

/// Access to the `employee` table through the shared pool
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: DbPool,
}

impl EmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Every row, in store order
    pub async fn list(&self) -> DbResult<Vec<Employee>> {
        let rows = self.pool.fetch_all(SELECT_ALL, &[]).await?;
        rows.iter()
            .map(|row| Employee::from_row(row).map_err(DbError::from))
            .collect()
    }

    pub async fn find(&self, id: i64) -> DbResult<Option<Employee>> {
        let row = self
            .pool
            .fetch_optional(SELECT_BY_ID, &[SqlValue::Int(id)])
            .await?;

        row.as_ref()
            .map(Employee::from_row)
            .transpose()
            .map_err(DbError::from)
    }

    /// Insert a row and return it as stored, with the store-generated id
    pub async fn create(&self, new: &NewEmployee) -> DbResult<Employee> {
        let outcome = self
            .pool
            .insert(
                INSERT,
                &[SqlValue::Text(new.name.clone()), SqlValue::Real(new.salary)],
            )
            .await?;

        let id = outcome
            .last_insert_id
            .ok_or_else(|| DbError::Query("store did not report a generated id".to_string()))?;

        // The column type may round the salary; report what a later read sees.
        let stored = self.find(id).await?;
        Ok(stored.unwrap_or_else(|| Employee {
            id,
            name: Some(new.name.clone()),
            salary: Some(new.salary),
        }))
    }

    /// Apply the present fields and return the row as stored afterwards.
    ///
    /// `None` when no row has this id.
    pub async fn update(&self, id: i64, changes: &EmployeeChanges) -> DbResult<Option<Employee>> {
        if !changes.is_empty() {
            let (clauses, mut values) = changes.assignments();
            let sql = format!("UPDATE employee SET {} WHERE id = ?", clauses.join(", "));
            values.push(SqlValue::Int(id));

            self.pool.execute(&sql, &values).await?;
        }

        // Some drivers report zero affected rows when values are unchanged,
        // so existence is decided by the re-read.
        self.find(id).await
    }

    /// `false` when no row had this id
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let outcome = self
            .pool
            .execute(DELETE_BY_ID, &[SqlValue::Int(id)])
            .await?;
        Ok(outcome.rows_affected > 0)
    }
}
