//! Employee request and response types

use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;

use crate::db::SqlValue;

/// A row of the `employee` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: Option<String>,
    pub salary: Option<f64>,
}

impl Employee {
    /// Map an `employee` row. Extra columns are ignored.
    pub fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            salary: decode_salary(row)?,
        })
    }
}

// Salary may live in a floating or an integer column depending on the schema.
fn decode_salary(row: &AnyRow) -> Result<Option<f64>, sqlx::Error> {
    match row.try_get::<Option<f64>, _>("salary") {
        Ok(salary) => Ok(salary),
        Err(_) => row
            .try_get::<Option<i64>, _>("salary")
            .map(|salary| salary.map(|n| n as f64)),
    }
}

/// Body of `POST /employees`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub salary: f64,
}

/// Body of `PUT|PATCH /employees/:id`
///
/// An absent (or `null`) field leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmployeeChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.salary.is_none()
    }

    /// `SET` clauses and their bound values, present fields only
    pub fn assignments(&self) -> (Vec<&'static str>, Vec<SqlValue>) {
        let mut clauses = Vec::with_capacity(2);
        let mut values = Vec::with_capacity(2);

        if let Some(name) = &self.name {
            clauses.push("name = ?");
            values.push(SqlValue::Text(name.clone()));
        }
        if let Some(salary) = self.salary {
            clauses.push("salary = ?");
            values.push(SqlValue::Real(salary));
        }

        (clauses, values)
    }
}
