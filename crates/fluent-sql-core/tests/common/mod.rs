#![allow(dead_code)]

use fluent_sql_core::{Executable, Parameter, SqlBuilder};
use fluent_sql_derive::Table;

/// Row type of the `employees` table.
#[derive(Debug, Clone, Table)]
#[table(name = "employees")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub salary: i64,
    pub department_id: Option<i64>,
}

/// Row type of the `departments` table.
#[derive(Debug, Clone, Table)]
#[table(name = "departments")]
pub struct Department {
    pub id: i64,
    #[column(name = "title")]
    pub name: String,
}

pub fn sql() -> SqlBuilder {
    SqlBuilder::generic()
}

/// Renders a statement, panicking with the error on failure.
pub fn render(statement: &impl Executable) -> (String, Vec<Parameter>) {
    statement
        .render()
        .unwrap_or_else(|e| panic!("Failed to render: {e}"))
}

/// Renders a statement and drops the parameters.
pub fn text(statement: &impl Executable) -> String {
    render(statement).0
}
