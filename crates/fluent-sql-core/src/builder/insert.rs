//! INSERT statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::{Executable, SqlBuilder};
use crate::expr::{AnyScalar, Expr, IntoScalar};
use crate::schema::{Column, Table};
use crate::token::{comma_separated, concat, parenthesize, SqlPart, SqlToken};
use crate::value::SqlType;

// Typestate markers

/// Marker: no values specified yet.
#[derive(Debug, Clone, Copy)]
pub struct NoValues;
/// Marker: values have been specified.
#[derive(Debug, Clone, Copy)]
pub struct HasValues;

/// A single-row INSERT.
///
/// Only `Insert<HasValues>` renders, so `INSERT INTO t ( ) VALUES ( )` is
/// never produced.
#[derive(Debug, Clone)]
pub struct Insert<Values> {
    sql: SqlBuilder,
    table: Table,
    columns: Vec<Vec<SqlToken>>,
    values: Vec<Expr<AnyScalar>>,
    _state: PhantomData<Values>,
}

/// An INSERT with no column yet.
pub type ValuelessInsert = Insert<NoValues>;

/// An INSERT with at least one column.
pub type ValuedInsert = Insert<HasValues>;

impl Insert<NoValues> {
    pub(super) const fn new(sql: SqlBuilder, table: Table) -> Self {
        Self {
            sql,
            table,
            columns: vec![],
            values: vec![],
            _state: PhantomData,
        }
    }
}

impl<Values> Insert<Values> {
    /// Sets `column` to `value`. The value is bound as a parameter unless
    /// it is itself an expression.
    ///
    /// # Panics
    ///
    /// Panics if `column` belongs to another table or was already given a
    /// value.
    #[must_use]
    pub fn value<X: SqlType>(
        mut self,
        column: &Column<X>,
        value: impl IntoScalar<X>,
    ) -> Insert<HasValues> {
        assert!(
            self.table.accepts(column),
            "column `{}` does not belong to table `{}`",
            column.name(),
            self.table.raw_name()
        );
        let name = column.name_tokens();
        assert!(
            !self.columns.contains(&name),
            "column `{}` inserted twice",
            column.name()
        );
        self.columns.push(name);
        self.values.push(value.into_scalar().boxed());
        Insert {
            sql: self.sql,
            table: self.table,
            columns: self.columns,
            values: self.values,
            _state: PhantomData,
        }
    }
}

impl SqlPart for Insert<HasValues> {
    fn tokens(&self) -> Vec<SqlToken> {
        concat([
            vec![SqlToken::fragment("INSERT INTO")],
            self.table.name_tokens(),
            parenthesize(comma_separated(self.columns.iter().cloned())),
            vec![SqlToken::fragment("VALUES")],
            parenthesize(comma_separated(self.values.iter().map(SqlPart::tokens))),
        ])
    }
}

impl Executable for Insert<HasValues> {
    fn sql_builder(&self) -> &SqlBuilder {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::PostgresDialect;
    use crate::expr::null;
    use crate::value::{SqlValue, ValueKind};

    #[test]
    fn test_insert_columns_and_placeholders_align() {
        let sql = SqlBuilder::generic();
        let employees = Table::new("employees", "e");
        let name = employees.column::<String>("name");
        let age = employees.column::<Option<i64>>("age");

        let (text, params) = sql
            .insert_into(&employees)
            .value(&name, "Ada")
            .value(&age, 36_i64)
            .render()
            .unwrap();

        assert_eq!(
            text,
            r#"INSERT INTO "employees" ( "name" , "age" ) VALUES ( ? , ? )"#
        );
        assert_eq!(params[0].value, SqlValue::Text(String::from("Ada")));
        assert_eq!(params[1].value, SqlValue::Int(36));
    }

    #[test]
    #[should_panic(expected = "column `name` inserted twice")]
    fn test_repeated_column_panics() {
        let sql = SqlBuilder::generic();
        let employees = Table::named("employees");
        let name = employees.column::<String>("name");
        let _ = sql.insert_into(&employees).value(&name, "a").value(&name, "b");
    }

    #[test]
    #[should_panic(expected = "column `id` does not belong to table `employees`")]
    fn test_foreign_column_panics() {
        let sql = SqlBuilder::generic();
        let employees = Table::named("employees");
        let departments = Table::named("departments");
        let id = departments.column::<i64>("id");
        let _ = sql.insert_into(&employees).value(&id, 1_i64);
    }

    #[test]
    fn test_insert_null_keeps_column_kind() {
        let sql = SqlBuilder::new(PostgresDialect);
        let employees = Table::new("employees", "e");
        let name = employees.column::<String>("name");
        let nickname = employees.column::<Option<String>>("nickname");

        let (text, params) = sql
            .insert_into(&employees)
            .value(&name, "Grace")
            .value(&nickname, null::<String>())
            .render()
            .unwrap();

        assert_eq!(
            text,
            r#"INSERT INTO "employees" ( "name" , "nickname" ) VALUES ( $1 , $2 )"#
        );
        assert_eq!(params[1].value, SqlValue::Null);
        assert_eq!(params[1].kind, ValueKind::Text);
    }
}
