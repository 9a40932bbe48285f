//! UPDATE statement builder using the typestate pattern.

use std::marker::PhantomData;

use super::{Executable, SqlBuilder};
use crate::condition::{Condition, ConditionBuilder};
use crate::expr::{AnyScalar, Expr, IntoScalar};
use crate::schema::{Column, Table};
use crate::token::{comma_separated, concat, SqlPart, SqlToken};
use crate::value::SqlType;

// Typestate markers

/// Marker: no SET assignment yet.
#[derive(Debug, Clone, Copy)]
pub struct NoSet;
/// Marker: at least one SET assignment.
#[derive(Debug, Clone, Copy)]
pub struct HasSet;

/// An assignment in the SET clause.
#[derive(Debug, Clone)]
struct Assignment {
    column: Vec<SqlToken>,
    value: Expr<AnyScalar>,
}

impl SqlPart for Assignment {
    fn tokens(&self) -> Vec<SqlToken> {
        concat([
            self.column.clone(),
            vec![SqlToken::fragment("=")],
            self.value.tokens(),
        ])
    }
}

/// An UPDATE of one table.
#[derive(Debug, Clone)]
pub struct Update<Set> {
    sql: SqlBuilder,
    table: Table,
    assignments: Vec<Assignment>,
    where_clause: ConditionBuilder,
    _state: PhantomData<Set>,
}

/// An UPDATE with no assignment yet.
pub type SetlessUpdate = Update<NoSet>;

/// An UPDATE with at least one assignment.
pub type SetUpdate = Update<HasSet>;

impl Update<NoSet> {
    pub(super) fn new(sql: SqlBuilder, table: Table) -> Self {
        Self {
            sql,
            table,
            assignments: vec![],
            where_clause: ConditionBuilder::default(),
            _state: PhantomData,
        }
    }
}

impl<Set> Update<Set> {
    /// Adds `column = value` to the SET clause.
    ///
    /// # Panics
    ///
    /// Panics if `column` belongs to another table or is already assigned.
    #[must_use]
    pub fn set<X: SqlType>(
        mut self,
        column: &Column<X>,
        value: impl IntoScalar<X>,
    ) -> Update<HasSet> {
        assert!(
            self.table.accepts(column),
            "column `{}` does not belong to table `{}`",
            column.name(),
            self.table.raw_name()
        );
        let name = column.name_tokens();
        assert!(
            !self.assignments.iter().any(|assignment| assignment.column == name),
            "column `{}` assigned twice",
            column.name()
        );
        self.assignments.push(Assignment {
            column: name,
            value: value.into_scalar().boxed(),
        });
        Update {
            sql: self.sql,
            table: self.table,
            assignments: self.assignments,
            where_clause: self.where_clause,
            _state: PhantomData,
        }
    }
}

// Methods available after SET
impl Update<HasSet> {
    /// Adds a WHERE condition. Repeated calls are combined with AND.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Condition>) -> Self {
        self.where_clause.push(condition);
        self
    }
}

impl SqlPart for Update<HasSet> {
    fn tokens(&self) -> Vec<SqlToken> {
        let mut tokens = concat([
            vec![SqlToken::fragment("UPDATE")],
            self.table.tokens(),
            vec![SqlToken::fragment("SET")],
            comma_separated(self.assignments.iter().map(SqlPart::tokens)),
        ]);
        if !self.where_clause.is_trivial() {
            tokens.push(SqlToken::fragment("WHERE"));
            tokens.extend(self.where_clause.tokens());
        }
        tokens
    }
}

impl Executable for Update<HasSet> {
    fn sql_builder(&self) -> &SqlBuilder {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn test_update_with_where() {
        let sql = SqlBuilder::generic();
        let employees = Table::named("employees");
        let salary = employees.column::<i64>("salary");
        let id = employees.column::<i64>("id");

        let (text, params) = sql
            .update(&employees)
            .set(&salary, 5000_i64)
            .where_clause(id.equal(7_i64))
            .render()
            .unwrap();

        assert_eq!(
            text,
            r#"UPDATE "employees" SET "salary" = ? WHERE ( "employees"."id" = ? )"#
        );
        assert_eq!(params[0].value, SqlValue::Int(5000));
        assert_eq!(params[1].value, SqlValue::Int(7));
    }

    #[test]
    fn test_update_without_where_touches_every_row() {
        let sql = SqlBuilder::generic();
        let employees = Table::new("employees", "e");
        let name = employees.column::<String>("name");
        let active = employees.column::<bool>("active");

        let (text, params) = sql
            .update(&employees)
            .set(&active, false)
            .set(&name, "x")
            .render()
            .unwrap();

        assert_eq!(
            text,
            r#"UPDATE "employees" AS "e" SET "active" = ? , "name" = ?"#
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    #[should_panic(expected = "column `salary` assigned twice")]
    fn test_repeated_assignment_panics() {
        let sql = SqlBuilder::generic();
        let employees = Table::named("employees");
        let salary = employees.column::<i64>("salary");
        let _ = sql.update(&employees).set(&salary, 1_i64).set(&salary, 2_i64);
    }

    #[test]
    fn test_set_from_expression_binds_nothing() {
        let sql = SqlBuilder::generic();
        let employees = Table::named("employees");
        let salary = employees.column::<i64>("salary");
        let bonus = employees.column::<i64>("bonus");

        let (text, params) = sql.update(&employees).set(&salary, &bonus).render().unwrap();

        assert_eq!(
            text,
            r#"UPDATE "employees" SET "salary" = "employees"."bonus""#
        );
        assert!(params.is_empty());
    }
}
