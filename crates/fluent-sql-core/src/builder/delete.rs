//! DELETE statement builder.

use super::{Executable, SqlBuilder};
use crate::condition::{Condition, ConditionBuilder};
use crate::schema::Table;
use crate::token::{SqlPart, SqlToken};

/// A DELETE from one table. Without a WHERE condition every row goes.
#[derive(Debug, Clone)]
pub struct Delete {
    sql: SqlBuilder,
    table: Table,
    where_clause: ConditionBuilder,
}

impl Delete {
    pub(super) fn new(sql: SqlBuilder, table: Table) -> Self {
        Self {
            sql,
            table,
            where_clause: ConditionBuilder::default(),
        }
    }

    /// Adds a WHERE condition. Repeated calls are combined with AND.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Condition>) -> Self {
        self.where_clause.push(condition);
        self
    }
}

impl SqlPart for Delete {
    fn tokens(&self) -> Vec<SqlToken> {
        let mut tokens = vec![SqlToken::fragment("DELETE FROM")];
        tokens.extend(self.table.tokens());
        if !self.where_clause.is_trivial() {
            tokens.push(SqlToken::fragment("WHERE"));
            tokens.extend(self.where_clause.tokens());
        }
        tokens
    }
}

impl Executable for Delete {
    fn sql_builder(&self) -> &SqlBuilder {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::PostgresDialect;

    #[test]
    fn test_delete_all() {
        let sql = SqlBuilder::generic();
        let employees = Table::named("employees");
        let (text, params) = sql.delete_from(&employees).render().unwrap();
        assert_eq!(text, r#"DELETE FROM "employees""#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_delete_with_where() {
        let sql = SqlBuilder::new(PostgresDialect);
        let employees = Table::named("employees");
        let age = employees.column::<i64>("age");
        let name = employees.column::<String>("name");

        let (text, params) = sql
            .delete_from(&employees)
            .where_clause(age.less_than(18_i64))
            .where_clause(name.like("test%"))
            .render()
            .unwrap();

        assert_eq!(
            text,
            concat!(
                r#"DELETE FROM "employees" "#,
                r#"WHERE ( "employees"."age" < $1 AND "employees"."name" LIKE $2 )"#
            )
        );
        assert_eq!(params.len(), 2);
    }
}
