//! Tables and typed columns.
//!
//! A [`Table`] is a named relation with an alias. Columns are created from a
//! table and carry their Rust value type, so `employees.column::<i64>("age")`
//! only compares against `i64` operands.

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Weak};

use crate::condition::Condition;
use crate::expr::{
    AnyRelation, AnyScalar, Expr, ExprNode, IntoRelation, IntoScalar, Scalar, ScalarExpr,
};
use crate::token::{SqlPart, SqlToken};
use crate::value::SqlType;

#[derive(Debug)]
struct TableData {
    raw_name: Arc<str>,
    alias: Arc<str>,
}

/// A table reference: `raw_name [AS alias]`.
///
/// The alias is only rendered when it differs from the raw name.
#[derive(Debug, Clone)]
pub struct Table {
    data: Arc<TableData>,
}

impl Table {
    /// Creates a table reference with an alias.
    #[must_use]
    pub fn new(raw_name: &str, alias: &str) -> Self {
        Self {
            data: Arc::new(TableData {
                raw_name: Arc::from(raw_name),
                alias: Arc::from(alias),
            }),
        }
    }

    /// Creates a table reference whose alias is its own name.
    #[must_use]
    pub fn named(raw_name: &str) -> Self {
        Self::new(raw_name, raw_name)
    }

    /// Returns the raw table name.
    #[must_use]
    pub fn raw_name(&self) -> &str {
        &self.data.raw_name
    }

    /// Returns the alias columns are qualified with.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.data.alias
    }

    /// Returns a typed column of this table.
    ///
    /// The column is qualified by the alias. A table without a distinct
    /// alias qualifies it by its raw name, formatted as in FROM, so
    /// `hr.employees` yields `"hr"."employees"."id"`.
    #[must_use]
    pub fn column<X: SqlType>(&self, name: &str) -> Column<X> {
        let name: Arc<str> = Arc::from(name);
        Column {
            table: Arc::downgrade(&self.data),
            expr: Expr::from_node(ExprNode::Column {
                qualifier: Arc::clone(&self.data.alias),
                name: Arc::clone(&name),
                table_qualified: self.data.alias == self.data.raw_name,
            }),
            name,
        }
    }

    /// Returns the table as a relation expression.
    #[must_use]
    pub fn relation(&self) -> Expr<AnyRelation> {
        Expr::from_node(ExprNode::Table {
            raw_name: Arc::clone(&self.data.raw_name),
            alias: Arc::clone(&self.data.alias),
        })
    }

    /// `self INNER JOIN rhs ON on`
    #[must_use]
    ///
    /// # Panics
    ///
    /// Panics if `on` is trivial, see [`Expr::inner_join`].
    #[must_use]
    pub fn inner_join(
        &self,
        rhs: impl IntoRelation,
        on: impl Into<Condition>,
    ) -> Expr<AnyRelation> {
        self.relation().inner_join(rhs, on)
    }

    /// `self LEFT JOIN rhs ON on`
    ///
    /// # Panics
    ///
    /// Panics if `on` is trivial.
    #[must_use]
    pub fn left_join(
        &self,
        rhs: impl IntoRelation,
        on: impl Into<Condition>,
    ) -> Expr<AnyRelation> {
        self.relation().left_join(rhs, on)
    }

    /// Whether `column` may be written through this table: it was created
    /// from a table of the same raw name, or its table is gone.
    pub(crate) fn accepts<X: SqlType>(&self, column: &Column<X>) -> bool {
        !matches!(column.table(), Some(table) if table.raw_name() != self.raw_name())
    }

    /// Tokens naming the table without its alias, as INSERT needs.
    pub(crate) fn name_tokens(&self) -> Vec<SqlToken> {
        vec![SqlToken::TableName(Arc::clone(&self.data.raw_name))]
    }
}

impl SqlPart for Table {
    fn tokens(&self) -> Vec<SqlToken> {
        self.relation().tokens()
    }
}

impl IntoRelation for &Table {
    fn into_relation(self) -> Expr<AnyRelation> {
        self.relation()
    }
}

impl IntoRelation for Table {
    fn into_relation(self) -> Expr<AnyRelation> {
        self.relation()
    }
}

/// Anything that wraps a [`Table`], such as the handles generated by
/// `#[derive(Table)]`. Statement entry points accept `&impl AsTable`.
pub trait AsTable {
    /// Returns the wrapped table.
    fn as_table(&self) -> &Table;
}

impl AsTable for Table {
    fn as_table(&self) -> &Table {
        self
    }
}

/// A column of a table, holding values of type `X`.
///
/// Dereferences to its scalar expression, so every operator of
/// `Expr<Scalar<X>>` is available on the column.
pub struct Column<X: SqlType> {
    table: Weak<TableData>,
    name: Arc<str>,
    expr: Expr<Scalar<X>>,
}

impl<X: SqlType> Column<X> {
    /// A column qualified by `qualifier` with no table behind it, such as a
    /// field of a sub-query.
    pub(crate) fn unbound(qualifier: &str, name: &str) -> Self {
        let name: Arc<str> = Arc::from(name);
        Self {
            table: Weak::new(),
            expr: Expr::from_node(ExprNode::Column {
                qualifier: Arc::from(qualifier),
                name: Arc::clone(&name),
                table_qualified: false,
            }),
            name,
        }
    }

    /// Returns the unqualified column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up the originating table, if it is still alive.
    #[must_use]
    pub fn table(&self) -> Option<Table> {
        self.table.upgrade().map(|data| Table { data })
    }

    /// Returns the column as an expression.
    #[must_use]
    pub fn expr(&self) -> Expr<Scalar<X>> {
        self.expr.clone()
    }

    /// Tokens naming the column without qualifier, as INSERT and UPDATE SET
    /// need.
    pub(crate) fn name_tokens(&self) -> Vec<SqlToken> {
        vec![SqlToken::Identifier(Arc::clone(&self.name))]
    }
}

impl<X: SqlType> Clone for Column<X> {
    fn clone(&self) -> Self {
        Self {
            table: Weak::clone(&self.table),
            name: Arc::clone(&self.name),
            expr: self.expr.clone(),
        }
    }
}

impl<X: SqlType> fmt::Debug for Column<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("expr", &self.expr)
            .finish_non_exhaustive()
    }
}

impl<X: SqlType> Deref for Column<X> {
    type Target = Expr<Scalar<X>>;

    fn deref(&self) -> &Self::Target {
        &self.expr
    }
}

impl<X: SqlType> SqlPart for Column<X> {
    fn tokens(&self) -> Vec<SqlToken> {
        self.expr.tokens()
    }
}

impl<X: SqlType> ScalarExpr for Column<X> {
    fn boxed_scalar(&self) -> Expr<AnyScalar> {
        self.expr.boxed()
    }
}

impl<X: SqlType> IntoScalar<X> for Column<X> {
    fn into_scalar(self) -> Expr<Scalar<X>> {
        self.expr
    }
}

impl<X: SqlType> IntoScalar<X> for &Column<X> {
    fn into_scalar(self) -> Expr<Scalar<X>> {
        self.expr.clone()
    }
}
