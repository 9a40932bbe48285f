//! SELECT statement builder using the typestate pattern.
//!
//! The stages are:
//!
//! - [`FromlessSelect`]: only `from` is available.
//! - [`FieldlessSelect`]: the source is known; `where_clause` and
//!   `group_by` may be added before choosing the fields.
//! - [`FieldedSelect`]: a complete, renderable statement.

use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{Executable, SqlBuilder};
use crate::condition::{Condition, ConditionBuilder};
use crate::expr::{AnyRelation, AnyScalar, Expr, ExprNode, IntoRelation, ScalarExpr};
use crate::schema::Column;
use crate::token::{comma_separated, SqlPart, SqlToken};
use crate::value::SqlType;

// Typestate markers

/// Marker: no fields selected yet.
#[derive(Debug, Clone, Copy)]
pub struct NoFields;
/// Marker: fields have been selected.
#[derive(Debug, Clone, Copy)]
pub struct HasFields;

/// Sort direction of an ORDER BY key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    /// Renders nothing after the key.
    #[default]
    Ascending,
    /// Renders `DESC` after the key.
    Descending,
}

/// One ORDER BY key.
#[derive(Debug, Clone)]
pub struct OrderKey {
    expression: Expr<AnyScalar>,
    direction: OrderDirection,
}

impl OrderKey {
    /// Pairs an expression with a direction.
    #[must_use]
    pub fn new(expression: &impl ScalarExpr, direction: OrderDirection) -> Self {
        Self {
            expression: expression.boxed_scalar(),
            direction,
        }
    }

    /// Returns the direction.
    #[must_use]
    pub const fn direction(&self) -> OrderDirection {
        self.direction
    }
}

impl SqlPart for OrderKey {
    fn tokens(&self) -> Vec<SqlToken> {
        let mut tokens = self.expression.tokens();
        if self.direction == OrderDirection::Descending {
            tokens.push(SqlToken::fragment("DESC"));
        }
        tokens
    }
}

/// Operator joining two SELECTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    /// `UNION`
    Union,
    /// `UNION ALL`
    UnionAll,
}

impl SetOperator {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
        }
    }
}

/// The left operand of a combined query.
#[derive(Debug, Clone)]
struct CombinedSelect {
    left: Arc<SelectStatement>,
    operator: SetOperator,
}

/// The statement accumulated across the SELECT stages.
#[derive(Debug, Clone)]
pub(crate) struct SelectStatement {
    combined: Option<CombinedSelect>,
    relation: Expr<AnyRelation>,
    distinct: bool,
    fields: Vec<Expr<AnyScalar>>,
    where_clause: ConditionBuilder,
    group_by: Vec<Expr<AnyScalar>>,
    having: ConditionBuilder,
    order_by: Vec<OrderKey>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectStatement {
    fn new(combined: Option<CombinedSelect>, relation: Expr<AnyRelation>) -> Self {
        Self {
            combined,
            relation,
            distinct: false,
            fields: vec![],
            where_clause: ConditionBuilder::default(),
            group_by: vec![],
            having: ConditionBuilder::default(),
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }
}

fn number(n: u64) -> SqlToken {
    SqlToken::Fragment(Cow::Owned(n.to_string()))
}

impl SqlPart for SelectStatement {
    fn tokens(&self) -> Vec<SqlToken> {
        let mut tokens = vec![];

        if let Some(combined) = &self.combined {
            tokens.extend(combined.left.tokens());
            tokens.push(SqlToken::fragment(combined.operator.keyword()));
        }

        tokens.push(SqlToken::fragment("SELECT"));
        if self.distinct {
            tokens.push(SqlToken::fragment("DISTINCT"));
        }
        tokens.extend(comma_separated(self.fields.iter().map(SqlPart::tokens)));

        tokens.push(SqlToken::fragment("FROM"));
        tokens.extend(self.relation.tokens());

        if !self.where_clause.is_trivial() {
            tokens.push(SqlToken::fragment("WHERE"));
            tokens.extend(self.where_clause.tokens());
        }

        if !self.group_by.is_empty() {
            tokens.push(SqlToken::fragment("GROUP BY"));
            tokens.extend(comma_separated(self.group_by.iter().map(SqlPart::tokens)));
        }

        if !self.having.is_trivial() {
            tokens.push(SqlToken::fragment("HAVING"));
            tokens.extend(self.having.tokens());
        }

        if !self.order_by.is_empty() {
            tokens.push(SqlToken::fragment("ORDER BY"));
            tokens.extend(comma_separated(self.order_by.iter().map(SqlPart::tokens)));
        }

        if let Some(n) = self.limit {
            tokens.extend([SqlToken::fragment("LIMIT"), number(n)]);
        }

        if let Some(n) = self.offset {
            tokens.extend([SqlToken::fragment("OFFSET"), number(n)]);
        }

        tokens
    }
}

/// A SELECT without a source. Only [`FromlessSelect::from`] is available.
#[derive(Debug, Clone)]
pub struct FromlessSelect {
    sql: SqlBuilder,
    combined: Option<CombinedSelect>,
}

impl FromlessSelect {
    pub(super) const fn new(sql: SqlBuilder) -> Self {
        Self {
            sql,
            combined: None,
        }
    }

    /// Sets the source relation: a table, a join or a sub-query.
    #[must_use]
    pub fn from(self, relation: impl IntoRelation) -> FieldlessSelect {
        Select {
            sql: self.sql,
            statement: SelectStatement::new(self.combined, relation.into_relation()),
            _state: PhantomData,
        }
    }
}

/// A SELECT with a source, in stage `Fields`.
#[derive(Debug, Clone)]
pub struct Select<Fields> {
    sql: SqlBuilder,
    statement: SelectStatement,
    _state: PhantomData<Fields>,
}

/// A SELECT whose fields are not chosen yet.
pub type FieldlessSelect = Select<NoFields>;

/// A complete SELECT.
pub type FieldedSelect = Select<HasFields>;

// Methods available in both stages
impl<Fields> Select<Fields> {
    /// Adds a WHERE condition. Repeated calls are combined with AND.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<Condition>) -> Self {
        self.statement.where_clause.push(condition);
        self
    }

    /// Appends GROUP BY keys.
    #[must_use]
    pub fn group_by(mut self, keys: &[&dyn ScalarExpr]) -> Self {
        self.statement
            .group_by
            .extend(keys.iter().map(|key| key.boxed_scalar()));
        self
    }
}

// Transition: NoFields -> HasFields
impl Select<NoFields> {
    /// Chooses the fields.
    #[must_use]
    pub fn select(self, fields: &[&dyn ScalarExpr]) -> FieldedSelect {
        self.select_exprs(fields.iter().map(|field| field.boxed_scalar()))
    }

    /// Chooses the fields from already boxed expressions, e.g. the
    /// `all_columns()` list of a derived table.
    #[must_use]
    pub fn select_exprs(self, fields: impl IntoIterator<Item = Expr<AnyScalar>>) -> FieldedSelect {
        let mut statement = self.statement;
        statement.fields = fields.into_iter().collect();
        if statement.fields.is_empty() {
            statement.fields.push(star());
        }
        Select {
            sql: self.sql,
            statement,
            _state: PhantomData,
        }
    }

    /// `SELECT *`
    #[must_use]
    pub fn select_all(self) -> FieldedSelect {
        self.select_exprs([star()])
    }
}

fn star() -> Expr<AnyScalar> {
    Expr::from_node(ExprNode::Fragment("*"))
}

// Methods available once the fields are known
impl Select<HasFields> {
    /// Adds a HAVING condition. Repeated calls are combined with AND.
    #[must_use]
    pub fn having(mut self, condition: impl Into<Condition>) -> Self {
        self.statement.having.push(condition);
        self
    }

    /// Appends an ORDER BY key.
    #[must_use]
    pub fn order_by(mut self, key: &impl ScalarExpr, direction: OrderDirection) -> Self {
        self.statement.order_by.push(OrderKey::new(key, direction));
        self
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.statement.distinct = true;
        self
    }

    /// Adds a LIMIT clause.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.statement.limit = Some(n);
        self
    }

    /// Adds an OFFSET clause.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.statement.offset = Some(n);
        self
    }

    /// `self UNION <next>`: the returned stage builds the right operand.
    #[must_use]
    pub fn union(self) -> FromlessSelect {
        self.combine(SetOperator::Union)
    }

    /// `self UNION ALL <next>`
    #[must_use]
    pub fn union_all(self) -> FromlessSelect {
        self.combine(SetOperator::UnionAll)
    }

    fn combine(self, operator: SetOperator) -> FromlessSelect {
        FromlessSelect {
            sql: self.sql,
            combined: Some(CombinedSelect {
                left: Arc::new(self.statement),
                operator,
            }),
        }
    }

    /// Wraps the statement as a sub-query usable as a relation:
    /// `( SELECT ... ) AS alias`.
    #[must_use]
    pub fn as_relation(self, alias: &str) -> Subquery {
        Subquery {
            alias: Arc::from(alias),
            statement: Arc::new(self.statement),
        }
    }
}

impl<Fields> SqlPart for Select<Fields> {
    fn tokens(&self) -> Vec<SqlToken> {
        self.statement.tokens()
    }
}

impl Executable for Select<HasFields> {
    fn sql_builder(&self) -> &SqlBuilder {
        &self.sql
    }
}

/// A SELECT used as a relation.
#[derive(Debug, Clone)]
pub struct Subquery {
    alias: Arc<str>,
    statement: Arc<SelectStatement>,
}

impl Subquery {
    /// Returns the alias.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns a column exposed by the sub-query, qualified by its alias.
    #[must_use]
    pub fn column<X: SqlType>(&self, name: &str) -> Column<X> {
        Column::unbound(&self.alias, name)
    }

    /// Returns the sub-query as a relation expression.
    #[must_use]
    pub fn relation(&self) -> Expr<AnyRelation> {
        Expr::from_node(ExprNode::Subquery {
            statement: Arc::clone(&self.statement),
            alias: Arc::clone(&self.alias),
        })
    }
}

impl SqlPart for Subquery {
    fn tokens(&self) -> Vec<SqlToken> {
        self.relation().tokens()
    }
}

impl IntoRelation for Subquery {
    fn into_relation(self) -> Expr<AnyRelation> {
        self.relation()
    }
}

impl IntoRelation for &Subquery {
    fn into_relation(self) -> Expr<AnyRelation> {
        self.relation()
    }
}
