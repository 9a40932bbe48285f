//! Typed expression trees.
//!
//! An [`Expr<T>`] is a cheap handle onto an immutable tree node. The tag `T`
//! records, at compile time only, whether the expression is a scalar or a
//! relation and which Rust type its values have. Comparing a `String`
//! column with an `i64` literal does not compile.
//!
//! ```rust
//! use fluent_sql_core::{SqlBuilder, Table};
//!
//! let sql = SqlBuilder::generic();
//! let employees = Table::new("employees", "e");
//! let age = employees.column::<i64>("age");
//!
//! let (text, params) = sql.render(&age.greater_than(30_i64)).unwrap();
//! assert_eq!(text, "\"e\".\"age\" > ?");
//! assert_eq!(params.len(), 1);
//! ```
//!
//! ```compile_fail
//! use fluent_sql_core::Table;
//!
//! let employees = Table::new("employees", "e");
//! let name = employees.column::<String>("name");
//! let _ = name.equal(5_i64); // String column vs integer literal
//! ```

mod functions;
mod tag;

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use functions::{coalesce, count, count_all, invoke, lower, max, min, sum, upper};
pub use tag::{AnyRelation, AnyScalar, Relation, RelationTag, Scalar, ScalarTag, SqlTypeTag};

use crate::builder::SelectStatement;
use crate::condition::Condition;
use crate::token::{comma_separated, concat, parenthesize, SqlPart, SqlToken};
use crate::value::{Parameter, SqlType};

/// Kind of join between two relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
}

impl JoinKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
        }
    }
}

/// A node of the expression tree. Children are shared, never mutated.
#[derive(Debug)]
pub(crate) enum ExprNode {
    Literal(Parameter),
    Fragment(&'static str),
    Column {
        qualifier: Arc<str>,
        name: Arc<str>,
        /// The qualifier is a raw table name rather than an alias.
        table_qualified: bool,
    },
    Table {
        raw_name: Arc<str>,
        alias: Arc<str>,
    },
    Invoke {
        function: Arc<str>,
        arguments: Vec<Arc<ExprNode>>,
    },
    Infix {
        lhs: Arc<ExprNode>,
        op: &'static str,
        rhs: Arc<ExprNode>,
    },
    Postfix {
        operand: Arc<ExprNode>,
        op: &'static str,
    },
    Between {
        operand: Arc<ExprNode>,
        low: Arc<ExprNode>,
        high: Arc<ExprNode>,
        negated: bool,
    },
    InList {
        operand: Arc<ExprNode>,
        items: Vec<Arc<ExprNode>>,
        negated: bool,
    },
    Join {
        kind: JoinKind,
        left: Arc<ExprNode>,
        right: Arc<ExprNode>,
        on: Condition,
    },
    Subquery {
        statement: Arc<SelectStatement>,
        alias: Arc<str>,
    },
}

impl SqlPart for ExprNode {
    fn tokens(&self) -> Vec<SqlToken> {
        match self {
            Self::Literal(param) => vec![SqlToken::Parameter(param.clone())],
            Self::Fragment(text) => vec![SqlToken::fragment(*text)],
            Self::Column {
                qualifier,
                name,
                table_qualified: true,
            } => vec![SqlToken::TableColumn(Arc::clone(qualifier), Arc::clone(name))],
            Self::Column {
                qualifier,
                name,
                table_qualified: false,
            } => vec![SqlToken::QualifiedIdentifier(
                Arc::clone(qualifier),
                Arc::clone(name),
            )],
            Self::Table { raw_name, alias } => {
                let mut tokens = vec![SqlToken::TableName(Arc::clone(raw_name))];
                if alias != raw_name {
                    tokens.push(SqlToken::fragment("AS"));
                    tokens.push(SqlToken::Identifier(Arc::clone(alias)));
                }
                tokens
            }
            Self::Invoke {
                function,
                arguments,
            } => concat([
                vec![SqlToken::Fragment(Cow::Owned(function.to_string()))],
                parenthesize(comma_separated(arguments.iter().map(|arg| arg.tokens()))),
            ]),
            Self::Infix { lhs, op, rhs } => {
                concat([lhs.tokens(), vec![SqlToken::fragment(*op)], rhs.tokens()])
            }
            Self::Postfix { operand, op } => {
                concat([operand.tokens(), vec![SqlToken::fragment(*op)]])
            }
            Self::Between {
                operand,
                low,
                high,
                negated,
            } => concat([
                operand.tokens(),
                vec![SqlToken::fragment(if *negated {
                    "NOT BETWEEN"
                } else {
                    "BETWEEN"
                })],
                low.tokens(),
                vec![SqlToken::fragment("AND")],
                high.tokens(),
            ]),
            Self::InList {
                operand,
                items,
                negated,
            } => concat([
                operand.tokens(),
                vec![SqlToken::fragment(if *negated { "NOT IN" } else { "IN" })],
                parenthesize(comma_separated(items.iter().map(|item| item.tokens()))),
            ]),
            Self::Join {
                kind,
                left,
                right,
                on,
            } => concat([
                left.tokens(),
                vec![SqlToken::fragment(kind.keyword())],
                right.tokens(),
                vec![SqlToken::fragment("ON")],
                on.tokens(),
            ]),
            Self::Subquery { statement, alias } => concat([
                parenthesize(statement.tokens()),
                vec![
                    SqlToken::fragment("AS"),
                    SqlToken::Identifier(Arc::clone(alias)),
                ],
            ]),
        }
    }
}

/// A typed SQL expression.
///
/// Cloning is cheap: clones share the same immutable node.
pub struct Expr<T: SqlTypeTag> {
    node: Arc<ExprNode>,
    _tag: PhantomData<T>,
}

impl<T: SqlTypeTag> Expr<T> {
    pub(crate) fn from_node(node: ExprNode) -> Self {
        Self::from_shared(Arc::new(node))
    }

    pub(crate) const fn from_shared(node: Arc<ExprNode>) -> Self {
        Self {
            node,
            _tag: PhantomData,
        }
    }

    pub(crate) const fn node(&self) -> &Arc<ExprNode> {
        &self.node
    }

    /// Re-tags the expression as `Y` without touching its tokens.
    ///
    /// Nothing is checked. The caller vouches that the expression really
    /// produces `Y`; a wrong cast surfaces later as a database type error.
    #[must_use]
    pub fn force_cast<Y: SqlTypeTag>(&self) -> Expr<Y> {
        Expr::from_shared(Arc::clone(&self.node))
    }
}

impl<T: SqlTypeTag> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self::from_shared(Arc::clone(&self.node))
    }
}

impl<T: SqlTypeTag> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&self.node).finish()
    }
}

impl<T: SqlTypeTag> SqlPart for Expr<T> {
    fn tokens(&self) -> Vec<SqlToken> {
        self.node.tokens()
    }
}

/// Creates a bound literal.
#[must_use]
pub fn value<X: SqlType>(value: X) -> Expr<Scalar<X>> {
    Expr::from_node(ExprNode::Literal(Parameter::from_value(value)))
}

/// Creates a bound `NULL` typed as `X`.
#[must_use]
pub fn null<X: SqlType>() -> Expr<Scalar<Option<X>>> {
    value(None::<X>)
}

impl Expr<AnyScalar> {
    /// Recovers a typed scalar. Unchecked, see [`Expr::force_cast`].
    #[must_use]
    pub fn unboxed<X: SqlType>(&self) -> Expr<Scalar<X>> {
        self.force_cast()
    }
}

impl<X: 'static> Expr<Relation<X>> {
    /// Forgets the row type.
    #[must_use]
    pub fn boxed(&self) -> Expr<AnyRelation> {
        self.force_cast()
    }
}

impl<T: RelationTag> Expr<T> {
    /// `self INNER JOIN rhs ON on`
    ///
    /// # Panics
    ///
    /// Panics if `on` is trivial (an empty [`crate::ConditionBuilder`]):
    /// `ON` needs a predicate.
    #[must_use]
    pub fn inner_join(
        &self,
        rhs: impl IntoRelation,
        on: impl Into<Condition>,
    ) -> Expr<AnyRelation> {
        self.join(JoinKind::Inner, rhs, on.into())
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
        self.join(JoinKind::Left, rhs, on.into())
    }

    fn join(&self, kind: JoinKind, rhs: impl IntoRelation, on: Condition) -> Expr<AnyRelation> {
        assert!(!on.is_trivial(), "join condition must not be empty");
        Expr::from_node(ExprNode::Join {
            kind,
            left: Arc::clone(&self.node),
            right: Arc::clone(rhs.into_relation().node()),
            on,
        })
    }
}

impl<X: SqlType> Expr<Scalar<X>> {
    /// Forgets the value type, e.g. to mix columns in a SELECT list.
    #[must_use]
    pub fn boxed(&self) -> Expr<AnyScalar> {
        self.force_cast()
    }

    fn compare(&self, op: &'static str, rhs: impl IntoScalar<X>) -> Condition {
        Condition::from_node(ExprNode::Infix {
            lhs: Arc::clone(&self.node),
            op,
            rhs: Arc::clone(rhs.into_scalar().node()),
        })
    }

    fn postfix(&self, op: &'static str) -> Condition {
        Condition::from_node(ExprNode::Postfix {
            operand: Arc::clone(&self.node),
            op,
        })
    }

    /// `self = rhs`
    #[must_use]
    pub fn equal(&self, rhs: impl IntoScalar<X>) -> Condition {
        self.compare("=", rhs)
    }

    /// `self <> rhs`
    #[must_use]
    pub fn not_equal(&self, rhs: impl IntoScalar<X>) -> Condition {
        self.compare("<>", rhs)
    }

    /// `self < rhs`
    #[must_use]
    pub fn less_than(&self, rhs: impl IntoScalar<X>) -> Condition {
        self.compare("<", rhs)
    }

    /// `self <= rhs`
    #[must_use]
    pub fn less_or_equal(&self, rhs: impl IntoScalar<X>) -> Condition {
        self.compare("<=", rhs)
    }

    /// `self > rhs`
    #[must_use]
    pub fn greater_than(&self, rhs: impl IntoScalar<X>) -> Condition {
        self.compare(">", rhs)
    }

    /// `self >= rhs`
    #[must_use]
    pub fn greater_or_equal(&self, rhs: impl IntoScalar<X>) -> Condition {
        self.compare(">=", rhs)
    }

    /// `self IS NULL`
    #[must_use]
    pub fn is_null(&self) -> Condition {
        self.postfix("IS NULL")
    }

    /// `self IS NOT NULL`
    #[must_use]
    pub fn is_not_null(&self) -> Condition {
        self.postfix("IS NOT NULL")
    }

    /// `self BETWEEN low AND high`
    #[must_use]
    pub fn between(&self, low: impl IntoScalar<X>, high: impl IntoScalar<X>) -> Condition {
        self.range(low, high, false)
    }

    /// `self NOT BETWEEN low AND high`
    #[must_use]
    pub fn not_between(&self, low: impl IntoScalar<X>, high: impl IntoScalar<X>) -> Condition {
        self.range(low, high, true)
    }

    fn range(&self, low: impl IntoScalar<X>, high: impl IntoScalar<X>, negated: bool) -> Condition {
        Condition::from_node(ExprNode::Between {
            operand: Arc::clone(&self.node),
            low: Arc::clone(low.into_scalar().node()),
            high: Arc::clone(high.into_scalar().node()),
            negated,
        })
    }

    /// `self IN ( items... )`
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty: `IN ()` is not valid SQL.
    #[must_use]
    pub fn in_list<I>(&self, items: I) -> Condition
    where
        I: IntoIterator,
        I::Item: IntoScalar<X>,
    {
        self.membership(items, false)
    }

    /// `self NOT IN ( items... )`
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    #[must_use]
    pub fn not_in_list<I>(&self, items: I) -> Condition
    where
        I: IntoIterator,
        I::Item: IntoScalar<X>,
    {
        self.membership(items, true)
    }

    fn membership<I>(&self, items: I, negated: bool) -> Condition
    where
        I: IntoIterator,
        I::Item: IntoScalar<X>,
    {
        let items: Vec<Arc<ExprNode>> = items
            .into_iter()
            .map(|item| Arc::clone(item.into_scalar().node()))
            .collect();
        assert!(!items.is_empty(), "IN list requires at least one item");
        Condition::from_node(ExprNode::InList {
            operand: Arc::clone(&self.node),
            items,
            negated,
        })
    }
}

impl Expr<Scalar<String>> {
    /// `concat(self, rest...)`
    #[must_use]
    pub fn concat<I>(&self, rest: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoScalar<String>,
    {
        let arguments = std::iter::once(self.boxed())
            .chain(rest.into_iter().map(|item| item.into_scalar().boxed()));
        invoke("concat", arguments)
    }

    /// `self LIKE pattern`
    #[must_use]
    pub fn like(&self, pattern: impl IntoScalar<String>) -> Condition {
        self.compare("LIKE", pattern)
    }

    /// `self NOT LIKE pattern`
    #[must_use]
    pub fn not_like(&self, pattern: impl IntoScalar<String>) -> Condition {
        self.compare("NOT LIKE", pattern)
    }
}

/// A value usable as a scalar operand of type `X`.
///
/// Plain Rust values become bound parameters.
pub trait IntoScalar<X: SqlType> {
    /// Converts into a typed scalar expression.
    fn into_scalar(self) -> Expr<Scalar<X>>;
}

impl<X: SqlType> IntoScalar<X> for Expr<Scalar<X>> {
    fn into_scalar(self) -> Self {
        self
    }
}

impl<X: SqlType> IntoScalar<X> for &Expr<Scalar<X>> {
    fn into_scalar(self) -> Expr<Scalar<X>> {
        self.clone()
    }
}

impl<X: SqlType> IntoScalar<Option<X>> for Option<X> {
    fn into_scalar(self) -> Expr<Scalar<Self>> {
        value(self)
    }
}

macro_rules! impl_into_scalar {
    ($($ty:ty),+) => {
        $(
            impl IntoScalar<$ty> for $ty {
                fn into_scalar(self) -> Expr<Scalar<$ty>> {
                    value(self)
                }
            }

            impl IntoScalar<Option<$ty>> for $ty {
                fn into_scalar(self) -> Expr<Scalar<Option<$ty>>> {
                    value(Some(self))
                }
            }
        )+
    };
}

impl_into_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, Vec<u8>);

impl IntoScalar<String> for &str {
    fn into_scalar(self) -> Expr<Scalar<String>> {
        value(String::from(self))
    }
}

impl IntoScalar<Option<String>> for &str {
    fn into_scalar(self) -> Expr<Scalar<Option<String>>> {
        value(Some(String::from(self)))
    }
}

impl IntoScalar<Vec<u8>> for &[u8] {
    fn into_scalar(self) -> Expr<Scalar<Vec<u8>>> {
        value(self.to_vec())
    }
}

/// Any scalar expression, whatever its value type.
///
/// Clause methods that accept scalars of mixed types (SELECT lists,
/// GROUP BY, ORDER BY) take `ScalarExpr`.
pub trait ScalarExpr {
    /// Returns the expression with its value type erased.
    fn boxed_scalar(&self) -> Expr<AnyScalar>;
}

impl<T: ScalarTag> ScalarExpr for Expr<T> {
    fn boxed_scalar(&self) -> Expr<AnyScalar> {
        self.force_cast()
    }
}

/// Anything usable as the source relation of a statement: tables, joins and
/// sub-queries.
pub trait IntoRelation {
    /// Returns the relation expression.
    fn into_relation(self) -> Expr<AnyRelation>;
}

impl IntoRelation for Expr<AnyRelation> {
    fn into_relation(self) -> Self {
        self
    }
}

impl IntoRelation for &Expr<AnyRelation> {
    fn into_relation(self) -> Expr<AnyRelation> {
        self.clone()
    }
}

impl<X: 'static> IntoRelation for Expr<Relation<X>> {
    fn into_relation(self) -> Expr<AnyRelation> {
        self.boxed()
    }
}

impl<X: 'static> IntoRelation for &Expr<Relation<X>> {
    fn into_relation(self) -> Expr<AnyRelation> {
        self.boxed()
    }
}
