//! Boolean conditions and the AND/OR combinator algebra.
//!
//! A [`Condition`] is immutable once built. Combining conditions goes
//! through a [`ConditionBuilder`], an owned accumulator that keeps nested
//! groups flat: `a.and(b).and(c)` is a single three-way AND, while
//! `a.and(b).or(c)` keeps the AND group as a child of the OR.
//!
//! ```rust
//! use fluent_sql_core::{SqlBuilder, Table};
//!
//! let sql = SqlBuilder::generic();
//! let e = Table::new("employees", "e");
//! let age = e.column::<i64>("age");
//! let name = e.column::<String>("name");
//!
//! let cond = age.greater_than(18_i64).and(age.less_than(65_i64)).or(name.equal("root"));
//! let (text, params) = sql.render(&cond).unwrap();
//! assert_eq!(
//!     text,
//!     "( ( \"e\".\"age\" > ? AND \"e\".\"age\" < ? ) OR \"e\".\"name\" = ? )"
//! );
//! assert_eq!(params.len(), 3);
//! ```

use std::sync::Arc;

use crate::expr::{Expr, ExprNode, Scalar};
use crate::token::{concat, intersperse, parenthesize, SqlPart, SqlToken};

/// How the children of a combined condition are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// All children must hold.
    And,
    /// At least one child must hold.
    Or,
}

impl Combinator {
    const fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

#[derive(Debug, Clone)]
enum ConditionNode {
    Atomic(Arc<ExprNode>),
    Negated(Arc<Condition>),
    Combined {
        combinator: Combinator,
        children: Arc<[Condition]>,
    },
}

/// An immutable boolean predicate.
#[derive(Debug, Clone)]
pub struct Condition {
    node: ConditionNode,
}

impl Condition {
    pub(crate) fn from_node(node: ExprNode) -> Self {
        Self {
            node: ConditionNode::Atomic(Arc::new(node)),
        }
    }

    /// Treats a boolean expression, such as a `bool` column, as a condition.
    #[must_use]
    pub fn atomic(expr: &Expr<Scalar<bool>>) -> Self {
        Self {
            node: ConditionNode::Atomic(Arc::clone(expr.node())),
        }
    }

    /// Returns true for a combined condition without children.
    ///
    /// Statements skip trivial conditions instead of rendering `( )`.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        matches!(&self.node, ConditionNode::Combined { children, .. } if children.is_empty())
    }

    /// `NOT ( self )`
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self {
            node: ConditionNode::Negated(Arc::new(self)),
        }
    }

    /// `self AND rhs`
    #[must_use]
    pub fn and(self, rhs: impl Into<Self>) -> ConditionBuilder {
        ConditionBuilder::new(Combinator::And).and(self).and(rhs)
    }

    /// `self OR rhs`
    #[must_use]
    pub fn or(self, rhs: impl Into<Self>) -> ConditionBuilder {
        ConditionBuilder::new(Combinator::Or).or(self).or(rhs)
    }

    fn combined_children(&self, combinator: Combinator) -> Option<&Arc<[Self]>> {
        match &self.node {
            ConditionNode::Combined {
                combinator: own,
                children,
            } if *own == combinator => Some(children),
            _ => None,
        }
    }
}

impl SqlPart for Condition {
    fn tokens(&self) -> Vec<SqlToken> {
        match &self.node {
            ConditionNode::Atomic(expr) => expr.tokens(),
            ConditionNode::Negated(inner) => concat([
                vec![SqlToken::fragment("NOT")],
                parenthesize(inner.tokens()),
            ]),
            ConditionNode::Combined {
                combinator,
                children,
            } => combined_tokens(*combinator, children),
        }
    }
}

fn combined_tokens(combinator: Combinator, children: &[Condition]) -> Vec<SqlToken> {
    parenthesize(intersperse(
        children.iter().map(SqlPart::tokens),
        &SqlToken::fragment(combinator.keyword()),
    ))
}

/// Accumulates child conditions under one combinator.
///
/// The builder is owned while under construction; [`ConditionBuilder::build`]
/// consumes it and publishes an immutable [`Condition`].
#[derive(Debug, Clone)]
pub struct ConditionBuilder {
    combinator: Combinator,
    conditions: Vec<Condition>,
}

impl ConditionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new(combinator: Combinator) -> Self {
        Self {
            combinator,
            conditions: Vec::new(),
        }
    }

    /// Returns the combinator.
    #[must_use]
    pub const fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// Returns true when no child has been added.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true when no child has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Adds a child. A child combined with the same combinator is flattened
    /// into this builder; trivial children are dropped.
    pub fn push(&mut self, condition: impl Into<Condition>) {
        let condition = condition.into();
        if condition.is_trivial() {
            return;
        }
        if let Some(children) = condition.combined_children(self.combinator) {
            self.conditions.extend(children.iter().cloned());
        } else {
            self.conditions.push(condition);
        }
    }

    /// `self AND rhs`: appends when this builder already combines with AND,
    /// otherwise wraps this builder in a new AND group.
    #[must_use]
    pub fn and(self, rhs: impl Into<Condition>) -> Self {
        self.combine(Combinator::And, rhs.into())
    }

    /// `self OR rhs`: appends when this builder already combines with OR,
    /// otherwise wraps this builder in a new OR group.
    #[must_use]
    pub fn or(self, rhs: impl Into<Condition>) -> Self {
        self.combine(Combinator::Or, rhs.into())
    }

    fn combine(mut self, combinator: Combinator, rhs: Condition) -> Self {
        if self.combinator == combinator {
            self.push(rhs);
            self
        } else {
            let mut outer = Self::new(combinator);
            outer.push(self);
            outer.push(rhs);
            outer
        }
    }

    /// Publishes the accumulated condition.
    #[must_use]
    pub fn build(self) -> Condition {
        Condition {
            node: ConditionNode::Combined {
                combinator: self.combinator,
                children: self.conditions.into(),
            },
        }
    }
}

impl Default for ConditionBuilder {
    fn default() -> Self {
        Self::new(Combinator::And)
    }
}

impl From<ConditionBuilder> for Condition {
    fn from(builder: ConditionBuilder) -> Self {
        builder.build()
    }
}

impl SqlPart for ConditionBuilder {
    fn tokens(&self) -> Vec<SqlToken> {
        combined_tokens(self.combinator, &self.conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Expr, ExprNode};

    fn cond(name: &'static str) -> Condition {
        let column: Expr<Scalar<bool>> = Expr::from_node(ExprNode::Column {
            qualifier: Arc::from("t"),
            name: Arc::from(name),
            table_qualified: false,
        });
        Condition::atomic(&column)
    }

    fn text(part: &impl SqlPart) -> String {
        part.tokens()
            .iter()
            .map(|token| match token {
                SqlToken::Fragment(fragment) => fragment.to_string(),
                SqlToken::QualifiedIdentifier(_, name) => name.to_string(),
                other => panic!("unexpected token {other:?}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_atomic_renders_expression_unchanged() {
        assert_eq!(text(&cond("a")), "a");
    }

    #[test]
    fn test_and_chain_is_flat() {
        let builder = cond("a").and(cond("b")).and(cond("c"));
        assert_eq!(builder.len(), 3);
        assert_eq!(text(&builder), "( a AND b AND c )");
    }

    #[test]
    fn test_mixed_combinators_keep_groups() {
        let builder = cond("a").and(cond("b")).or(cond("c"));
        assert_eq!(builder.combinator(), Combinator::Or);
        assert_eq!(builder.len(), 2);
        assert_eq!(text(&builder), "( ( a AND b ) OR c )");
    }

    #[test]
    fn test_nested_same_combinator_rhs_is_flattened() {
        let builder = cond("a").or(cond("b").or(cond("c")));
        assert_eq!(builder.len(), 3);
        assert_eq!(text(&builder), "( a OR b OR c )");
    }

    #[test]
    fn test_published_group_is_flattened_without_mutation() {
        let published = cond("a").and(cond("b")).build();
        let extended = published.clone().and(cond("c"));
        assert_eq!(text(&extended), "( a AND b AND c )");
        assert_eq!(text(&published), "( a AND b )");
    }

    #[test]
    fn test_trivial() {
        let empty = ConditionBuilder::default();
        assert!(empty.is_trivial());
        assert!(empty.clone().build().is_trivial());
        assert!(!cond("a").is_trivial());

        let builder = cond("a").and(empty);
        assert_eq!(builder.len(), 1);
        assert_eq!(text(&builder), "( a )");
    }

    #[test]
    fn test_not() {
        let negated = cond("a").or(cond("b")).build().not();
        assert_eq!(text(&negated), "NOT ( ( a OR b ) )");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let built = cond("a").and(cond("b")).or(cond("c")).build();
        assert_eq!(built.tokens(), built.tokens());
    }
}
