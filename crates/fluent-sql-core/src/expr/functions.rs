//! Function calls and the common SQL functions built on them.

use std::sync::Arc;

use super::{AnyScalar, Expr, ExprNode, IntoScalar, Scalar, ScalarExpr, SqlTypeTag};
use crate::value::SqlType;

/// Builds `function_name ( arg0 , arg1 , ... )` tagged as `T`.
///
/// # Panics
///
/// Panics if `function_name` is empty or contains anything other than ASCII
/// alphanumerics, `_` and `.`. Function names are emitted verbatim, so they
/// must come from code, never from user input.
pub fn invoke<T, I>(function_name: &str, arguments: I) -> Expr<T>
where
    T: SqlTypeTag,
    I: IntoIterator<Item = Expr<AnyScalar>>,
{
    assert!(
        is_valid_function_name(function_name),
        "invalid SQL function name: {function_name:?}"
    );
    Expr::from_node(ExprNode::Invoke {
        function: Arc::from(function_name),
        arguments: arguments
            .into_iter()
            .map(|arg| Arc::clone(arg.node()))
            .collect(),
    })
}

fn is_valid_function_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// `COUNT(expr)`
#[must_use]
pub fn count(expr: &impl ScalarExpr) -> Expr<Scalar<i64>> {
    invoke("COUNT", [expr.boxed_scalar()])
}

/// `COUNT(*)`
#[must_use]
pub fn count_all() -> Expr<Scalar<i64>> {
    invoke("COUNT", [Expr::from_node(ExprNode::Fragment("*"))])
}

/// `SUM(expr)`
#[must_use]
pub fn sum<X: SqlType>(expr: &Expr<Scalar<X>>) -> Expr<Scalar<X>> {
    invoke("SUM", [expr.boxed()])
}

/// `MAX(expr)`
#[must_use]
pub fn max<X: SqlType>(expr: &Expr<Scalar<X>>) -> Expr<Scalar<X>> {
    invoke("MAX", [expr.boxed()])
}

/// `MIN(expr)`
#[must_use]
pub fn min<X: SqlType>(expr: &Expr<Scalar<X>>) -> Expr<Scalar<X>> {
    invoke("MIN", [expr.boxed()])
}

/// `LOWER(expr)`
#[must_use]
pub fn lower(expr: &Expr<Scalar<String>>) -> Expr<Scalar<String>> {
    invoke("LOWER", [expr.boxed()])
}

/// `UPPER(expr)`
#[must_use]
pub fn upper(expr: &Expr<Scalar<String>>) -> Expr<Scalar<String>> {
    invoke("UPPER", [expr.boxed()])
}

/// `COALESCE(expr, fallback)`: turns a nullable `X` into an `X`.
#[must_use]
pub fn coalesce<X: SqlType>(
    expr: &Expr<Scalar<Option<X>>>,
    fallback: impl IntoScalar<X>,
) -> Expr<Scalar<X>> {
    invoke("COALESCE", [expr.boxed(), fallback.into_scalar().boxed()])
}
