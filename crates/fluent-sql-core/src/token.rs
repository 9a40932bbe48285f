//! Tokens: the atomic units every expression and statement renders into.
//!
//! A token is either a lexical fragment, a name the dialect quotes at render
//! time, or a placeholder carrying its bound value. Sequences are joined
//! left to right without implicit separators; [`intersperse`] and [`enclose`]
//! insert them explicitly.

use std::borrow::Cow;
use std::sync::Arc;

use crate::value::Parameter;

/// One rendering unit.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlToken {
    /// A keyword, operator or punctuation emitted as-is.
    Fragment(Cow<'static, str>),
    /// A bare identifier, quoted by the dialect.
    Identifier(Arc<str>),
    /// `qualifier.name`, each part quoted by the dialect.
    QualifiedIdentifier(Arc<str>, Arc<str>),
    /// `table.name`, the table part formatted like [`SqlToken::TableName`].
    TableColumn(Arc<str>, Arc<str>),
    /// A raw table name, formatted by the dialect.
    TableName(Arc<str>),
    /// A placeholder bound to a value.
    Parameter(Parameter),
}

impl SqlToken {
    /// Creates a fragment token from a static string.
    #[must_use]
    pub const fn fragment(text: &'static str) -> Self {
        Self::Fragment(Cow::Borrowed(text))
    }

    /// Returns the parameter carried by a placeholder token.
    #[must_use]
    pub const fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            Self::Parameter(param) => Some(param),
            _ => None,
        }
    }
}

/// Anything that renders into tokens.
///
/// Calling [`SqlPart::tokens`] twice on the same value yields the same
/// sequence.
pub trait SqlPart {
    /// Returns the ordered token sequence.
    fn tokens(&self) -> Vec<SqlToken>;

    /// Returns the bound values, in placeholder order.
    ///
    /// Derived from [`SqlPart::tokens`], so the Nth parameter always belongs
    /// to the Nth placeholder.
    fn parameters(&self) -> Vec<Parameter> {
        self.tokens()
            .iter()
            .filter_map(SqlToken::as_parameter)
            .cloned()
            .collect()
    }
}

/// Flattens sequences in order, adding nothing between them.
pub fn concat<I>(sequences: I) -> Vec<SqlToken>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = SqlToken>,
{
    sequences.into_iter().flatten().collect()
}

/// Joins sequences with `separator` between adjacent ones.
pub fn intersperse<I>(sequences: I, separator: &SqlToken) -> Vec<SqlToken>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = SqlToken>,
{
    let mut out = Vec::new();
    for (i, sequence) in sequences.into_iter().enumerate() {
        if i > 0 {
            out.push(separator.clone());
        }
        out.extend(sequence);
    }
    out
}

/// Wraps a sequence between `open` and `close`.
#[must_use]
pub fn enclose(sequence: Vec<SqlToken>, open: SqlToken, close: SqlToken) -> Vec<SqlToken> {
    let mut out = Vec::with_capacity(sequence.len() + 2);
    out.push(open);
    out.extend(sequence);
    out.push(close);
    out
}

/// Shorthand for [`enclose`] with parentheses.
pub(crate) fn parenthesize(sequence: Vec<SqlToken>) -> Vec<SqlToken> {
    enclose(sequence, SqlToken::fragment("("), SqlToken::fragment(")"))
}

/// Shorthand for [`intersperse`] with commas.
pub(crate) fn comma_separated<I>(sequences: I) -> Vec<SqlToken>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = SqlToken>,
{
    intersperse(sequences, &SqlToken::fragment(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    fn frag(text: &'static str) -> SqlToken {
        SqlToken::fragment(text)
    }

    #[test]
    fn test_concat_preserves_order() {
        let tokens = concat(vec![vec![frag("a"), frag("b")], vec![], vec![frag("c")]]);
        assert_eq!(tokens, vec![frag("a"), frag("b"), frag("c")]);
    }

    #[test]
    fn test_intersperse_has_no_leading_or_trailing_separator() {
        let tokens = intersperse(
            vec![vec![frag("a")], vec![frag("b"), frag("c")], vec![frag("d")]],
            &frag(","),
        );
        assert_eq!(
            tokens,
            vec![frag("a"), frag(","), frag("b"), frag("c"), frag(","), frag("d")]
        );
    }

    #[test]
    fn test_intersperse_single_and_empty() {
        assert_eq!(intersperse(vec![vec![frag("a")]], &frag(",")), vec![frag("a")]);
        assert!(intersperse(Vec::<Vec<SqlToken>>::new(), &frag(",")).is_empty());
    }

    #[test]
    fn test_enclose() {
        let tokens = enclose(vec![frag("x")], frag("("), frag(")"));
        assert_eq!(tokens, vec![frag("("), frag("x"), frag(")")]);
        let empty = enclose(vec![], frag("("), frag(")"));
        assert_eq!(empty, vec![frag("("), frag(")")]);
    }

    struct Pair;

    impl SqlPart for Pair {
        fn tokens(&self) -> Vec<SqlToken> {
            vec![
                SqlToken::Parameter(Parameter::from_value(1_i64)),
                frag("="),
                SqlToken::Parameter(Parameter::from_value(String::from("two"))),
            ]
        }
    }

    #[test]
    fn test_parameters_follow_placeholder_order() {
        let params = Pair.parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].value, SqlValue::Int(1));
        assert_eq!(params[1].value, SqlValue::Text(String::from("two")));
    }
}
