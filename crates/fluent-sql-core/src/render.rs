//! Turns a token sequence into SQL text and its parameter list.

use crate::dialect::Dialect;
use crate::error::Result;
use crate::token::SqlToken;
use crate::value::Parameter;

/// Joins tokens with single spaces, asking `dialect` for names and
/// placeholders. Placeholders are numbered from 1 in token order.
pub(crate) fn render_tokens(
    dialect: &dyn Dialect,
    tokens: &[SqlToken],
) -> Result<(String, Vec<Parameter>)> {
    let mut pieces: Vec<String> = Vec::with_capacity(tokens.len());
    let mut params = vec![];

    for token in tokens {
        let piece = match token {
            SqlToken::Fragment(text) => text.to_string(),
            SqlToken::Identifier(name) => quote(dialect, name)?,
            SqlToken::QualifiedIdentifier(qualifier, name) => {
                format!("{}.{}", quote(dialect, qualifier)?, quote(dialect, name)?)
            }
            SqlToken::TableName(raw) => table_name(dialect, raw)?,
            SqlToken::TableColumn(raw, name) => {
                format!("{}.{}", table_name(dialect, raw)?, quote(dialect, name)?)
            }
            SqlToken::Parameter(param) => {
                params.push(param.clone());
                dialect.placeholder(params.len()).into_owned()
            }
        };
        pieces.push(piece);
    }

    tracing::trace!(
        dialect = dialect.name(),
        tokens = tokens.len(),
        parameters = params.len(),
        "rendered statement"
    );

    Ok((pieces.join(" "), params))
}

fn quote(dialect: &dyn Dialect, name: &str) -> Result<String> {
    dialect.quote_identifier(name).inspect_err(|err| {
        tracing::debug!(dialect = dialect.name(), error = %err, "identifier rejected");
    })
}

fn table_name(dialect: &dyn Dialect, raw: &str) -> Result<String> {
    dialect.build_table_name(raw).inspect_err(|err| {
        tracing::debug!(dialect = dialect.name(), error = %err, "table name rejected");
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dialect::{GenericDialect, PostgresDialect};
    use crate::error::RenderError;

    #[test]
    fn test_tokens_are_joined_with_single_spaces() {
        let tokens = vec![
            SqlToken::fragment("SELECT"),
            SqlToken::QualifiedIdentifier(Arc::from("e"), Arc::from("name")),
            SqlToken::fragment("FROM"),
            SqlToken::TableName(Arc::from("employees")),
            SqlToken::fragment("AS"),
            SqlToken::Identifier(Arc::from("e")),
        ];
        let (text, params) = render_tokens(&GenericDialect, &tokens).unwrap();
        assert_eq!(text, r#"SELECT "e"."name" FROM "employees" AS "e""#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_placeholders_are_numbered_in_order() {
        let tokens = vec![
            SqlToken::Parameter(Parameter::from_value(1_i64)),
            SqlToken::fragment(","),
            SqlToken::Parameter(Parameter::from_value(true)),
        ];
        let (text, params) = render_tokens(&PostgresDialect, &tokens).unwrap();
        assert_eq!(text, "$1 , $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_empty_identifier_fails() {
        let tokens = vec![SqlToken::QualifiedIdentifier(Arc::from("e"), Arc::from(""))];
        let err = render_tokens(&GenericDialect, &tokens).unwrap_err();
        assert!(matches!(err, RenderError::InvalidIdentifier { ref name, .. } if name.is_empty()));
    }

    #[test]
    fn test_table_column_qualifier_is_split_like_the_table() {
        let tokens = vec![
            SqlToken::TableColumn(Arc::from("hr.employees"), Arc::from("id")),
            SqlToken::fragment("FROM"),
            SqlToken::TableName(Arc::from("hr.employees")),
        ];
        let (text, _) = render_tokens(&GenericDialect, &tokens).unwrap();
        assert_eq!(text, r#""hr"."employees"."id" FROM "hr"."employees""#);
    }

    #[test]
    fn test_empty_sequence() {
        let (text, params) = render_tokens(&GenericDialect, &[]).unwrap();
        assert!(text.is_empty());
        assert!(params.is_empty());
    }
}
