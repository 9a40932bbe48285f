//! Generic SQL dialect.

use super::Dialect;

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(7), "?");
    }

    #[test]
    fn test_quote_identifier() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.quote_identifier("name").unwrap(), "\"name\"");
        assert_eq!(
            dialect.quote_identifier("we\"ird").unwrap(),
            "\"we\"\"ird\""
        );
    }

    #[test]
    fn test_build_table_name_with_schema() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.build_table_name("employees").unwrap(), "\"employees\"");
        assert_eq!(
            dialect.build_table_name("hr.employees").unwrap(),
            "\"hr\".\"employees\""
        );
    }

    #[test]
    fn test_unquotable_identifiers() {
        let dialect = GenericDialect::new();
        let err = dialect.quote_identifier("").unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidIdentifier { dialect: "generic", ref name, .. } if name.is_empty()
        ));

        let err = dialect.quote_identifier("bad\0name").unwrap_err();
        assert_eq!(
            err.to_string(),
            concat!(
                "the generic dialect cannot quote identifier 'bad\0name': ",
                "identifier contains a NUL character"
            )
        );

        assert!(dialect.build_table_name("hr.").is_err());
    }
}
