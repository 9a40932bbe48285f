//! SQLite dialect implementation.

use fluent_sql_core::dialect::Dialect;

/// SQLite dialect: double-quoted identifiers and `?` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identifier_quote(&self) -> char {
        '"' // SQLite also accepts backticks, but double quotes are standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_sql_core::RenderError;

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.placeholder(3), "?");
        assert_eq!(dialect.quote_identifier("a\"b").unwrap(), "\"a\"\"b\"");
        assert_eq!(dialect.build_table_name("main.users").unwrap(), "\"main\".\"users\"");
    }

    #[test]
    fn test_sqlite_rejects_nul() {
        let err = SqliteDialect::new().quote_identifier("a\0b").unwrap_err();
        assert!(matches!(err, RenderError::InvalidIdentifier { dialect: "sqlite", .. }));
    }
}
