//! SQL Dialect support.
//!
//! Databases disagree on how identifiers are quoted and how placeholders are
//! spelled. Rendering asks a [`Dialect`] for both; everything else about a
//! statement is dialect-independent.

mod generic;
mod postgres;

use std::borrow::Cow;
use std::fmt;

pub use generic::GenericDialect;
pub use postgres::PostgresDialect;

use crate::error::{RenderError, Result};

/// Trait for SQL dialect-specific behavior.
///
/// Implementations must be pure: the same input always yields the same
/// output.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quotes an identifier, doubling embedded quote characters.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidIdentifier`] for empty names and names
    /// containing a NUL character.
    fn quote_identifier(&self, name: &str) -> Result<String> {
        check_identifier(self.name(), name)?;
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        Ok(format!("{quote}{escaped}{quote}"))
    }

    /// Formats a raw table name. Dotted names (`schema.table`) are quoted
    /// part by part.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidIdentifier`] if any part cannot be quoted.
    fn build_table_name(&self, raw_name: &str) -> Result<String> {
        let parts = raw_name
            .split('.')
            .map(|part| self.quote_identifier(part))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join("."))
    }

    /// Returns the placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> Cow<'static, str> {
        let _ = index;
        Cow::Borrowed("?")
    }
}

/// Rejects names no quoting scheme can represent.
pub(crate) fn check_identifier(dialect: &'static str, name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "identifier is empty"
    } else if name.contains('\0') {
        "identifier contains a NUL character"
    } else {
        return Ok(());
    };
    Err(RenderError::InvalidIdentifier {
        dialect,
        name: String::from(name),
        reason: String::from(reason),
    })
}
