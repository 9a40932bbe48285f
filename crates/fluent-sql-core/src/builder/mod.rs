//! Staged statement builders.
//!
//! Every statement starts from a [`SqlBuilder`], which holds the dialect.
//! Each stage is a distinct type, so clauses can only be added in an order
//! SQL accepts and only complete statements implement [`Executable`].
//!
//! # Example
//!
//! ```rust
//! use fluent_sql_core::{Executable, SqlBuilder, Table};
//!
//! let sql = SqlBuilder::generic();
//! let employees = Table::new("employees", "e");
//! let name = employees.column::<String>("name");
//! let age = employees.column::<Option<i64>>("age");
//!
//! let (text, params) = sql
//!     .select()
//!     .from(&employees)
//!     .select(&[&name])
//!     .where_clause(age.is_null())
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(
//!     text,
//!     "SELECT \"e\".\"name\" FROM \"employees\" AS \"e\" WHERE ( \"e\".\"age\" IS NULL )"
//! );
//! assert!(params.is_empty());
//! ```
//!
//! A statement without `FROM` cannot be rendered:
//!
//! ```compile_fail
//! use fluent_sql_core::{Executable, SqlBuilder, Table};
//!
//! let sql = SqlBuilder::generic();
//! let employees = Table::new("employees", "e");
//! let name = employees.column::<String>("name");
//! let _ = sql.select().select(&[&name]).render();
//! ```
//!
//! Neither can an UPDATE without SET, nor ORDER BY before the fields:
//!
//! ```compile_fail
//! use fluent_sql_core::{Executable, SqlBuilder, Table};
//!
//! let sql = SqlBuilder::generic();
//! let employees = Table::new("employees", "e");
//! let _ = sql.update(&employees).render();
//! ```
//!
//! ```compile_fail
//! use fluent_sql_core::{OrderDirection, SqlBuilder, Table};
//!
//! let sql = SqlBuilder::generic();
//! let employees = Table::new("employees", "e");
//! let name = employees.column::<String>("name");
//! let _ = sql.select().from(&employees).order_by(&name, OrderDirection::Ascending);
//! ```

mod delete;
mod insert;
mod select;
mod update;

use std::fmt;
use std::sync::Arc;

pub use delete::Delete;
pub use insert::{HasValues, Insert, NoValues, ValuedInsert, ValuelessInsert};
pub use select::{
    FieldedSelect, FieldlessSelect, FromlessSelect, HasFields, NoFields, OrderDirection, OrderKey,
    Select, SetOperator, Subquery,
};
pub use update::{HasSet, NoSet, SetUpdate, SetlessUpdate, Update};

pub(crate) use select::SelectStatement;

use crate::dialect::{Dialect, GenericDialect};
use crate::error::Result;
use crate::render::render_tokens;
use crate::schema::AsTable;
use crate::token::SqlPart;
use crate::value::Parameter;

/// Entry point for every statement; carries the dialect used to render.
#[derive(Clone)]
pub struct SqlBuilder {
    dialect: Arc<dyn Dialect>,
}

impl SqlBuilder {
    /// Creates a builder rendering with `dialect`.
    #[must_use]
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self {
            dialect: Arc::new(dialect),
        }
    }

    /// Creates a builder with the [`GenericDialect`].
    #[must_use]
    pub fn generic() -> Self {
        Self::new(GenericDialect)
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Starts a SELECT. The only next step is `from`.
    #[must_use]
    pub fn select(&self) -> FromlessSelect {
        FromlessSelect::new(self.clone())
    }

    /// Starts an INSERT into `table`.
    #[must_use]
    pub fn insert_into(&self, table: &impl AsTable) -> ValuelessInsert {
        Insert::new(self.clone(), table.as_table().clone())
    }

    /// Starts an UPDATE of `table`.
    #[must_use]
    pub fn update(&self, table: &impl AsTable) -> SetlessUpdate {
        Update::new(self.clone(), table.as_table().clone())
    }

    /// Starts a DELETE from `table`.
    #[must_use]
    pub fn delete_from(&self, table: &impl AsTable) -> Delete {
        Delete::new(self.clone(), table.as_table().clone())
    }

    /// Renders any part (expression, condition or statement) with this
    /// builder's dialect.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError`] if the dialect cannot quote one of the
    /// names the part references.
    pub fn render<P: SqlPart + ?Sized>(&self, part: &P) -> Result<(String, Vec<Parameter>)> {
        render_tokens(self.dialect(), &part.tokens())
    }
}

impl Default for SqlBuilder {
    fn default() -> Self {
        Self::generic()
    }
}

impl fmt::Debug for SqlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlBuilder")
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

/// A complete statement, ready to render.
pub trait Executable: SqlPart {
    /// Returns the builder the statement was started from.
    fn sql_builder(&self) -> &SqlBuilder;

    /// Renders the statement with its builder's dialect.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError`] if the dialect rejects a name.
    fn render(&self) -> Result<(String, Vec<Parameter>)> {
        self.sql_builder().render(self)
    }
}
