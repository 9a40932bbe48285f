//! # fluent-sql-sqlite
//!
//! SQLite support for `fluent-sql-core`: the [`SqliteDialect`] and helpers
//! that bind a rendered parameter list onto a `sqlx` query.
//!
//! # How SQLite differs from other dialects
//!
//! - **Placeholders**: SQLite accepts anonymous `?` placeholders, bound in
//!   order.
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as
//!   the standard quoting style, though it also accepts backticks
//!   and square brackets. See [SQLite keywords].
//! - **[Type affinity]**: any column can store any value regardless of its
//!   declared type, so a `NULL` is bound with the kind of the column it
//!   belongs to rather than left untyped.
//!
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//!
//! ## Example
//!
//! ```rust
//! use fluent_sql_core::{Executable, SqlBuilder, Table};
//! use fluent_sql_sqlite::SqliteDialect;
//!
//! let sql = SqlBuilder::new(SqliteDialect::new());
//! let users = Table::named("users");
//! let name = users.column::<String>("name");
//! let email = users.column::<Option<String>>("email");
//!
//! let (text, params) = sql
//!     .insert_into(&users)
//!     .value(&name, "Alice")
//!     .value(&email, None)
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(text, "INSERT INTO \"users\" ( \"name\" , \"email\" ) VALUES ( ? , ? )");
//! assert_eq!(params.len(), 2);
//! ```

mod bind;
mod dialect;

pub use bind::{bind_parameters, bind_parameters_as, SqliteQuery, SqliteQueryAs};
pub use dialect::SqliteDialect;
