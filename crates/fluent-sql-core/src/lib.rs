//! # fluent-sql-core
//!
//! A strongly typed SQL query builder.
//!
//! This crate provides:
//! - Typed expression trees: a column knows its Rust value type, so
//!   comparing a text column with an integer does not compile
//! - A condition algebra that keeps AND/OR groups flat
//! - Staged statement builders that make clause-ordering mistakes
//!   unrepresentable
//! - Dialect-aware rendering into SQL text plus a positional parameter list
//!
//! ## Building a query
//!
//! ```rust
//! use fluent_sql_core::{Executable, OrderDirection, SqlBuilder, Table};
//!
//! let sql = SqlBuilder::generic();
//! let employees = Table::new("employees", "e");
//! let name = employees.column::<String>("name");
//! let age = employees.column::<i64>("age");
//!
//! let (text, params) = sql
//!     .select()
//!     .from(&employees)
//!     .select(&[&name, &age])
//!     .where_clause(age.between(30_i64, 40_i64).or(name.like("A%")))
//!     .order_by(&name, OrderDirection::Ascending)
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(
//!     text,
//!     "SELECT \"e\".\"name\" , \"e\".\"age\" FROM \"employees\" AS \"e\" \
//!      WHERE ( ( \"e\".\"age\" BETWEEN ? AND ? OR \"e\".\"name\" LIKE ? ) ) \
//!      ORDER BY \"e\".\"name\""
//! );
//! assert_eq!(params.len(), 3);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are never spliced into the text; they travel as parameters.
//!
//! ```rust
//! use fluent_sql_core::{Executable, SqlBuilder, SqlValue, Table};
//!
//! let sql = SqlBuilder::generic();
//! let users = Table::named("users");
//! let id = users.column::<i64>("id");
//! let name = users.column::<String>("name");
//!
//! let user_input = "'; DROP TABLE users; --";
//! let (text, params) = sql
//!     .select()
//!     .from(&users)
//!     .select(&[&id])
//!     .where_clause(name.equal(user_input))
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(text, "SELECT \"users\".\"id\" FROM \"users\" WHERE ( \"users\".\"name\" = ? )");
//! assert_eq!(params[0].value, SqlValue::Text(String::from(user_input)));
//! ```
//!
//! Skipping `FROM` does not compile:
//!
//! ```compile_fail
//! use fluent_sql_core::{Executable, SqlBuilder};
//!
//! let _ = SqlBuilder::generic().select().select_all().render();
//! ```

pub mod builder;
pub mod condition;
pub mod dialect;
pub mod error;
pub mod expr;
mod render;
pub mod schema;
pub mod token;
pub mod value;

pub use builder::{
    Delete, Executable, FieldedSelect, FieldlessSelect, FromlessSelect, Insert, OrderDirection,
    SqlBuilder, Subquery, Update,
};
pub use condition::{Combinator, Condition, ConditionBuilder};
pub use dialect::{Dialect, GenericDialect, PostgresDialect};
pub use error::{RenderError, Result};
pub use expr::{
    null, value, AnyRelation, AnyScalar, Expr, IntoRelation, IntoScalar, Relation, Scalar,
    ScalarExpr,
};
pub use schema::{AsTable, Column, Table};
pub use token::{SqlPart, SqlToken};
pub use value::{Parameter, SqlType, SqlValue, ToSqlValue, ValueKind};
