//! Binding rendered parameters onto `sqlx` queries.

use fluent_sql_core::{Parameter, SqlValue, ValueKind};
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite};

/// A `sqlx` SQLite query still taking arguments.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A `sqlx` SQLite query mapping rows onto `M`.
pub type SqliteQueryAs<'q, M> = QueryAs<'q, Sqlite, M, SqliteArguments<'q>>;

macro_rules! bind_one {
    ($query:expr, $param:expr) => {{
        let Parameter { value, kind } = $param;
        match value {
            SqlValue::Null => match kind {
                ValueKind::Bool => $query.bind(Option::<bool>::None),
                ValueKind::Int => $query.bind(Option::<i64>::None),
                ValueKind::Float => $query.bind(Option::<f64>::None),
                ValueKind::Text => $query.bind(Option::<String>::None),
                ValueKind::Blob => $query.bind(Option::<Vec<u8>>::None),
            },
            SqlValue::Bool(b) => $query.bind(b),
            SqlValue::Int(i) => $query.bind(i),
            SqlValue::Float(f) => $query.bind(f),
            SqlValue::Text(s) => $query.bind(s),
            SqlValue::Blob(b) => $query.bind(b),
        }
    }};
}

/// Binds `params`, in order, onto a query built from rendered SQL text.
///
/// `NULL` values are bound with the type of the column they were compared
/// with or assigned to.
///
/// ```rust
/// use fluent_sql_core::{Executable, SqlBuilder, Table};
/// use fluent_sql_sqlite::{bind_parameters, SqliteDialect};
///
/// let sql = SqlBuilder::new(SqliteDialect);
/// let users = Table::named("users");
/// let id = users.column::<i64>("id");
///
/// let (text, params) = sql.delete_from(&users).where_clause(id.equal(1_i64)).render().unwrap();
/// let _query = bind_parameters(sqlx::query(&text), params);
/// ```
#[must_use]
pub fn bind_parameters(query: SqliteQuery<'_>, params: Vec<Parameter>) -> SqliteQuery<'_> {
    tracing::trace!(parameters = params.len(), "binding parameters");
    params
        .into_iter()
        .fold(query, |query, param| bind_one!(query, param))
}

/// Same as [`bind_parameters`], for `sqlx::query_as`.
#[must_use]
pub fn bind_parameters_as<M>(
    query: SqliteQueryAs<'_, M>,
    params: Vec<Parameter>,
) -> SqliteQueryAs<'_, M>
where
    M: for<'r> FromRow<'r, SqliteRow>,
{
    tracing::trace!(parameters = params.len(), "binding parameters");
    params
        .into_iter()
        .fold(query, |query, param| bind_one!(query, param))
}
