//! SQL values and parameter handling.
//!
//! Values never appear in rendered SQL text. They travel next to it as
//! [`Parameter`]s, one per placeholder.

/// A SQL value that can be bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the kind of a non-NULL value.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Blob(_) => Some(ValueKind::Blob),
        }
    }

    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: only meant for logs and diagnostics. Rendered statements
    /// always bind values as parameters.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int(n) => format!("{n}"),
            Self::Float(f) => format!("{f}"),
            Self::Text(s) => {
                // Escape single quotes by doubling them
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }
}

/// The declared kind of the expression a value is bound to.
///
/// A `NULL` bound to a text column still has kind [`ValueKind::Text`], which
/// lets drivers type the placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// BOOLEAN
    Bool,
    /// INTEGER
    Int,
    /// REAL / DOUBLE
    Float,
    /// TEXT
    Text,
    /// BLOB
    Blob,
}

/// A bound value together with the kind of its target expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// The runtime value.
    pub value: SqlValue,
    /// The kind of the expression the value stands for.
    pub kind: ValueKind,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub const fn new(value: SqlValue, kind: ValueKind) -> Self {
        Self { value, kind }
    }

    /// Creates a parameter from a typed Rust value.
    #[must_use]
    pub fn from_value<X: SqlType>(value: X) -> Self {
        Self::new(value.to_sql_value(), X::KIND)
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

/// A Rust type that can tag a scalar expression.
///
/// `Column<X>` and `Expr<Scalar<X>>` require `X: SqlType`. `Option<T>` marks a
/// nullable column of `T`.
pub trait SqlType: ToSqlValue + 'static {
    /// Kind reported for parameters of this type.
    const KIND: ValueKind;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

impl ToSqlValue for i64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Int(self)
    }
}

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

macro_rules! impl_small_int {
    ($($ty:ty),+) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )+
    };
}

impl_small_int!(i8, i16, i32, u8, u16, u32);

macro_rules! impl_sql_type {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl SqlType for $ty {
                const KIND: ValueKind = ValueKind::$kind;
            }
        )+
    };
}

impl_sql_type!(Bool => bool);
impl_sql_type!(Int => i8, i16, i32, i64, u8, u16, u32);
impl_sql_type!(Float => f32, f64);
impl_sql_type!(Text => String);
impl_sql_type!(Blob => Vec<u8>);

impl<T: SqlType> SqlType for Option<T> {
    const KIND: ValueKind = T::KIND;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_inline_null() {
        assert_eq!(SqlValue::Null.to_sql_inline(), "NULL");
    }

    #[test]
    fn test_sql_value_inline_bool() {
        assert_eq!(SqlValue::Bool(true).to_sql_inline(), "TRUE");
        assert_eq!(SqlValue::Bool(false).to_sql_inline(), "FALSE");
    }

    #[test]
    fn test_sql_value_inline_text_escaping() {
        assert_eq!(
            SqlValue::Text(String::from("O'Brien")).to_sql_inline(),
            "'O''Brien'"
        );
        assert_eq!(
            SqlValue::Text(String::from("'; DROP TABLE users; --")).to_sql_inline(),
            "'''; DROP TABLE users; --'"
        );
    }

    #[test]
    fn test_sql_value_inline_blob() {
        assert_eq!(
            SqlValue::Blob(vec![0x48, 0x45, 0x4C, 0x4C, 0x4F]).to_sql_inline(),
            "X'48454C4C4F'"
        );
    }

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int(42));
        assert_eq!(2.5_f64.to_sql_value(), SqlValue::Float(2.5));
        assert_eq!(
            "hello".to_sql_value(),
            SqlValue::Text(String::from("hello"))
        );
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(42_i32).to_sql_value(), SqlValue::Int(42));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(SqlValue::Int(1).kind(), Some(ValueKind::Int));
        assert_eq!(SqlValue::Null.kind(), None);
        assert_eq!(<Option<String> as SqlType>::KIND, ValueKind::Text);
        assert_eq!(<u16 as SqlType>::KIND, ValueKind::Int);
    }

    #[test]
    fn test_null_parameter_keeps_declared_kind() {
        let param = Parameter::from_value(None::<String>);
        assert_eq!(param.value, SqlValue::Null);
        assert_eq!(param.kind, ValueKind::Text);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parameter_serializes() {
        let param = Parameter::from_value(7_i64);
        let json = serde_json::to_string(&param).unwrap();
        assert_eq!(json, r#"{"value":{"Int":7},"kind":"Int"}"#);
    }
}
