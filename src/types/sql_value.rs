use std::fmt;

/// Represents a scalar SQL value in a driver-agnostic way.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Bool(bool),
}

impl SqlValue {
    /// Text form of the value, `None` for SQL NULL.
    pub fn as_text(&self) -> Option<String> {
        match self {
            SqlValue::Null => None,
            SqlValue::Text(s) => Some(s.clone()),
            SqlValue::Int32(i) => Some(i.to_string()),
            SqlValue::Int64(i) => Some(i.to_string()),
            SqlValue::Float64(f) => Some(f.to_string()),
            SqlValue::Bool(b) => Some(b.to_string()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int32(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int64(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float64(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// A raw SQL fragment inlined verbatim when quoted, e.g. `NOW()` or
/// `nextval('users_id_seq')`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlExpression(String);

impl SqlExpression {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text() {
        assert_eq!(SqlValue::from(Some(3_i32)).as_text().as_deref(), Some("3"));
        assert_eq!(SqlValue::from(None::<i64>).as_text(), None);
        assert_eq!(SqlValue::from(false).as_text().as_deref(), Some("false"));
        assert_eq!(SqlValue::from(1.5_f64).as_text().as_deref(), Some("1.5"));
    }
}
