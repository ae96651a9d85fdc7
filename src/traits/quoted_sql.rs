use crate::dialect::Dialect;
use crate::types::{SqlExpression, SqlValue};

/// Capability of rendering oneself as an inline SQL literal.
///
/// Scalars escape and single-quote their text form; NULL defers to the
/// dialect's configured null literal. Custom expression types render
/// whatever SQL they stand for.
pub trait QuotedSql {
    fn quoted_sql(&self, dialect: &Dialect) -> String;
}

impl<T: QuotedSql + ?Sized> QuotedSql for &T {
    fn quoted_sql(&self, dialect: &Dialect) -> String {
        (**self).quoted_sql(dialect)
    }
}

impl QuotedSql for str {
    fn quoted_sql(&self, dialect: &Dialect) -> String {
        dialect.quote_literal(self)
    }
}

impl QuotedSql for String {
    fn quoted_sql(&self, dialect: &Dialect) -> String {
        dialect.quote_literal(self)
    }
}

macro_rules! quoted_via_to_string {
    ($($ty:ty),*) => {
        $(
            impl QuotedSql for $ty {
                fn quoted_sql(&self, dialect: &Dialect) -> String {
                    dialect.quote_literal(&self.to_string())
                }
            }
        )*
    };
}

quoted_via_to_string!(i16, i32, i64, u32, u64, f32, f64, bool);

impl<T: QuotedSql> QuotedSql for Option<T> {
    fn quoted_sql(&self, dialect: &Dialect) -> String {
        match self {
            Some(value) => value.quoted_sql(dialect),
            None => dialect.null_literal().to_string(),
        }
    }
}

impl QuotedSql for SqlValue {
    fn quoted_sql(&self, dialect: &Dialect) -> String {
        match self.as_text() {
            Some(text) => dialect.quote_literal(&text),
            None => dialect.null_literal().to_string(),
        }
    }
}

impl QuotedSql for SqlExpression {
    fn quoted_sql(&self, _dialect: &Dialect) -> String {
        self.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriverConfig;

    /// An expression that needs the dialect to render its argument.
    struct Upper(&'static str);

    impl QuotedSql for Upper {
        fn quoted_sql(&self, dialect: &Dialect) -> String {
            format!("upper({})", dialect.quote_literal(self.0))
        }
    }

    #[test]
    fn test_custom_expression_uses_its_own_rendering() {
        let dialect = Dialect::default();
        assert_eq!(Upper("it's").quoted_sql(&dialect), "upper('it\\'s')");
        assert_eq!(dialect.get_quoted_sql(&Upper("x")), "upper('x')");
    }

    #[test]
    fn test_option_and_null_follow_config() {
        let strict = Dialect::default();
        let lenient = Dialect::new(DriverConfig::default().with_null_as_empty_string(true));

        assert_eq!(None::<i32>.quoted_sql(&strict), "NULL");
        assert_eq!(None::<i32>.quoted_sql(&lenient), "''");
        assert_eq!(SqlValue::Null.quoted_sql(&lenient), "''");
        assert_eq!(Some("a").quoted_sql(&lenient), "'a'");
    }

    #[test]
    fn test_expression_is_not_escaped() {
        let dialect = Dialect::default();
        let expr = SqlExpression::new("'already' || \"quoted\"");
        assert_eq!(expr.quoted_sql(&dialect), "'already' || \"quoted\"");
    }
}
