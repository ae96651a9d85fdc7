mod row;
mod sql_value;

pub use row::{ResultSet, Row};
pub use sql_value::{SqlExpression, SqlValue};
