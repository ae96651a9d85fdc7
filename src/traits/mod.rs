mod driver;
mod quoted_sql;

pub use driver::DataDriver;
pub use quoted_sql::QuotedSql;
