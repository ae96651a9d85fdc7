use crate::config::DriverConfig;
use crate::error::{PgDriverError, Result};
use crate::sql;
use crate::traits::QuotedSql;

/// PostgreSQL SQL-text knowledge: literal quoting, session statements and
/// catalog queries. Holds no connection and never touches the network.
#[derive(Debug, Clone, Default)]
pub struct Dialect {
    config: DriverConfig,
}

impl Dialect {
    pub const SERVER_TYPE: &'static str = "PostgreSQL";

    pub const BEGIN: &'static str = "BEGIN";
    pub const COMMIT: &'static str = "COMMIT";
    pub const ROLLBACK: &'static str = "ROLLBACK";

    /// Schema listed by `table_names`.
    pub const SCHEMA: &'static str = "public";

    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn server_type(&self) -> &'static str {
        Self::SERVER_TYPE
    }

    pub fn escape(&self, value: &str) -> String {
        sql::escape(value)
    }

    /// The literal SQL NULL is rendered as, per configuration.
    pub fn null_literal(&self) -> &'static str {
        if self.config.convert_null_to_empty_string {
            "''"
        } else {
            "NULL"
        }
    }

    /// Wraps an escaped value in single quotes.
    pub fn quote_literal(&self, value: &str) -> String {
        format!("'{}'", self.escape(value))
    }

    /// Renders any quotable value as an inline SQL literal.
    pub fn get_quoted_sql(&self, value: &dyn QuotedSql) -> String {
        value.quoted_sql(self)
    }

    /// Rewrites framework-dialect SQL into something PostgreSQL accepts.
    pub fn normalize(&self, sql: &str) -> String {
        sql::strip_backticks(sql)
    }

    /// Accepts only client encodings the client library can decode.
    ///
    /// Rows arrive as text and are read as UTF-8, so any other session
    /// encoding would turn non-ASCII values into decode failures.
    pub fn check_charset(&self, charset: Option<&str>) -> Result<()> {
        let Some(charset) = charset.filter(|c| !c.trim().is_empty()) else {
            return Ok(());
        };
        let folded: String = charset
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "utf8" | "unicode" => Ok(()),
            _ => Err(PgDriverError::connection(format!(
                "unsupported client encoding `{}`: sessions must use UTF8",
                charset
            ))),
        }
    }

    /// Statements run right after connecting, before any bootstrap SQL.
    ///
    /// Turning off `standard_conforming_strings` makes the server read the
    /// backslash sequences [`Dialect::escape`] produces inside `'...'`.
    pub fn session_setup(&self, charset: Option<&str>) -> Vec<String> {
        let mut statements = Vec::new();
        if charset.map_or(false, |c| !c.trim().is_empty()) {
            statements.push("SET client_encoding TO 'UTF8'".to_string());
        }
        statements.push("SET standard_conforming_strings = off".to_string());
        statements.push("SET escape_string_warning = off".to_string());
        statements
    }

    pub fn table_names_sql(&self, database: &str) -> String {
        format!(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_catalog = {} AND table_schema = {} AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
            self.quote_literal(database),
            self.quote_literal(Self::SCHEMA)
        )
    }

    /// Yields one row when `table` (in [`Dialect::SCHEMA`]) holds at least one row.
    pub fn has_rows_sql(&self, table: &str) -> String {
        format!(
            "SELECT 1 FROM {}.{} LIMIT 1",
            sql::quote_identifier(Self::SCHEMA),
            sql::quote_identifier(table)
        )
    }

    pub fn optimize_sql(&self, table: &str) -> String {
        format!("REINDEX TABLE {}", self.escape(table))
    }

    pub fn last_insert_id_sql(&self) -> &'static str {
        "SELECT lastval()"
    }
}
