use async_trait::async_trait;
use tracing::warn;

use crate::config::ConnectParams;
use crate::dialect::Dialect;
use crate::error::{PgDriverError, Result};
use crate::sql;
use crate::traits::QuotedSql;
use crate::types::Row;

/// Trait for database driver implementations.
///
/// A driver is stateless: every operation receives the connection (and, for
/// row access, the result) handle explicitly, so one driver value can serve
/// any number of independent sessions. Drivers are responsible for:
/// - Opening and closing sessions
/// - Executing SQL text and translating failures into [`PgDriverError`]
/// - Handing out result rows one at a time
#[async_trait]
pub trait DataDriver: Send + Sync {
    /// Open session handle.
    type Connection: Send + Sync;
    /// Result handle produced by [`DataDriver::query`].
    type ResultSet: Send;

    /// SQL-text rules this driver speaks.
    fn dialect(&self) -> &Dialect;

    /// Checks that the session is still usable.
    async fn ping(&self, conn: &Self::Connection) -> bool;

    /// Connects, applies session settings and runs the bootstrap statements.
    async fn open(&self, params: &ConnectParams) -> Result<Self::Connection>;

    /// Releases the session. Failures are swallowed.
    async fn close(&self, conn: Self::Connection);

    /// Runs a statement expected to return rows. Backtick identifier quoting
    /// is stripped first.
    async fn query(&self, conn: &Self::Connection, sql: &str) -> Result<Self::ResultSet>;

    /// Runs a statement as given and returns the number of rows it affected.
    async fn execute(&self, conn: &Self::Connection, sql: &str) -> Result<u64>;

    /// Next row of `rs`, `None` at end of results.
    fn fetch(&self, conn: &Self::Connection, rs: &mut Self::ResultSet) -> Option<Row>;

    /// Last value generated by a sequence in this session, `None` if the
    /// session has not generated one yet.
    async fn last_insert_id(&self, conn: &Self::Connection) -> Result<Option<i64>>;

    /// Text of the last error reported on this session, empty if none.
    fn last_error(&self, conn: &Self::Connection) -> String;

    fn release(&self, conn: &Self::Connection, rs: Self::ResultSet);

    fn server_type(&self) -> &'static str {
        self.dialect().server_type()
    }

    /// Escapes a raw string. Needs no connection.
    fn escape(&self, value: &str) -> String {
        self.dialect().escape(value)
    }

    fn get_quoted_sql(&self, value: &dyn QuotedSql) -> String {
        self.dialect().get_quoted_sql(value)
    }

    /// Applies the dialect's session settings for `charset`.
    ///
    /// Any failure is a connection error: the session is unusable for
    /// quoting or decoding until these settings hold.
    async fn configure_session(&self, conn: &Self::Connection, charset: Option<&str>) -> Result<()> {
        self.dialect().check_charset(charset)?;
        for statement in self.dialect().session_setup(charset) {
            if let Err(e) = self.execute(conn, &statement).await {
                warn!(statement = %statement, error = %e, "session setup failed");
                return Err(PgDriverError::connection(format!(
                    "problem with session setup `{}`: {}",
                    statement,
                    e.message()
                )));
            }
        }
        Ok(())
    }

    /// Runs each `;`-separated statement in order, stopping at the first failure.
    ///
    /// Statements that already ran are left in effect.
    async fn run_bootstrap(&self, conn: &Self::Connection, bootstrap: &str) -> Result<()> {
        for statement in sql::split_statements(bootstrap) {
            if let Err(e) = self.execute(conn, statement).await {
                warn!(statement, error = %e, "bootstrap statement failed");
                return Err(PgDriverError::connection(format!(
                    "problem with bootstrap sql `{}`: {}",
                    statement,
                    e.message()
                )));
            }
        }
        Ok(())
    }

    /// Drains every remaining row of `rs`.
    fn fetch_all(&self, conn: &Self::Connection, rs: &mut Self::ResultSet) -> Vec<Row> {
        let mut rows = Vec::new();
        while let Some(row) = self.fetch(conn, rs) {
            rows.push(row);
        }
        rows
    }

    /// Names of the base tables in the `public` schema of `database`, sorted.
    /// With `omit_empty_tables`, tables holding no rows are left out.
    async fn table_names(
        &self,
        conn: &Self::Connection,
        database: &str,
        omit_empty_tables: bool,
    ) -> Result<Vec<String>> {
        let mut rs = self
            .query(conn, &self.dialect().table_names_sql(database))
            .await?;
        let names: Vec<String> = self
            .fetch_all(conn, &mut rs)
            .iter()
            .filter_map(|row| row.get("table_name").map(str::to_string))
            .collect();
        self.release(conn, rs);

        if !omit_empty_tables {
            return Ok(names);
        }

        let mut populated = Vec::with_capacity(names.len());
        for name in names {
            let mut sample = self.query(conn, &self.dialect().has_rows_sql(&name)).await?;
            let has_rows = self.fetch(conn, &mut sample).is_some();
            self.release(conn, sample);
            if has_rows {
                populated.push(name);
            }
        }
        Ok(populated)
    }

    /// Rebuilds the indexes of `table` and returns a short summary.
    async fn optimize(&self, conn: &Self::Connection, table: &str) -> Result<String> {
        let rs = self.query(conn, &self.dialect().optimize_sql(table)).await?;
        self.release(conn, rs);
        Ok(format!("REINDEX TABLE {}", table))
    }

    async fn start_transaction(&self, conn: &Self::Connection) -> Result<()> {
        self.execute(conn, Dialect::BEGIN).await?;
        Ok(())
    }

    async fn commit_transaction(&self, conn: &Self::Connection) -> Result<()> {
        self.execute(conn, Dialect::COMMIT).await?;
        Ok(())
    }

    async fn rollback_transaction(&self, conn: &Self::Connection) -> Result<()> {
        self.execute(conn, Dialect::ROLLBACK).await?;
        Ok(())
    }
}
