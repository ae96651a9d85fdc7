use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, Config, NoTls, SimpleQueryMessage};
use tracing::{debug, error, info, warn};

use crate::config::{ConnectParams, DriverConfig};
use crate::dialect::Dialect;
use crate::error::{backend_message, PgDriverError, Result};
use crate::sql;
use crate::traits::DataDriver;
use crate::types::{ResultSet, Row};

/// An open PostgreSQL session.
///
/// Owns the client and the task driving its socket. Callers keep it for as
/// long as they need the session and hand it back to [`DataDriver::close`].
pub struct PgConnection {
    client: Client,
    task: JoinHandle<()>,
    last_error: Arc<Mutex<Option<String>>>,
    database: String,
}

impl PgConnection {
    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_closed()
    }

    fn set_last_error(&self, message: Option<String>) {
        store(&self.last_error, message);
    }
}

fn store(slot: &Mutex<Option<String>>, message: Option<String>) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = message;
}

/// PostgreSQL driver implementation using tokio-postgres.
#[derive(Debug, Clone, Default)]
pub struct PostgresDataDriver {
    dialect: Dialect,
}

impl PostgresDataDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            dialect: Dialect::new(config),
        }
    }

    /// Sends `sql` as given over the simple-query protocol and buffers what
    /// comes back. Every call sets or clears the session's last error.
    ///
    /// A failure carrying the `tolerated` SQLSTATE counts as success with an
    /// empty result.
    async fn run(
        &self,
        conn: &PgConnection,
        sql: &str,
        tolerated: Option<&SqlState>,
    ) -> Result<ResultSet> {
        debug!(server = Dialect::SERVER_TYPE, sql, "sending statement");

        let outcome = match conn.client.simple_query(sql).await {
            Ok(messages) => collect_messages(messages),
            Err(e) => Err(e),
        };
        match outcome {
            Ok(rs) => {
                conn.set_last_error(None);
                Ok(rs)
            }
            Err(e) if tolerated.is_some() && e.code() == tolerated => {
                conn.set_last_error(None);
                Ok(ResultSet::empty())
            }
            Err(e) => {
                let message = backend_message(&e);
                warn!(sql, error = %message, "statement failed");
                conn.set_last_error(Some(message.clone()));
                Err(PgDriverError::query(message))
            }
        }
    }
}

/// Builds the client configuration from `host[:port]` and credentials.
pub(crate) fn build_config(params: &ConnectParams) -> Result<Config> {
    let (host, port) = sql::split_host(&params.host)?;

    let mut config = Config::new();
    config
        .host(host)
        .dbname(&params.database)
        .user(&params.username)
        .password(&params.password);
    if let Some(port) = port {
        config.port(port);
    }
    Ok(config)
}

/// Keeps the rows of the last row-returning statement and the affected-row
/// count of the last completed one.
///
/// A value that is not valid UTF-8 fails the whole statement.
fn collect_messages(
    messages: Vec<SimpleQueryMessage>,
) -> std::result::Result<ResultSet, tokio_postgres::Error> {
    let mut rs = ResultSet::empty();
    for message in messages {
        match message {
            SimpleQueryMessage::RowDescription(columns) => {
                rs.reset_columns(columns.iter().map(|c| c.name().to_string()).collect());
            }
            SimpleQueryMessage::Row(row) => {
                let values = (0..row.len())
                    .map(|i| row.try_get(i).map(|v| v.map(str::to_string)))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rs.push_row(values);
            }
            SimpleQueryMessage::CommandComplete(affected) => rs.set_affected_rows(affected),
            _ => {}
        }
    }
    Ok(rs)
}

#[async_trait]
impl DataDriver for PostgresDataDriver {
    type Connection = PgConnection;
    type ResultSet = ResultSet;

    fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    async fn ping(&self, conn: &PgConnection) -> bool {
        !conn.client.is_closed() && conn.client.simple_query("SELECT 1").await.is_ok()
    }

    async fn open(&self, params: &ConnectParams) -> Result<PgConnection> {
        self.dialect.check_charset(params.charset.as_deref())?;
        let config = build_config(params)?;
        let (client, connection) = config.connect(NoTls).await.map_err(|e| {
            PgDriverError::connection(format!(
                "Error connecting to database {}: {}",
                params.database,
                backend_message(&e)
            ))
        })?;

        let last_error = Arc::new(Mutex::new(None));
        let task_error = Arc::clone(&last_error);
        let task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection error");
                store(&task_error, Some(backend_message(&e)));
            }
        });

        let conn = PgConnection {
            client,
            task,
            last_error,
            database: params.database.clone(),
        };
        info!(host = %params.host, database = %conn.database, "opened PostgreSQL session");

        if let Err(e) = self.configure_session(&conn, params.charset.as_deref()).await {
            self.close(conn).await;
            return Err(e);
        }

        if let Some(bootstrap) = params.bootstrap.as_deref() {
            if let Err(e) = self.run_bootstrap(&conn, bootstrap).await {
                self.close(conn).await;
                return Err(e);
            }
        }

        Ok(conn)
    }

    async fn close(&self, conn: PgConnection) {
        let PgConnection {
            client,
            task,
            database,
            ..
        } = conn;

        // Dropping the last client handle makes the connection task terminate the session.
        drop(client);
        if let Err(e) = task.await {
            debug!(error = %e, "connection task did not shut down cleanly");
        }
        info!(database = %database, "closed PostgreSQL session");
    }

    async fn query(&self, conn: &PgConnection, sql: &str) -> Result<ResultSet> {
        self.run(conn, &self.dialect.normalize(sql), None).await
    }

    async fn execute(&self, conn: &PgConnection, sql: &str) -> Result<u64> {
        Ok(self.run(conn, sql, None).await?.affected_rows())
    }

    fn fetch(&self, _conn: &PgConnection, rs: &mut ResultSet) -> Option<Row> {
        rs.next_row()
    }

    async fn last_insert_id(&self, conn: &PgConnection) -> Result<Option<i64>> {
        // lastval() is undefined until the session has called nextval()
        let mut rs = self
            .run(
                conn,
                self.dialect.last_insert_id_sql(),
                Some(&SqlState::OBJECT_NOT_IN_PREREQUISITE_STATE),
            )
            .await?;
        Ok(rs
            .next_row()
            .and_then(|row| row.iter().next().and_then(|(_, v)| v.map(str::to_string)))
            .and_then(|v| v.parse::<i64>().ok()))
    }

    fn last_error(&self, conn: &PgConnection) -> String {
        conn.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }

    fn release(&self, _conn: &PgConnection, rs: ResultSet) {
        drop(rs);
    }
}
