//! pgdriver - a stateless PostgreSQL data driver for ORM-style frameworks
//!
//! The driver opens sessions, runs SQL text, hands out rows one at a time and
//! renders inline literals. It keeps no reference to any session: handles are
//! passed to every call, so one driver value serves any number of sessions.
//!
//! # Example
//! ```ignore
//! use pgdriver::{ConnectParams, DataDriver, DriverConfig, PostgresDataDriver};
//!
//! let driver = PostgresDataDriver::new(DriverConfig::default());
//! let conn = driver
//!     .open(&ConnectParams::new("localhost:5432", "app", "app_user", "secret"))
//!     .await?;
//!
//! let sql = format!(
//!     "SELECT id, name FROM users WHERE name = {}",
//!     driver.get_quoted_sql(&"O'Brien"),
//! );
//! let mut rs = driver.query(&conn, &sql).await?;
//! while let Some(row) = driver.fetch(&conn, &mut rs) {
//!     println!("{:?} {:?}", row.get("id"), row.get("name"));
//! }
//! driver.release(&conn, rs);
//! driver.close(conn).await;
//! ```

pub mod config;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod sql;
pub mod traits;
pub mod types;

// Re-export main types for convenient access
pub use config::{ConnectParams, DriverConfig};
pub use dialect::Dialect;
pub use drivers::{PgConnection, PostgresDataDriver};
pub use error::{ErrorCode, PgDriverError, Result};
pub use traits::{DataDriver, QuotedSql};
pub use types::{ResultSet, Row, SqlExpression, SqlValue};
