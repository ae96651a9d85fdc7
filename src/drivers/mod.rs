mod postgres;

pub use self::in_memory_test::{InMemoryConnection, InMemoryTestDriver, InMemoryTestResponseBuilder};
pub use self::postgres::{PgConnection, PostgresDataDriver};
