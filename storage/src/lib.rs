// storage/src/lib.rs
//
// The relational store: a single-file SQLite database reached through an
// async pool. Writes serialize through SQLite's own file lock; there are no
// application-level transactions, so multi-statement operations (a visit plus
// its attachments) are not atomic — a failure between statements leaves the
// partial state in place.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub mod clinical;
pub mod dashboard;
pub mod errors;
pub mod patients;
pub mod schema;
pub mod seed;
pub mod vaccinations;
pub mod visits;

pub use errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Open (creating if missing) the single-file database.
pub async fn connect(path: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

/// In-memory database on a single-connection pool. A fresh connection would
/// see a fresh empty database, so the pool must never grow past one.
pub async fn connect_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}
