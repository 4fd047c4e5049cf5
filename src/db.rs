//! SQLite connection pool used by the repository.
//!
//! The pool itself comes from `pushkind-common`, which applies WAL, foreign
//! keys and a busy timeout on every acquired connection.

use diesel::r2d2::{ConnectionManager, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use log::error;

pub use pushkind_common::db::{DbPool, establish_connection_pool};

pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Retrieves a connection from the pool, logging failures.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| {
        error!("Failed to get connection from pool: {e}");
    })
}
