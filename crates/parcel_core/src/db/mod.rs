//! SQLite connection bootstrap for parcel storage.
//!
//! # Responsibility
//! - Open and configure SQLite connections for callers of the parcel store.
//! - Make sure the `parcel` table exists before the store is used.
//!
//! # Invariants
//! - Schema setup is idempotent (`IF NOT EXISTS`); there is no version
//!   tracking and no migration history.
//! - The store itself never opens, closes or reconfigures a connection.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_schema, PARCEL_TABLE};

pub type DbResult<T> = Result<T, DbError>;

/// Storage engine failure.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
