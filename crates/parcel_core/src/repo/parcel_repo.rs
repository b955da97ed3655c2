//! Parcel store contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate parcel operations into parameterized statements on `parcel`.
//! - Enforce the registered-status gate for address changes and deletion.
//!
//! # Invariants
//! - Every public operation issues one statement (or one query drained to
//!   completion) against the engine.
//! - The gate is part of the mutating statement's `WHERE` clause. A follow-up
//!   read only explains a zero-row outcome, it never decides the write.
//! - Placeholder names equal column names (`:number`, `:client`, ...).

use crate::db::{DbError, PARCEL_TABLE};
use crate::model::parcel::{
    validate_status, Parcel, ParcelNumber, ParcelValidationError, PARCEL_STATUS_REGISTERED,
};
use log::{debug, warn};
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

const REQUIRED_COLUMNS: &[&str] = &["number", "client", "status", "address", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Outcome of a parcel store operation that did not succeed.
#[derive(Debug)]
pub enum RepoError {
    /// No parcel with this number exists.
    NotFound(ParcelNumber),
    /// The parcel exists but is not registered, so the mutation did not apply.
    GateNotSatisfied {
        number: ParcelNumber,
        status: String,
    },
    Validation(ParcelValidationError),
    /// Storage engine failure, passed through unchanged.
    Db(DbError),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(number) => write!(f, "parcel not found: {number}"),
            Self::GateNotSatisfied { number, status } => write!(
                f,
                "parcel {number} has status `{status}`; only `{PARCEL_STATUS_REGISTERED}` parcels can be changed"
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParcelValidationError> for RepoError {
    fn from(value: ParcelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for parcel lifecycle operations.
pub trait ParcelStore {
    /// Inserts a parcel and returns the engine-assigned number.
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber>;
    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel>;
    /// Returns every parcel of `client`. Empty when there are none.
    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>>;
    /// Overwrites the status without any gate. Blank statuses are rejected.
    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()>;
    /// Overwrites the address of a registered parcel.
    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()>;
    /// Removes a registered parcel.
    fn delete(&self, number: ParcelNumber) -> RepoResult<()>;
}

/// SQLite-backed parcel store borrowing a caller-owned connection.
pub struct SqliteParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelStore<'conn> {
    /// Wraps a connection without inspecting it.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking that the `parcel` table has every
    /// column the store reads or writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn current_status(&self, number: ParcelNumber) -> RepoResult<Option<String>> {
        let status = self
            .conn
            .query_row(
                "SELECT status FROM parcel WHERE number = :number;",
                named_params! { ":number": number },
                |row| row.get(0),
            )
            .optional()?;
        Ok(status)
    }

    /// Explains why a gated mutation touched no rows.
    fn gate_failure(&self, operation: &str, number: ParcelNumber) -> RepoError {
        match self.current_status(number) {
            Ok(Some(status)) => {
                warn!(
                    "event={operation} module=repo status=rejected reason=not_registered number={number} current_status={status}"
                );
                RepoError::GateNotSatisfied { number, status }
            }
            Ok(None) => {
                debug!("event={operation} module=repo status=rejected reason=not_found number={number}");
                RepoError::NotFound(number)
            }
            Err(err) => err,
        }
    }
}

impl ParcelStore for SqliteParcelStore<'_> {
    fn add(&self, parcel: &Parcel) -> RepoResult<ParcelNumber> {
        parcel.validate()?;

        let number = self.conn.query_row(
            "INSERT INTO parcel (client, status, address, created_at)
             VALUES (:client, :status, :address, :created_at)
             RETURNING number;",
            named_params! {
                ":client": parcel.client,
                ":status": parcel.status.as_str(),
                ":address": parcel.address.as_str(),
                ":created_at": parcel.created_at.as_str(),
            },
            |row| row.get(0),
        )?;

        Ok(number)
    }

    fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        let parcel = self
            .conn
            .query_row(
                &format!("{PARCEL_SELECT_SQL} WHERE number = :number;"),
                named_params! { ":number": number },
                parse_parcel_row,
            )
            .optional()?;

        parcel.ok_or(RepoError::NotFound(number))
    }

    fn get_by_client(&self, client: i64) -> RepoResult<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PARCEL_SELECT_SQL} WHERE client = :client ORDER BY number ASC;"
        ))?;

        let mut rows = stmt.query(named_params! { ":client": client })?;
        let mut parcels = Vec::new();
        while let Some(row) = rows.next()? {
            parcels.push(parse_parcel_row(row)?);
        }

        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> RepoResult<()> {
        validate_status(status)?;

        let changed = self.conn.execute(
            "UPDATE parcel SET status = :status WHERE number = :number;",
            named_params! {
                ":status": status,
                ":number": number,
            },
        )?;

        if changed == 0 {
            debug!("event=parcel_set_status module=repo status=rejected reason=not_found number={number}");
            return Err(RepoError::NotFound(number));
        }

        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE parcel
             SET address = :address
             WHERE number = :number
               AND status = :status;",
            named_params! {
                ":address": address,
                ":number": number,
                ":status": PARCEL_STATUS_REGISTERED,
            },
        )?;

        if changed == 0 {
            return Err(self.gate_failure("parcel_set_address", number));
        }

        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM parcel
             WHERE number = :number
               AND status = :status;",
            named_params! {
                ":number": number,
                ":status": PARCEL_STATUS_REGISTERED,
            },
        )?;

        if changed == 0 {
            return Err(self.gate_failure("parcel_delete", number));
        }

        Ok(())
    }
}

fn parse_parcel_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: row.get("status")?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

fn ensure_store_connection_ready(conn: &Connection) -> RepoResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([PARCEL_TABLE])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(0)?);
    }

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(PARCEL_TABLE));
    }

    for &column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: PARCEL_TABLE,
                column,
            });
        }
    }

    Ok(())
}
