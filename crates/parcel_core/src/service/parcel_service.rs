//! Parcel workflow service.
//!
//! # Responsibility
//! - Register parcels for a client with the current timestamp.
//! - Advance parcels along `registered -> sent -> delivered`.
//! - Forward address changes and deletion to the store, which owns the gate.
//!
//! # Invariants
//! - The service never bypasses the store's registered-status gate.
//! - `delivered` is final; advancing past it is an error, not a no-op.

use crate::model::parcel::{Parcel, ParcelNumber, ParcelStatus, TimestampError};
use crate::repo::parcel_repo::{ParcelStore, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for parcel workflow use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Store-level failure, including `NotFound` and `GateNotSatisfied`.
    Repo(RepoError),
    /// The current time could not be stamped on a new parcel.
    Clock(TimestampError),
    /// The parcel is already delivered.
    FinalStatus(ParcelNumber),
    /// The stored status is not part of the workflow.
    UnknownStatus {
        number: ParcelNumber,
        status: String,
    },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Clock(err) => write!(f, "{err}"),
            Self::FinalStatus(number) => {
                write!(f, "parcel {number} is already {}", ParcelStatus::Delivered)
            }
            Self::UnknownStatus { number, status } => {
                write!(f, "parcel {number} has unknown status `{status}`")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Clock(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TimestampError> for ServiceError {
    fn from(value: TimestampError) -> Self {
        Self::Clock(value)
    }
}

/// Use-case wrapper around a `ParcelStore`.
pub struct ParcelService<S: ParcelStore> {
    store: S,
}

impl<S: ParcelStore> ParcelService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new parcel and returns it with its assigned number.
    pub fn register(&self, client: i64, address: impl Into<String>) -> ServiceResult<Parcel> {
        let mut parcel = Parcel::new(client, address)?;
        parcel.number = self.store.add(&parcel)?;
        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    pub fn parcel(&self, number: ParcelNumber) -> ServiceResult<Parcel> {
        Ok(self.store.get(number)?)
    }

    /// Lists all parcels of one client. Empty when the client has none.
    pub fn client_parcels(&self, client: i64) -> ServiceResult<Vec<Parcel>> {
        Ok(self.store.get_by_client(client)?)
    }

    /// Moves a parcel to the next workflow status and returns it.
    ///
    /// # Errors
    /// - `FinalStatus` when the parcel is already delivered.
    /// - `UnknownStatus` when the stored status is outside the workflow.
    /// - `Repo(NotFound)` when the parcel does not exist.
    pub fn next_status(&self, number: ParcelNumber) -> ServiceResult<ParcelStatus> {
        let parcel = self.store.get(number)?;
        let current =
            ParcelStatus::parse(&parcel.status).ok_or_else(|| ServiceError::UnknownStatus {
                number,
                status: parcel.status.clone(),
            })?;
        let next = current.next().ok_or(ServiceError::FinalStatus(number))?;

        self.store.set_status(number, next.as_str())?;
        info!(
            "event=parcel_next_status module=service status=ok number={number} from={current} to={next}"
        );
        Ok(next)
    }

    /// Changes the address of a registered parcel.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> ServiceResult<()> {
        self.store.set_address(number, address)?;
        Ok(())
    }

    /// Deletes a registered parcel.
    pub fn delete(&self, number: ParcelNumber) -> ServiceResult<()> {
        self.store.delete(number)?;
        Ok(())
    }
}
