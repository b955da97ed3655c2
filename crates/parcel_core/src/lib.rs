//! Core persistence for parcel tracking.
//! The parcel store is the single place the registered-status gate lives.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::parcel::{
    now_rfc3339, validate_status, Parcel, ParcelNumber, ParcelStatus, ParcelValidationError,
    TimestampError, PARCEL_STATUS_REGISTERED,
};
pub use repo::parcel_repo::{ParcelStore, RepoError, RepoResult, SqliteParcelStore};
pub use service::parcel_service::{ParcelService, ServiceError, ServiceResult};

