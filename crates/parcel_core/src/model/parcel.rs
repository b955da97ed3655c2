//! Parcel domain model.
//!
//! # Responsibility
//! - Define the record stored in the `parcel` table.
//! - Describe the workflow statuses `registered -> sent -> delivered`.
//! - Validate records before they reach SQL.
//!
//! # Invariants
//! - `number` is `0` until the storage engine assigns it.
//! - `created_at` is an RFC 3339 timestamp and never changes after insert.
//! - Statuses outside `ParcelStatus` are legal record values; only the
//!   registered status gates mutations.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Engine-assigned parcel identifier (`parcel.number`).
pub type ParcelNumber = i64;

/// Status value that allows address changes and deletion.
pub const PARCEL_STATUS_REGISTERED: &str = "registered";

/// Workflow statuses known to the parcel service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Initial state. Address and deletion are still allowed.
    Registered,
    /// Handed to the carrier.
    Sent,
    /// Final state.
    Delivered,
}

impl ParcelStatus {
    /// Returns the value persisted in `parcel.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => PARCEL_STATUS_REGISTERED,
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }

    /// Maps a persisted status string back to a known status.
    ///
    /// Returns `None` for values the workflow does not know about.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            PARCEL_STATUS_REGISTERED => Some(Self::Registered),
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Returns the status that follows this one, or `None` for `Delivered`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures raised before a parcel is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParcelValidationError {
    BlankStatus,
    InvalidCreatedAt(String),
}

impl Display for ParcelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankStatus => write!(f, "parcel status cannot be blank"),
            Self::InvalidCreatedAt(value) => {
                write!(f, "created_at `{value}` is not an RFC 3339 timestamp")
            }
        }
    }
}

impl Error for ParcelValidationError {}

/// The system clock could not be rendered as an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampError(pub String);

impl Display for TimestampError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to format current time: {}", self.0)
    }
}

impl Error for TimestampError {}

/// Rejects the blank status values no write path may store.
pub fn validate_status(status: &str) -> Result<(), ParcelValidationError> {
    if status.trim().is_empty() {
        return Err(ParcelValidationError::BlankStatus);
    }
    Ok(())
}

/// One tracked parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Assigned by the storage engine on insert; ignored by `add`.
    pub number: ParcelNumber,
    /// Owning client. Opaque to the store.
    pub client: i64,
    pub status: String,
    /// Delivery address, editable only while registered.
    pub address: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved registered parcel stamped with the current UTC time.
    ///
    /// # Errors
    /// - Returns `TimestampError` when the clock value cannot be rendered
    ///   as RFC 3339.
    pub fn new(client: i64, address: impl Into<String>) -> Result<Self, TimestampError> {
        Ok(Self::with_created_at(client, address, now_rfc3339()?))
    }

    /// Creates an unsaved registered parcel with a caller-provided timestamp.
    pub fn with_created_at(
        client: i64,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: PARCEL_STATUS_REGISTERED.to_string(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Returns whether the registered-status gate currently holds.
    pub fn is_registered(&self) -> bool {
        self.status == PARCEL_STATUS_REGISTERED
    }

    /// Checks the fields a write path depends on.
    pub fn validate(&self) -> Result<(), ParcelValidationError> {
        validate_status(&self.status)?;
        if OffsetDateTime::parse(&self.created_at, &Rfc3339).is_err() {
            return Err(ParcelValidationError::InvalidCreatedAt(
                self.created_at.clone(),
            ));
        }
        Ok(())
    }
}

/// Current UTC time as RFC 3339 with whole-second precision.
pub fn now_rfc3339() -> Result<String, TimestampError> {
    let seconds = OffsetDateTime::now_utc().unix_timestamp();
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|err| TimestampError(err.to_string()))?
        .format(&Rfc3339)
        .map_err(|err| TimestampError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{now_rfc3339, validate_status, Parcel, ParcelStatus, ParcelValidationError};

    #[test]
    fn status_strings_round_trip_through_parse() {
        for status in [
            ParcelStatus::Registered,
            ParcelStatus::Sent,
            ParcelStatus::Delivered,
        ] {
            assert_eq!(ParcelStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ParcelStatus::parse("lost"), None);
    }

    #[test]
    fn workflow_ends_at_delivered() {
        assert_eq!(ParcelStatus::Registered.next(), Some(ParcelStatus::Sent));
        assert_eq!(ParcelStatus::Sent.next(), Some(ParcelStatus::Delivered));
        assert_eq!(ParcelStatus::Delivered.next(), None);
    }

    #[test]
    fn new_parcel_is_registered_and_valid() {
        let parcel = Parcel::new(42, "Main st. 1").expect("clock should format");
        assert_eq!(parcel.number, 0);
        assert!(parcel.is_registered());
        parcel.validate().expect("fresh parcel should validate");
    }

    #[test]
    fn now_rfc3339_has_whole_second_precision() {
        let stamp = now_rfc3339().expect("clock should format");
        assert!(stamp.ends_with('Z'));
        assert!(!stamp.contains('.'));
    }

    #[test]
    fn validate_rejects_blank_status_and_bad_timestamp() {
        let mut parcel = Parcel::with_created_at(1, "a", "2024-01-01T00:00:00Z");
        parcel.status = "  ".to_string();
        assert_eq!(parcel.validate(), Err(ParcelValidationError::BlankStatus));

        let parcel = Parcel::with_created_at(1, "a", "yesterday");
        assert!(matches!(
            parcel.validate(),
            Err(ParcelValidationError::InvalidCreatedAt(value)) if value == "yesterday"
        ));
    }

    #[test]
    fn serde_shape_uses_column_names() {
        let parcel = Parcel::with_created_at(5, "Main st. 1", "2024-01-01T00:00:00Z");
        let value = serde_json::to_value(&parcel).unwrap();
        assert_eq!(value["number"], 0);
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
        assert_eq!(value["status"], "registered");
        assert_eq!(
            serde_json::to_value(ParcelStatus::Delivered).unwrap(),
            "delivered"
        );
    }

    #[test]
    fn validate_status_rejects_whitespace_only_values() {
        assert_eq!(validate_status(""), Err(ParcelValidationError::BlankStatus));
        assert_eq!(validate_status(" \t"), Err(ParcelValidationError::BlankStatus));
        assert_eq!(validate_status("sent"), Ok(()));
    }

    #[test]
    fn validate_accepts_unknown_status_values() {
        let mut parcel = Parcel::with_created_at(1, "a", "2024-01-01T00:00:00+03:00");
        parcel.status = "held at customs".to_string();
        parcel.validate().expect("free-form statuses are allowed");
    }
}
