//! Domain model for tracked parcels.
//!
//! # Responsibility
//! - Define the canonical parcel record exchanged with callers.
//! - Own the named status values the store and service agree on.
//!
//! # Invariants
//! - Every persisted parcel is identified by an engine-assigned `ParcelNumber`.
//! - `"registered"` is declared once, as `PARCEL_STATUS_REGISTERED`.

pub mod parcel;
