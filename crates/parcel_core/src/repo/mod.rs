//! Repository layer for parcel persistence.
//!
//! # Responsibility
//! - Define the `ParcelStore` data access contract.
//! - Keep SQL details away from the service layer.
//!
//! # Invariants
//! - Write paths validate their input before SQL mutations: `add` runs
//!   `Parcel::validate()`, `set_status` rejects blank statuses.
//! - Mutations report zero-row outcomes as `NotFound` or
//!   `GateNotSatisfied`; they never succeed silently.

pub mod parcel_repo;
