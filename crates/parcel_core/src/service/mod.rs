//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the parcel workflow.
//! - Keep callers decoupled from SQL details.

pub mod parcel_service;
