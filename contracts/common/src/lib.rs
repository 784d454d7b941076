//! Shared utilities and error codes for the sealed-readings contracts.
//!
//! This crate provides:
//! - [`CommonError`]: lifecycle, authorization and validation codes shared
//!   by every contract in the workspace.
//! - [`pausable`]: an admin-driven pause switch for state-mutating entry points.
//! - [`ttl`]: storage time-to-live constants and extension helpers.
//!
//! Contract-specific errors start at code **100** so they never collide with
//! the common set.

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

pub mod pausable;
pub mod ttl;

pub use pausable::*;
pub use ttl::*;

/// Standardised error codes shared by every contract in the workspace.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Contract state                 |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    InvalidInput = 30,
    /// The contract is paused and rejects state-mutating calls.
    Paused = 40,
}
