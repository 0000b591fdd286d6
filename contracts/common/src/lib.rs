//! Shared building blocks for the attestation guard contract suite.
//!
//! This crate provides:
//! - [`CommonError`] — error codes shared by every contract in the suite.
//! - [`Authority`] — the attestation authority record shared by guards and
//!   the guard factory.
//! - [`ownable`] — single-owner transfer / renounce bookkeeping.
//! - [`safe_tx`] — the wallet transaction descriptor and its canonical hash,
//!   used by both wallets and guards so the two always agree on a
//!   transaction's identity.
//! - [`interfaces`] — capability identifiers and the cross-contract client a
//!   wallet uses to consult its guard.
//!
//! Contract-specific errors live in each contract crate and convert from
//! [`CommonError`] where a shared module can fail.

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod authority;
pub mod interfaces;
pub mod ownable;
pub mod safe_tx;

pub use authority::Authority;
pub use interfaces::*;
pub use safe_tx::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Error codes shared by the guard, factory and wallet contracts.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 10 – 19 | Authentication & authorisation|
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    /// Caller does not hold the role required by the operation, or the role
    /// has been renounced.
    Unauthorized = 10,
}
