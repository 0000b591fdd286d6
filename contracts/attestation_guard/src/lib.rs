#![no_std]

//! # Attestation Guard
//!
//! A transaction guard a wallet consults immediately before and after it
//! executes a transaction. Enforcement admits a transaction only when it
//! carries an attestation from the designated authority:
//!
//! - a live secp256k1 signature by the authority signer over the exact
//!   transaction hash, or
//! - a previously recorded attestation of that hash (`attest_hash`).
//!
//! The transaction hash is re-derived here with the wallet's own scheme
//! ([`common::transaction_hash`]) for the sequence number the wallet just
//! consumed, so an attestation never carries over to another nonce.
//!
//! Two roles are kept apart: the **owner** only manages ownership, while the
//! **attestation authority** toggles enforcement, replaces itself, sets the
//! policy thumbprint and records attestations.

pub mod admission;
pub mod errors;
pub mod events;
pub mod signature;
mod storage;

use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Bytes, BytesN, Env};

use common::{ownable, Operation, SafeTransaction};

pub use admission::{AdmissionPath, AttestationData};
pub use common::Authority;
pub use errors::GuardError;

#[contract]
pub struct AttestationGuardContract;

#[contractimpl]
impl AttestationGuardContract {
    /// Deploys a guard with enforcement on, an empty thumbprint and no
    /// attested hashes.
    pub fn __constructor(env: Env, owner: Address, authority: Authority) {
        if authority.is_null() {
            panic_with_error!(&env, GuardError::InvalidAuthority);
        }
        ownable::init_owner(&env, &owner);
        storage::set_authority(&env, &authority);
        storage::set_enforced(&env, true);
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Option<Address> {
        ownable::owner(&env)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), GuardError> {
        ownable::transfer_ownership(&env, &caller, &new_owner)?;
        Ok(())
    }

    pub fn renounce_ownership(env: Env, caller: Address) -> Result<(), GuardError> {
        ownable::renounce_ownership(&env, &caller)?;
        Ok(())
    }

    // ── Authority surface ───────────────────────────────────────────────────

    pub fn attestation_authority(env: Env) -> Result<Authority, GuardError> {
        storage::authority(&env)
    }

    pub fn set_attestation_authority(
        env: Env,
        caller: Address,
        authority: Authority,
    ) -> Result<(), GuardError> {
        let previous = Self::require_authority(&env, &caller)?;
        if authority.is_null() {
            return Err(GuardError::InvalidAuthority);
        }
        storage::set_authority(&env, &authority);
        events::publish_authority_changed(&env, &previous, &authority);
        Ok(())
    }

    /// When disabled, `check_transaction` admits without looking at the
    /// attestation data.
    pub fn enforce_attestation(env: Env, caller: Address, enabled: bool) -> Result<(), GuardError> {
        Self::require_authority(&env, &caller)?;
        storage::set_enforced(&env, enabled);
        events::publish_enforcement(&env, enabled);
        Ok(())
    }

    pub fn is_enforced(env: Env) -> bool {
        storage::is_enforced(&env)
    }

    /// Stores the fingerprint of the off-chain policy document. Never read
    /// by admission.
    pub fn set_attestation_policy_thumbprint(
        env: Env,
        caller: Address,
        thumbprint: BytesN<32>,
    ) -> Result<(), GuardError> {
        Self::require_authority(&env, &caller)?;
        storage::set_thumbprint(&env, &thumbprint);
        events::publish_thumbprint(&env, &thumbprint);
        Ok(())
    }

    pub fn attestation_policy_thumbprint(env: Env) -> BytesN<32> {
        storage::thumbprint(&env)
    }

    /// Pre-approves a transaction hash. Attesting twice is a no-op success.
    pub fn attest_hash(env: Env, caller: Address, hash: BytesN<32>) -> Result<(), GuardError> {
        Self::require_authority(&env, &caller)?;
        storage::record_attestation(&env, &hash);
        events::publish_attested(&env, &hash);
        Ok(())
    }

    pub fn is_attested(env: Env, hash: BytesN<32>) -> bool {
        storage::is_attested(&env, &hash)
    }

    // ── Admission surface ───────────────────────────────────────────────────

    /// Admission check run by `wallet` before it applies `tx`.
    ///
    /// `nonce` is the wallet's next sequence number; the transaction under
    /// review was hashed with `nonce - 1`.
    pub fn check_transaction(
        env: Env,
        wallet: Address,
        tx: SafeTransaction,
        nonce: u64,
        attestation_data: Bytes,
        executor: Address,
    ) -> Result<(), GuardError> {
        wallet.require_auth();

        if !storage::is_enforced(&env) {
            events::publish_admitted(
                &env,
                &wallet,
                &executor,
                None,
                AdmissionPath::EnforcementDisabled,
            );
            return Ok(());
        }

        let current = nonce.checked_sub(1).ok_or(GuardError::InvalidSequence)?;
        let digest = common::transaction_hash(&env, &wallet, &tx, current);
        let authority = storage::authority(&env)?;
        let path = admission::admit(&env, &authority, &digest, &attestation_data)?;

        events::publish_admitted(&env, &wallet, &executor, Some(digest.to_bytes()), path);
        Ok(())
    }

    /// Admission check for module-initiated transactions.
    ///
    /// Always admits; returns the module transaction hash the wallet hands
    /// back to `check_after_execution`.
    pub fn check_module_transaction(
        env: Env,
        wallet: Address,
        to: Address,
        value: i128,
        data: Bytes,
        operation: Operation,
        module: Address,
    ) -> BytesN<32> {
        let hash = common::module_transaction_hash(&env, &wallet, &to, value, &data, operation, &module)
            .to_bytes();
        events::publish_module_admitted(&env, &wallet, &module, &hash);
        hash
    }

    /// Post-execution observation point. Open to any caller.
    pub fn check_after_execution(env: Env, hash: BytesN<32>, success: bool) {
        events::publish_after_execution(&env, &hash, success);
    }

    pub fn supports_interface(_env: Env, interface_id: BytesN<4>) -> bool {
        common::is_guard_interface(&interface_id)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_authority(env: &Env, caller: &Address) -> Result<Authority, GuardError> {
        caller.require_auth();
        let authority = storage::authority(env)?;
        if authority.account != *caller {
            return Err(GuardError::Unauthorized);
        }
        Ok(authority)
    }
}
