#![no_std]

//! # Attestation Guard Factory
//!
//! Deploys independent attestation guards, each bound to the authority
//! passed at creation. The factory keeps no record of what it created; the
//! only state it carries is the guard code hash and a deployment sequence
//! that makes every deployment address unique and predictable.

mod events;

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Bytes, BytesN, Env, Symbol,
};

use common::{ownable, Authority, CommonError};

const GUARD_WASM: Symbol = symbol_short!("GRD_WASM");
const DEPLOY_SEQ: Symbol = symbol_short!("DEP_SEQ");
const SALT_DOMAIN: &[u8] = b"attestation-guard-factory";

#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum FactoryError {
    Unauthorized = 1,
    InvalidAuthority = 2,
    NotConfigured = 3,
}

impl From<CommonError> for FactoryError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Unauthorized => FactoryError::Unauthorized,
        }
    }
}

#[contract]
pub struct AttestationGuardFactoryContract;

#[contractimpl]
impl AttestationGuardFactoryContract {
    pub fn __constructor(env: Env, owner: Address, guard_wasm_hash: BytesN<32>) {
        ownable::init_owner(&env, &owner);
        env.storage().instance().set(&GUARD_WASM, &guard_wasm_hash);
    }

    /// Deploys a new guard bound to `authority`. Open to any caller.
    ///
    /// The new guard is owned by `authority.account`, starts with
    /// enforcement on and has no attested hashes.
    pub fn create_attestation_guard(
        env: Env,
        authority: Authority,
    ) -> Result<Address, FactoryError> {
        if authority.is_null() {
            return Err(FactoryError::InvalidAuthority);
        }
        let wasm_hash = Self::guard_wasm_hash(env.clone())?;
        let seq = Self::deploy_seq(&env);

        let guard = env
            .deployer()
            .with_current_contract(Self::salt(&env, seq))
            .deploy_v2(wasm_hash, (authority.account.clone(), authority.clone()));

        env.storage()
            .instance()
            .set(&DEPLOY_SEQ, &seq.saturating_add(1));
        events::publish_guard_created(&env, &guard, &authority);
        Ok(guard)
    }

    /// Address the next `create_attestation_guard` call will deploy to.
    pub fn next_guard_address(env: Env) -> Address {
        let seq = Self::deploy_seq(&env);
        env.deployer()
            .with_current_contract(Self::salt(&env, seq))
            .deployed_address()
    }

    pub fn guard_wasm_hash(env: Env) -> Result<BytesN<32>, FactoryError> {
        env.storage()
            .instance()
            .get(&GUARD_WASM)
            .ok_or(FactoryError::NotConfigured)
    }

    /// Points future deployments at new guard code. Existing guards are
    /// unaffected.
    pub fn set_guard_wasm_hash(
        env: Env,
        caller: Address,
        guard_wasm_hash: BytesN<32>,
    ) -> Result<(), FactoryError> {
        ownable::require_owner(&env, &caller)?;
        env.storage().instance().set(&GUARD_WASM, &guard_wasm_hash);
        events::publish_wasm_updated(&env, &guard_wasm_hash);
        Ok(())
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Option<Address> {
        ownable::owner(&env)
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), FactoryError> {
        ownable::transfer_ownership(&env, &caller, &new_owner)?;
        Ok(())
    }

    pub fn renounce_ownership(env: Env, caller: Address) -> Result<(), FactoryError> {
        ownable::renounce_ownership(&env, &caller)?;
        Ok(())
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn deploy_seq(env: &Env) -> u64 {
        env.storage().instance().get(&DEPLOY_SEQ).unwrap_or(0)
    }

    fn salt(env: &Env, seq: u64) -> BytesN<32> {
        let mut preimage = Bytes::from_slice(env, SALT_DOMAIN);
        preimage.extend_from_array(&seq.to_be_bytes());
        env.crypto().keccak256(&preimage).to_bytes()
    }
}
