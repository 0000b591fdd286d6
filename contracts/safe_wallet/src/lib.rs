#![no_std]

//! # Reference guarded wallet
//!
//! A minimal single-owner wallet that drives a transaction guard the same
//! way a multisig wallet does:
//!
//! 1. hash the transaction with the current nonce,
//! 2. consume the nonce,
//! 3. ask the guard (`check_transaction`, with the *next* nonce),
//! 4. apply the transaction,
//! 5. notify the guard (`check_after_execution`).
//!
//! Applying a transaction only records its hash; fund movement and
//! multi-owner signature aggregation are out of scope here. A failed guard
//! check aborts the whole invocation, so the nonce is not consumed.

mod events;

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Bytes, BytesN, Env, Symbol,
};

use common::{
    ownable, CommonError, GuardClient, Operation, SafeTransaction, GUARD_INTERFACE_ID,
};

const NONCE: Symbol = symbol_short!("NONCE");
const GUARD: Symbol = symbol_short!("GUARD");
const EXECUTED: Symbol = symbol_short!("EXECUTED");
const MODULE: Symbol = symbol_short!("MODULE");

#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum WalletError {
    Unauthorized = 1,
    ModuleNotEnabled = 2,
    NonceOverflow = 3,
    /// The proposed guard does not advertise the guard interface.
    GuardNotSupported = 4,
}

impl From<CommonError> for WalletError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Unauthorized => WalletError::Unauthorized,
        }
    }
}

#[contract]
pub struct SafeWalletContract;

#[contractimpl]
impl SafeWalletContract {
    pub fn __constructor(env: Env, owner: Address) {
        ownable::init_owner(&env, &owner);
    }

    pub fn owner(env: Env) -> Option<Address> {
        ownable::owner(&env)
    }

    /// Next sequence number to be consumed. Zero until the first execution.
    pub fn nonce(env: Env) -> u64 {
        env.storage().instance().get(&NONCE).unwrap_or(0)
    }

    pub fn get_transaction_hash(env: Env, tx: SafeTransaction, nonce: u64) -> BytesN<32> {
        common::transaction_hash(&env, &env.current_contract_address(), &tx, nonce).to_bytes()
    }

    // ── Guard and module configuration ──────────────────────────────────────

    /// Installs or clears the guard. A new guard must advertise the guard
    /// interface.
    pub fn set_guard(env: Env, caller: Address, guard: Option<Address>) -> Result<(), WalletError> {
        ownable::require_owner(&env, &caller)?;
        match &guard {
            Some(guard) => {
                let id = BytesN::from_array(&env, &GUARD_INTERFACE_ID);
                if !GuardClient::new(&env, guard).supports_interface(&id) {
                    return Err(WalletError::GuardNotSupported);
                }
                env.storage().instance().set(&GUARD, guard);
            }
            None => env.storage().instance().remove(&GUARD),
        }
        events::publish_guard_set(&env, guard);
        Ok(())
    }

    pub fn guard(env: Env) -> Option<Address> {
        env.storage().instance().get(&GUARD)
    }

    pub fn enable_module(env: Env, caller: Address, module: Address) -> Result<(), WalletError> {
        ownable::require_owner(&env, &caller)?;
        env.storage()
            .persistent()
            .set(&(MODULE, module.clone()), &true);
        events::publish_module_enabled(&env, &module);
        Ok(())
    }

    pub fn is_module_enabled(env: Env, module: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(MODULE, module))
            .unwrap_or(false)
    }

    // ── Execution ───────────────────────────────────────────────────────────

    pub fn exec_transaction(
        env: Env,
        executor: Address,
        tx: SafeTransaction,
        attestation_data: Bytes,
    ) -> Result<BytesN<32>, WalletError> {
        ownable::require_owner(&env, &executor)?;

        let wallet = env.current_contract_address();
        let nonce = Self::nonce(env.clone());
        let hash = common::transaction_hash(&env, &wallet, &tx, nonce).to_bytes();
        let next = nonce.checked_add(1).ok_or(WalletError::NonceOverflow)?;
        env.storage().instance().set(&NONCE, &next);

        let guard = Self::guard(env.clone()).map(|g| GuardClient::new(&env, &g));
        if let Some(guard) = &guard {
            guard.check_transaction(&wallet, &tx, &next, &attestation_data, &executor);
        }

        env.storage()
            .persistent()
            .set(&(EXECUTED, hash.clone()), &true);
        events::publish_executed(&env, &hash, nonce);

        if let Some(guard) = &guard {
            guard.check_after_execution(&hash, &true);
        }
        Ok(hash)
    }

    pub fn exec_from_module(
        env: Env,
        module: Address,
        to: Address,
        value: i128,
        data: Bytes,
        operation: Operation,
    ) -> Result<BytesN<32>, WalletError> {
        module.require_auth();
        if !Self::is_module_enabled(env.clone(), module.clone()) {
            return Err(WalletError::ModuleNotEnabled);
        }

        let wallet = env.current_contract_address();
        let guard = Self::guard(env.clone()).map(|g| GuardClient::new(&env, &g));
        let hash = match &guard {
            Some(guard) => {
                guard.check_module_transaction(&wallet, &to, &value, &data, &operation, &module)
            }
            None => common::module_transaction_hash(
                &env, &wallet, &to, value, &data, operation, &module,
            )
            .to_bytes(),
        };

        env.storage()
            .persistent()
            .set(&(EXECUTED, hash.clone()), &true);
        events::publish_module_executed(&env, &hash, &module);

        if let Some(guard) = &guard {
            guard.check_after_execution(&hash, &true);
        }
        Ok(hash)
    }

    pub fn is_executed(env: Env, hash: BytesN<32>) -> bool {
        env.storage()
            .persistent()
            .get(&(EXECUTED, hash))
            .unwrap_or(false)
    }
}
