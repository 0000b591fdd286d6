//! Structured event publishing for the attestation guard.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::admission::AdmissionPath;
use crate::Authority;

/// Fired for every admitted transaction. Carries no state change.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionAdmittedEvent {
    pub executor: Address,
    pub tx_hash: Option<BytesN<32>>,
    pub path: AdmissionPath,
}

pub fn publish_authority_changed(env: &Env, previous: &Authority, next: &Authority) {
    env.events().publish(
        (symbol_short!("AUTH_SET"), previous.account.clone()),
        next.clone(),
    );
}

pub fn publish_enforcement(env: &Env, enabled: bool) {
    env.events()
        .publish((symbol_short!("ENFORCE"),), enabled);
}

pub fn publish_thumbprint(env: &Env, thumbprint: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("POLICY"),), thumbprint.clone());
}

pub fn publish_attested(env: &Env, hash: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("ATTEST"),), hash.clone());
}

pub fn publish_admitted(
    env: &Env,
    wallet: &Address,
    executor: &Address,
    tx_hash: Option<BytesN<32>>,
    path: AdmissionPath,
) {
    env.events().publish(
        (symbol_short!("TX_OK"), wallet.clone()),
        TransactionAdmittedEvent {
            executor: executor.clone(),
            tx_hash,
            path,
        },
    );
}

pub fn publish_module_admitted(env: &Env, wallet: &Address, module: &Address, hash: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("MOD_OK"), wallet.clone()),
        (module.clone(), hash.clone()),
    );
}

pub fn publish_after_execution(env: &Env, hash: &BytesN<32>, success: bool) {
    env.events()
        .publish((symbol_short!("AFTER_EX"), hash.clone()), success);
}
