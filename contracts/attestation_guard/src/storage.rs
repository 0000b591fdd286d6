use soroban_sdk::{symbol_short, BytesN, Env, Symbol};

use crate::{Authority, GuardError};

const AUTHORITY: Symbol = symbol_short!("AUTH");
const ENFORCED: Symbol = symbol_short!("ENFORCED");
const THUMBPRINT: Symbol = symbol_short!("POLICY");
const ATTEST: Symbol = symbol_short!("ATTEST");

const TTL_THRESHOLD: u32 = 5_184_000; // 5,184,000 ledgers ~= 300 days (@ ~5s/ledger)
const TTL_EXTEND_TO: u32 = 10_368_000; // 10,368,000 ledgers ~= 600 days (@ ~5s/ledger)

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_attestation_ttl(env: &Env, key: &(Symbol, BytesN<32>)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn authority(env: &Env) -> Result<Authority, GuardError> {
    env.storage()
        .instance()
        .get(&AUTHORITY)
        .ok_or(GuardError::InvalidAuthority)
}

pub fn set_authority(env: &Env, authority: &Authority) {
    env.storage().instance().set(&AUTHORITY, authority);
    extend_instance_ttl(env);
}

/// Enforcement is on unless the authority has explicitly switched it off.
pub fn is_enforced(env: &Env) -> bool {
    env.storage().instance().get(&ENFORCED).unwrap_or(true)
}

pub fn set_enforced(env: &Env, enabled: bool) {
    env.storage().instance().set(&ENFORCED, &enabled);
    extend_instance_ttl(env);
}

pub fn thumbprint(env: &Env) -> BytesN<32> {
    env.storage()
        .instance()
        .get(&THUMBPRINT)
        .unwrap_or_else(|| BytesN::from_array(env, &[0u8; 32]))
}

pub fn set_thumbprint(env: &Env, thumbprint: &BytesN<32>) {
    env.storage().instance().set(&THUMBPRINT, thumbprint);
    extend_instance_ttl(env);
}

/// Attested hashes are append-only; there is no removal path.
pub fn record_attestation(env: &Env, hash: &BytesN<32>) {
    let key = (ATTEST, hash.clone());
    env.storage().persistent().set(&key, &true);
    extend_attestation_ttl(env, &key);
}

pub fn is_attested(env: &Env, hash: &BytesN<32>) -> bool {
    let key = (ATTEST, hash.clone());
    let attested = env.storage().persistent().get(&key).unwrap_or(false);
    if attested {
        extend_attestation_ttl(env, &key);
    }
    attested
}
