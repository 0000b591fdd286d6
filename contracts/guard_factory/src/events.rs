#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

use common::Authority;

pub fn publish_guard_created(env: &Env, guard: &Address, authority: &Authority) {
    env.events().publish(
        (symbol_short!("GRD_NEW"), guard.clone()),
        authority.clone(),
    );
}

pub fn publish_wasm_updated(env: &Env, wasm_hash: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("GRD_WASM"),), wasm_hash.clone());
}
