#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

pub fn publish_guard_set(env: &Env, guard: Option<Address>) {
    env.events().publish((symbol_short!("GRD_SET"),), guard);
}

pub fn publish_module_enabled(env: &Env, module: &Address) {
    env.events()
        .publish((symbol_short!("MOD_ON"),), module.clone());
}

pub fn publish_executed(env: &Env, hash: &BytesN<32>, nonce: u64) {
    env.events()
        .publish((symbol_short!("EXEC"), hash.clone()), nonce);
}

pub fn publish_module_executed(env: &Env, hash: &BytesN<32>, module: &Address) {
    env.events()
        .publish((symbol_short!("EXEC_MOD"), hash.clone()), module.clone());
}
