//! # Guard Factory — Deployment Tests
//!
//! Runs `create_attestation_guard` against the release build of the guard
//! contract. Build it first:
//!
//! ```text
//! cargo build --target wasm32v1-none --release -p attestation_guard
//! ```

#![cfg(guard_wasm)]

extern crate std;

use soroban_sdk::{BytesN, Env};

use attestation_guard::AttestationGuardContractClient;
use common::Authority;
use guard_factory::{AttestationGuardFactoryContract, AttestationGuardFactoryContractClient};
use test_framework::*;

const GUARD_WASM: &[u8] = include_bytes!(env!("GUARD_WASM_PATH"));

fn deploy_factory(env: &mut TestEnv) -> AttestationGuardFactoryContractClient<'static> {
    let wasm_hash = env.env.deployer().upload_contract_wasm(GUARD_WASM);
    let owner = env.generate_address();
    let factory_id = env
        .env
        .register(AttestationGuardFactoryContract, (owner, wasm_hash));
    AttestationGuardFactoryContractClient::new(&env.env, &factory_id)
}

fn guard_at(env: &Env, address: &soroban_sdk::Address) -> AttestationGuardContractClient<'static> {
    AttestationGuardContractClient::new(env, address)
}

#[test]
fn test_created_guard_carries_requested_authority() {
    let mut env = TestEnv::new();
    let factory = deploy_factory(&mut env);
    let key = AuthorityKey::new(&mut env, 7);

    let predicted = factory.next_guard_address();
    let created = factory.create_attestation_guard(&key.authority);
    assert_eq!(created, predicted);

    let guard = guard_at(&env.env, &created);
    assert_eq!(guard.attestation_authority(), key.authority);
    assert_eq!(guard.owner(), Some(key.account().clone()));
    assert!(guard.is_enforced());
    assert_eq!(
        guard.attestation_policy_thumbprint(),
        BytesN::from_array(&env.env, &[0u8; 32])
    );

    // The deployment slot is consumed.
    assert_ne!(factory.next_guard_address(), created);
}

#[test]
fn test_created_guards_are_independent() {
    let mut env = TestEnv::new();
    let factory = deploy_factory(&mut env);
    let first_key = AuthorityKey::new(&mut env, 7);
    let second_key = AuthorityKey::new(&mut env, 9);

    let first = guard_at(&env.env, &factory.create_attestation_guard(&first_key.authority));
    let second = guard_at(&env.env, &factory.create_attestation_guard(&second_key.authority));
    assert_ne!(first.address, second.address);
    assert_eq!(first.attestation_authority(), first_key.authority);
    assert_eq!(second.attestation_authority(), second_key.authority);

    let hash = BytesN::from_array(&env.env, &[0x33u8; 32]);
    first.attest_hash(first_key.account(), &hash);
    assert!(first.is_attested(&hash));
    assert!(!second.is_attested(&hash));

    first.enforce_attestation(first_key.account(), &false);
    assert!(!first.is_enforced());
    assert!(second.is_enforced());
}

#[test]
fn test_any_caller_can_create_a_guard_for_any_authority() {
    let mut env = TestEnv::new();
    let factory = deploy_factory(&mut env);

    // The authority does not need to be the caller, or even a key we hold.
    let authority = Authority {
        account: env.generate_address(),
        signer: BytesN::from_array(&env.env, &[0x5eu8; 20]),
    };
    let guard = guard_at(&env.env, &factory.create_attestation_guard(&authority));
    assert_eq!(guard.attestation_authority(), authority);
}
