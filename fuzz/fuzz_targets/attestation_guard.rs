#![no_main]

use arbitrary::Arbitrary;
use attestation_guard::{AttestationGuardContract, AttestationGuardContractClient, GuardError};
use common::{Authority, SafeTransaction};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Bytes, BytesN, Env};

/// Actions against a single guard protecting one wallet.
///
/// Transactions are drawn from a small pool so that attestations recorded
/// by `Attest` are actually hit by later checks.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Attest { tx: u8, nonce: u8 },
    Check { tx: u8, nonce: u8, data: Vec<u8> },
    CheckReference { tx: u8, nonce: u8 },
    SetEnforced { enabled: bool },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let authority = Authority {
        account: Address::generate(&env),
        signer: BytesN::from_array(&env, &[0x42u8; 20]),
    };
    let contract_id = env.register(AttestationGuardContract, (owner, authority.clone()));
    let client = AttestationGuardContractClient::new(&env, &contract_id);

    let wallet = Address::generate(&env);
    let executor = Address::generate(&env);
    let pool: Vec<SafeTransaction> = (0..4)
        .map(|i| SafeTransaction::call(Address::generate(&env), i, Bytes::new(&env)))
        .collect();

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Attest { tx, nonce } => {
                let tx = &pool[tx as usize % pool.len()];
                let hash = common::transaction_hash(&env, &wallet, tx, nonce as u64).to_bytes();
                client.attest_hash(&authority.account, &hash);
                assert!(client.is_attested(&hash));
            }
            FuzzAction::Check { tx, nonce, data } => {
                let tx = &pool[tx as usize % pool.len()];
                let data = Bytes::from_slice(&env, &data);
                let next = nonce as u64;
                let res = client.try_check_transaction(&wallet, tx, &next, &data, &executor);

                if !client.is_enforced() {
                    assert!(res.is_ok());
                    continue;
                }
                // ── Invariant: the floor sequence is never admitted ──
                if next == 0 {
                    assert_eq!(res.unwrap_err().unwrap(), GuardError::InvalidSequence);
                    continue;
                }
                // ── Invariant: malformed lengths are always rejected ──
                let len = data.len();
                if len < 32 || (len > 32 && len < 65) {
                    assert_eq!(res.unwrap_err().unwrap(), GuardError::UnexpectedAttestationFormat);
                    continue;
                }
                // ── Invariant: nothing is admitted without an attestation ──
                // The authority key is unknown, so a live signature cannot match.
                if matches!(res, Ok(Ok(()))) {
                    let hash = common::transaction_hash(&env, &wallet, tx, next - 1).to_bytes();
                    assert!(client.is_attested(&hash));
                }
            }
            FuzzAction::CheckReference { tx, nonce } => {
                let tx = &pool[tx as usize % pool.len()];
                let next = nonce as u64 + 1;
                let hash = common::transaction_hash(&env, &wallet, tx, next - 1).to_bytes();
                let reference = Bytes::from_slice(&env, &hash.to_array());
                let res = client.try_check_transaction(&wallet, tx, &next, &reference, &executor);
                if client.is_enforced() {
                    assert_eq!(res.is_ok(), client.is_attested(&hash));
                }
            }
            FuzzAction::SetEnforced { enabled } => {
                client.enforce_attestation(&authority.account, &enabled);
                assert_eq!(client.is_enforced(), enabled);
            }
        }
    }
});
