//! # Attestation Guard — Integration Tests
//!
//! - Property-based checks of the admission rules against a live guard
//! - End-to-end flows through the reference wallet

extern crate std;

use proptest::prelude::*;
use soroban_sdk::{Bytes, BytesN};

use attestation_guard::GuardError;
use common::{Authority, Operation};
use test_framework::generators::*;
use test_framework::*;

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// **Property**: any non-null signer yields a guard reporting that authority.
    #[test]
    fn prop_non_null_authority_constructs(signer in non_null_signer_strategy()) {
        let mut env = TestEnv::new();
        let authority = Authority {
            account: env.generate_address(),
            signer: BytesN::from_array(&env.env, &signer),
        };
        let guard = env.deploy_guard(&authority);

        prop_assert_eq!(guard.attestation_authority(), authority);
        prop_assert!(guard.is_enforced());
    }

    /// **Property**: with enforcement off, every sequence and every data shape is admitted.
    #[test]
    fn prop_disabled_enforcement_admits_anything(
        data in attestation_bytes_strategy(),
        nonce in prop_oneof![Just(0u64), sequence_strategy()],
    ) {
        let mut env = TestEnv::new();
        let mut harness = GuardTestHarness::new(&mut env, 7);
        harness.set_enforcement(false);

        let tx = harness.sample_tx();
        let data = Bytes::from_slice(&harness.env.env, &data);
        prop_assert_eq!(harness.check_direct(&tx, nonce, &data), Ok(()));
    }

    /// **Property**: the floor sequence is refused whatever the data.
    #[test]
    fn prop_floor_sequence_rejected(data in attestation_bytes_strategy()) {
        let mut env = TestEnv::new();
        let mut harness = GuardTestHarness::new(&mut env, 7);

        let tx = harness.sample_tx();
        let data = Bytes::from_slice(&harness.env.env, &data);
        prop_assert_eq!(harness.check_direct(&tx, 0, &data), Err(GuardError::InvalidSequence));
    }

    /// **Property**: lengths outside the recognised shapes are malformed.
    #[test]
    fn prop_malformed_lengths_rejected(len in malformed_length_strategy(), fill in 1u8..=255u8) {
        let mut env = TestEnv::new();
        let mut harness = GuardTestHarness::new(&mut env, 7);

        let tx = harness.sample_tx();
        let data = Bytes::from_slice(&harness.env.env, &std::vec![fill; len]);
        prop_assert_eq!(
            harness.check_direct(&tx, 1, &data),
            Err(GuardError::UnexpectedAttestationFormat)
        );
    }

    /// **Property**: an envelope only admits once its transaction is attested.
    #[test]
    fn prop_envelope_needs_attestation(len in envelope_length_strategy(), nonce in sequence_strategy()) {
        let mut env = TestEnv::new();
        let mut harness = GuardTestHarness::new(&mut env, 7);

        let tx = harness.sample_tx();
        let data = Bytes::from_slice(&harness.env.env, &std::vec![0x5au8; len]);
        prop_assert_eq!(
            harness.check_direct(&tx, nonce, &data),
            Err(GuardError::AttestationMissing)
        );

        let hash = harness.wallet.get_transaction_hash(&tx, &(nonce - 1));
        harness.guard.attest_hash(harness.key.account(), &hash);
        prop_assert_eq!(harness.check_direct(&tx, nonce, &data), Ok(()));
    }

    /// **Property**: an arbitrary 65-byte blob never aborts the guard; the
    /// attested set alone decides.
    #[test]
    fn prop_arbitrary_signature_falls_back_to_record(
        raw in prop::collection::vec(any::<u8>(), SIGNATURE_LEN),
        nonce in sequence_strategy(),
        attested in any::<bool>(),
    ) {
        let mut env = TestEnv::new();
        let mut harness = GuardTestHarness::new(&mut env, 7);

        let tx = harness.sample_tx();
        if attested {
            let hash = harness.wallet.get_transaction_hash(&tx, &(nonce - 1));
            harness.guard.attest_hash(harness.key.account(), &hash);
        }
        let data = Bytes::from_slice(&harness.env.env, &raw);
        let expected = if attested { Ok(()) } else { Err(GuardError::AttestationMissing) };
        prop_assert_eq!(harness.check_direct(&tx, nonce, &data), expected);
    }

    /// **Property**: attesting the same hash repeatedly is harmless.
    #[test]
    fn prop_attest_idempotent(hash in non_zero_hash_strategy(), times in 1usize..5) {
        let mut env = TestEnv::new();
        let harness = GuardTestHarness::new(&mut env, 7);
        let hash = BytesN::from_array(&harness.env.env, &hash);

        for _ in 0..times {
            harness.guard.attest_hash(harness.key.account(), &hash);
        }
        prop_assert!(harness.guard.is_attested(&hash));
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Wallet → Guard Flows
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_guard_installs_on_wallet() {
    let mut env = TestEnv::new();
    let harness = GuardTestHarness::new(&mut env, 7);
    assert_eq!(harness.wallet.guard(), Some(harness.guard_id.clone()));
}

#[test]
fn test_signed_transaction_executes() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    let tx = harness.sample_tx();

    let expected = harness.next_hash(&tx);
    let signature = harness.sign_next(&tx);
    let hash = harness.exec(&tx, &signature).expect("signed transaction admitted");

    assert_eq!(hash, expected);
    assert_eq!(harness.wallet.nonce(), 1);
    assert!(harness.wallet.is_executed(&hash));
}

#[test]
fn test_signature_is_bound_to_its_sequence() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    let tx = harness.sample_tx();

    let signature = harness.sign_next(&tx);
    harness.exec(&tx, &signature).expect("first execution admitted");

    // Replaying the same signature targets the next sequence number.
    assert!(harness.exec(&tx, &signature).is_err());
    assert_eq!(harness.wallet.nonce(), 1);

    let fresh = harness.sign_next(&tx);
    harness.exec(&tx, &fresh).expect("fresh signature admitted");
    assert_eq!(harness.wallet.nonce(), 2);
}

#[test]
fn test_rejection_leaves_wallet_untouched() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    let tx = harness.sample_tx();
    let hash = harness.next_hash(&tx);

    let envelope = Bytes::from_slice(&harness.env.env, &[0x11u8; 195]);
    assert!(harness.exec(&tx, &envelope).is_err());

    assert_eq!(harness.wallet.nonce(), 0);
    assert!(!harness.wallet.is_executed(&hash));
}

#[test]
fn test_recorded_attestation_executes() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    let tx = harness.sample_tx();

    let hash = harness.attest_next(&tx);
    let envelope = Bytes::from_slice(&harness.env.env, &[0x11u8; 195]);
    assert_eq!(harness.exec(&tx, &envelope), Ok(hash));
}

#[test]
fn test_hash_reference_executes() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    let tx = harness.sample_tx();

    let hash = harness.attest_next(&tx);
    let reference = Bytes::from_slice(&harness.env.env, &hash.to_array());
    assert_eq!(harness.exec(&tx, &reference), Ok(hash));
}

#[test]
fn test_disabled_enforcement_executes_without_data() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    harness.set_enforcement(false);
    let tx = harness.sample_tx();

    let empty = Bytes::new(&harness.env.env);
    harness.exec(&tx, &empty).expect("unenforced guard admits");

    harness.set_enforcement(true);
    assert!(harness.exec(&tx, &empty).is_err());
    assert_eq!(harness.wallet.nonce(), 1);
}

#[test]
fn test_rotated_authority_invalidates_old_signatures() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    let tx = harness.sample_tx();
    let stale = harness.sign_next(&tx);

    let successor = AuthorityKey::new(harness.env, 9);
    harness
        .guard
        .set_attestation_authority(harness.key.account(), &successor.authority);

    assert!(harness.exec(&tx, &stale).is_err());

    let signature = successor.sign(&harness.env.env, &harness.next_hash(&tx));
    harness.exec(&tx, &signature).expect("successor signature admitted");
}

#[test]
fn test_module_transactions_bypass_attestation() {
    let mut env = TestEnv::new();
    let mut harness = GuardTestHarness::new(&mut env, 7);
    let module = harness.env.generate_address();
    let to = harness.env.generate_address();
    let data = Bytes::from_array(&harness.env.env, &[0xde, 0xad]);

    harness
        .wallet
        .enable_module(&harness.wallet_owner, &module);
    let hash = harness
        .wallet
        .exec_from_module(&module, &to, &5, &data, &Operation::Call);

    assert!(harness.wallet.is_executed(&hash));
    assert_eq!(harness.wallet.nonce(), 0);
}
