#![no_main]

use attestation_guard::signature::{RecoverableSignature, SIGNATURE_LEN};
use attestation_guard::AttestationData;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{Bytes, Env};

fuzz_target!(|raw: &[u8]| {
    let env = Env::default();
    let data = Bytes::from_slice(&env, raw);

    // Classification is total: every length maps to a shape or a format error.
    let shape = AttestationData::classify(&env, &data);
    match raw.len() {
        65 => assert!(matches!(shape, Ok(AttestationData::Signature(_)))),
        32 if raw.iter().any(|b| *b != 0) => {
            assert!(matches!(shape, Ok(AttestationData::HashReference(_))))
        }
        len if len > 65 => assert!(matches!(shape, Ok(AttestationData::Envelope))),
        _ => assert!(shape.is_err()),
    }

    // Parsing never panics, and accepted recovery ids are normalised.
    if data.len() == SIGNATURE_LEN {
        if let Ok(signature) = RecoverableSignature::parse(&env, &data) {
            assert!(signature.recovery_id <= 1);
        }
    }
});
