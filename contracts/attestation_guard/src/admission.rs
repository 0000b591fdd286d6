//! Admission decision for a transaction whose hash has already been derived.

use soroban_sdk::{contracttype, crypto::Hash, Bytes, BytesN, Env};

use crate::signature::{recover_signer, RecoverableSignature, SIGNATURE_LEN};
use crate::{storage, Authority, GuardError};

const HASH_REFERENCE_LEN: u32 = 32;

/// How a transaction got through.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdmissionPath {
    EnforcementDisabled = 0,
    LiveSignature = 1,
    RecordedAttestation = 2,
    Module = 3,
}

/// Shape of the attestation data handed to `check_transaction`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttestationData {
    /// `r ‖ s ‖ v`, to be checked against the authority signer.
    Signature(Bytes),
    /// An explicit reference to the approved transaction hash.
    HashReference(BytesN<32>),
    /// Anything longer than a signature. Only the attested set can admit it.
    Envelope,
}

impl AttestationData {
    pub fn classify(env: &Env, data: &Bytes) -> Result<Self, GuardError> {
        match data.len() {
            SIGNATURE_LEN => Ok(AttestationData::Signature(data.clone())),
            HASH_REFERENCE_LEN => {
                let mut raw = [0u8; 32];
                data.copy_into_slice(&mut raw);
                if raw == [0u8; 32] {
                    return Err(GuardError::UnexpectedAttestationFormat);
                }
                Ok(AttestationData::HashReference(BytesN::from_array(env, &raw)))
            }
            len if len > SIGNATURE_LEN => Ok(AttestationData::Envelope),
            _ => Err(GuardError::UnexpectedAttestationFormat),
        }
    }
}

fn require_recorded(env: &Env, hash: &BytesN<32>) -> Result<AdmissionPath, GuardError> {
    if storage::is_attested(env, hash) {
        Ok(AdmissionPath::RecordedAttestation)
    } else {
        Err(GuardError::AttestationMissing)
    }
}

/// Decides whether `data` attests the transaction identified by `digest`.
///
/// A signature from anyone but the authority signer, including one that
/// fails to parse, falls back to the attested set.
pub fn admit(
    env: &Env,
    authority: &Authority,
    digest: &Hash<32>,
    data: &Bytes,
) -> Result<AdmissionPath, GuardError> {
    let tx_hash = digest.to_bytes();
    match AttestationData::classify(env, data)? {
        AttestationData::Signature(raw) => {
            if let Ok(signature) = RecoverableSignature::parse(env, &raw) {
                if recover_signer(env, digest, &signature) == authority.signer {
                    return Ok(AdmissionPath::LiveSignature);
                }
            }
            require_recorded(env, &tx_hash)
        }
        AttestationData::HashReference(reference) => {
            if reference != tx_hash {
                return Err(GuardError::AttestationMissing);
            }
            require_recorded(env, &tx_hash)
        }
        AttestationData::Envelope => require_recorded(env, &tx_hash),
    }
}
