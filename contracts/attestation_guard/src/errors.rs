use common::CommonError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum GuardError {
    /// Caller is not the owner or attestation authority the operation needs.
    Unauthorized = 1,
    /// A null signer was supplied where a real authority is required.
    InvalidAuthority = 2,
    /// The wallet has not consumed a sequence number yet.
    InvalidSequence = 3,
    /// Attestation data was well formed but nothing approves the transaction.
    AttestationMissing = 4,
    /// Attestation data is neither a signature nor a hash reference.
    UnexpectedAttestationFormat = 5,
}

impl GuardError {
    /// Human-readable rejection reason surfaced to off-chain tooling.
    pub const fn reason(&self) -> &'static str {
        match self {
            GuardError::Unauthorized => "caller not authorized",
            GuardError::InvalidAuthority => "must use a valid attestation addr",
            GuardError::InvalidSequence => "Invalid nonce for attestation guard",
            GuardError::AttestationMissing => "transaction attestation missing",
            GuardError::UnexpectedAttestationFormat => "unexpected signature stream",
        }
    }
}

impl From<CommonError> for GuardError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Unauthorized => GuardError::Unauthorized,
        }
    }
}
