use soroban_sdk::{contracttype, Address, BytesN};

/// The identity allowed to manage attestation policy and sign attestations.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Authority {
    /// Soroban account that authorises policy changes.
    pub account: Address,
    /// secp256k1 signer whose signatures admit transactions.
    pub signer: BytesN<20>,
}

impl Authority {
    /// The all-zero signer stands in for "no authority".
    pub fn is_null(&self) -> bool {
        self.signer.to_array() == [0u8; 20]
    }
}
