//! Recoverable secp256k1 signatures over transaction hashes.
//!
//! Attestations arrive as `r ‖ s ‖ v` (65 bytes). Parsing rejects anything
//! the host recovery call would trap on, so the admission path can treat a
//! bad signature as "no live attestation" rather than aborting.

use k256::elliptic_curve::{point::DecompressPoint, subtle::Choice};
use k256::{AffinePoint, FieldBytes};
use soroban_sdk::{crypto::Hash, Bytes, BytesN, Env};

pub const SIGNATURE_LEN: u32 = 65;

/// secp256k1 group order.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
    0x41, 0x41,
];

/// Largest `s` accepted (EIP-2): floor(order / 2).
const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b,
    0x20, 0xa0,
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignatureError {
    InvalidLength,
    InvalidRecoveryId,
    /// `r` or `s` is zero or not below the group order.
    ScalarOutOfRange,
    /// Malleable high-S form.
    HighS,
    /// `r` is not the x-coordinate of any curve point.
    NotOnCurve,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoverableSignature {
    pub rs: BytesN<64>,
    pub recovery_id: u32,
}

impl RecoverableSignature {
    pub fn parse(env: &Env, data: &Bytes) -> Result<Self, SignatureError> {
        if data.len() != SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength);
        }
        let mut raw = [0u8; 65];
        data.copy_into_slice(&mut raw);
        Self::from_array(env, &raw)
    }

    pub fn from_array(env: &Env, raw: &[u8; 65]) -> Result<Self, SignatureError> {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&raw[..32]);
        s.copy_from_slice(&raw[32..64]);

        let recovery_id = match raw[64] {
            0 | 1 => raw[64] as u32,
            27 | 28 => (raw[64] - 27) as u32,
            _ => return Err(SignatureError::InvalidRecoveryId),
        };

        for scalar in [&r, &s] {
            if *scalar == [0u8; 32] || *scalar >= CURVE_ORDER {
                return Err(SignatureError::ScalarOutOfRange);
            }
        }
        if s > HALF_CURVE_ORDER {
            return Err(SignatureError::HighS);
        }
        if !is_curve_x(&r, recovery_id == 1) {
            return Err(SignatureError::NotOnCurve);
        }

        let mut rs = [0u8; 64];
        rs.copy_from_slice(&raw[..64]);
        Ok(Self {
            rs: BytesN::from_array(env, &rs),
            recovery_id,
        })
    }
}

/// Whether `x` lifts to a point on secp256k1. Recovery ids above 1 are
/// never accepted, so `R.x == r` always holds.
fn is_curve_x(x: &[u8; 32], y_is_odd: bool) -> bool {
    let x = FieldBytes::clone_from_slice(x);
    AffinePoint::decompress(&x, Choice::from(y_is_odd as u8))
        .is_some()
        .into()
}

/// 20-byte signer identity of an uncompressed SEC1 public key: the trailing
/// 20 bytes of keccak256 over the key without its `0x04` tag.
pub fn signer_from_public_key(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let key = public_key.to_array();
    let digest = env.crypto().keccak256(&Bytes::from_slice(env, &key[1..]));
    let digest = digest.to_array();
    let mut signer = [0u8; 20];
    signer.copy_from_slice(&digest[12..]);
    BytesN::from_array(env, &signer)
}

/// Recovers the identity that produced `signature` over `digest`.
pub fn recover_signer(
    env: &Env,
    digest: &Hash<32>,
    signature: &RecoverableSignature,
) -> BytesN<20> {
    let public_key = env
        .crypto()
        .secp256k1_recover(digest, &signature.rs, signature.recovery_id);
    signer_from_public_key(env, &public_key)
}
