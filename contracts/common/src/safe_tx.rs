//! Wallet transaction descriptor and its canonical hash.
//!
//! The hash follows an EIP-712 style construction so that off-chain signers
//! can reproduce it byte for byte:
//!
//! ```text
//! domain = keccak256(DOMAIN_TYPEHASH ‖ network_id ‖ xdr(wallet))
//! struct = keccak256(SAFE_TX_TYPEHASH ‖ xdr(to) ‖ value ‖ keccak256(data) ‖ operation
//!                    ‖ safe_tx_gas ‖ base_gas ‖ gas_price ‖ opt(gas_token)
//!                    ‖ opt(refund_receiver) ‖ nonce)
//! hash   = keccak256(0x19 ‖ 0x01 ‖ domain ‖ struct)
//! ```
//!
//! Integers are big-endian; `opt(x)` is `0x00` for `None` and `0x01 ‖ xdr(x)`
//! otherwise.

use soroban_sdk::{contracttype, crypto::Hash, xdr::ToXdr, Address, Bytes, Env};

const DOMAIN_TYPEHASH_PREIMAGE: &[u8] = b"EIP712Domain(bytes32 network,address wallet)";
const SAFE_TX_TYPEHASH_PREIMAGE: &[u8] = b"SafeTx(address to,int128 value,bytes data,uint32 operation,uint64 safeTxGas,uint64 baseGas,int128 gasPrice,address gasToken,address refundReceiver,uint64 nonce)";
const MODULE_TX_TYPEHASH_PREIMAGE: &[u8] =
    b"ModuleTx(address wallet,address to,int128 value,bytes data,uint32 operation,address module)";

/// How the wallet applies a transaction to its destination.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Call = 0,
    DelegateCall = 1,
}

/// A transaction proposed to a wallet.
///
/// Gas and refund parameters are carried through to the hash unchanged; the
/// guard never interprets them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SafeTransaction {
    pub to: Address,
    pub value: i128,
    pub data: Bytes,
    pub operation: Operation,
    pub safe_tx_gas: u64,
    pub base_gas: u64,
    pub gas_price: i128,
    pub gas_token: Option<Address>,
    pub refund_receiver: Option<Address>,
}

impl SafeTransaction {
    /// A plain call with no gas refund configuration.
    pub fn call(to: Address, value: i128, data: Bytes) -> Self {
        Self {
            to,
            value,
            data,
            operation: Operation::Call,
            safe_tx_gas: 0,
            base_gas: 0,
            gas_price: 0,
            gas_token: None,
            refund_receiver: None,
        }
    }
}

fn operation_byte(operation: Operation) -> u8 {
    match operation {
        Operation::Call => 0,
        Operation::DelegateCall => 1,
    }
}

fn append_address(env: &Env, buf: &mut Bytes, address: &Address) {
    buf.append(&address.clone().to_xdr(env));
}

fn append_optional_address(env: &Env, buf: &mut Bytes, address: &Option<Address>) {
    match address {
        Some(address) => {
            buf.push_back(1);
            append_address(env, buf, address);
        }
        None => buf.push_back(0),
    }
}

fn typehash(env: &Env, preimage: &[u8]) -> Hash<32> {
    env.crypto().keccak256(&Bytes::from_slice(env, preimage))
}

/// Domain separator binding a hash to one wallet on one network.
pub fn domain_separator(env: &Env, wallet: &Address) -> Hash<32> {
    let mut buf = Bytes::new(env);
    buf.extend_from_array(&typehash(env, DOMAIN_TYPEHASH_PREIMAGE).to_array());
    buf.extend_from_array(&env.ledger().network_id().to_array());
    append_address(env, &mut buf, wallet);
    env.crypto().keccak256(&buf)
}

/// Canonical hash of `tx` executed by `wallet` at sequence number `nonce`.
pub fn transaction_hash(env: &Env, wallet: &Address, tx: &SafeTransaction, nonce: u64) -> Hash<32> {
    let mut body = Bytes::new(env);
    body.extend_from_array(&typehash(env, SAFE_TX_TYPEHASH_PREIMAGE).to_array());
    append_address(env, &mut body, &tx.to);
    body.extend_from_array(&tx.value.to_be_bytes());
    body.extend_from_array(&env.crypto().keccak256(&tx.data).to_array());
    body.push_back(operation_byte(tx.operation));
    body.extend_from_array(&tx.safe_tx_gas.to_be_bytes());
    body.extend_from_array(&tx.base_gas.to_be_bytes());
    body.extend_from_array(&tx.gas_price.to_be_bytes());
    append_optional_address(env, &mut body, &tx.gas_token);
    append_optional_address(env, &mut body, &tx.refund_receiver);
    body.extend_from_array(&nonce.to_be_bytes());
    let struct_hash = env.crypto().keccak256(&body);

    let mut envelope = Bytes::from_array(env, &[0x19, 0x01]);
    envelope.extend_from_array(&domain_separator(env, wallet).to_array());
    envelope.extend_from_array(&struct_hash.to_array());
    env.crypto().keccak256(&envelope)
}

/// Identity of a module-initiated transaction. Modules bypass the nonce, so
/// the hash covers the acting module instead.
pub fn module_transaction_hash(
    env: &Env,
    wallet: &Address,
    to: &Address,
    value: i128,
    data: &Bytes,
    operation: Operation,
    module: &Address,
) -> Hash<32> {
    let mut body = Bytes::new(env);
    body.extend_from_array(&typehash(env, MODULE_TX_TYPEHASH_PREIMAGE).to_array());
    append_address(env, &mut body, wallet);
    append_address(env, &mut body, to);
    body.extend_from_array(&value.to_be_bytes());
    body.extend_from_array(&env.crypto().keccak256(data).to_array());
    body.push_back(operation_byte(operation));
    append_address(env, &mut body, module);
    env.crypto().keccak256(&body)
}
