use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env};

use crate::safe_tx::{Operation, SafeTransaction};

/// Identifier of the capability-query interface itself.
pub const INTROSPECTION_INTERFACE_ID: [u8; 4] = [0x01, 0xff, 0xc9, 0xa7];

/// Identifier of the transaction guard capability set
/// (`check_transaction` + `check_after_execution`).
pub const GUARD_INTERFACE_ID: [u8; 4] = [0xe6, 0xd7, 0xa8, 0x3a];

/// Identifier of the module guard capability set
/// (`check_module_transaction` + `check_after_execution`).
pub const MODULE_GUARD_INTERFACE_ID: [u8; 4] = [0x58, 0x40, 0x1e, 0xd8];

/// Never a valid interface id.
pub const INVALID_INTERFACE_ID: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Every capability set a guard advertises.
pub const GUARD_INTERFACES: [[u8; 4]; 3] = [
    INTROSPECTION_INTERFACE_ID,
    GUARD_INTERFACE_ID,
    MODULE_GUARD_INTERFACE_ID,
];

/// Fixed-table lookup used by guards to answer `supports_interface`.
pub fn is_guard_interface(interface_id: &BytesN<4>) -> bool {
    let id = interface_id.to_array();
    id != INVALID_INTERFACE_ID && GUARD_INTERFACES.contains(&id)
}

/// Calls a wallet makes into its guard around each transaction.
#[contractclient(name = "GuardClient")]
pub trait GuardInterface {
    /// `nonce` is the wallet's next sequence number, after it has consumed
    /// one for the transaction under review.
    fn check_transaction(
        env: Env,
        wallet: Address,
        tx: SafeTransaction,
        nonce: u64,
        attestation_data: Bytes,
        executor: Address,
    );

    fn check_module_transaction(
        env: Env,
        wallet: Address,
        to: Address,
        value: i128,
        data: Bytes,
        operation: Operation,
        module: Address,
    ) -> BytesN<32>;

    fn check_after_execution(env: Env, hash: BytesN<32>, success: bool);

    fn supports_interface(env: Env, interface_id: BytesN<4>) -> bool;
}
