#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::CommonError;

const OWNER: Symbol = symbol_short!("OWNER");

/// Records the initial owner. Intended to be called once from a constructor.
pub fn init_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Returns the current owner, or `None` once ownership has been renounced.
pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Guard — returns `CommonError::Unauthorized` unless `caller` is the owner.
///
/// After renouncement there is no owner, so every caller is rejected.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), CommonError> {
    caller.require_auth();
    match owner(env) {
        Some(current) if current == *caller => Ok(()),
        _ => Err(CommonError::Unauthorized),
    }
}

/// Hands ownership to `new_owner`.
///
/// Emits an `("OWN_XFER", previous)` event carrying the new owner.
pub fn transfer_ownership(
    env: &Env,
    caller: &Address,
    new_owner: &Address,
) -> Result<(), CommonError> {
    require_owner(env, caller)?;
    env.storage().instance().set(&OWNER, new_owner);
    env.events()
        .publish((symbol_short!("OWN_XFER"), caller.clone()), new_owner.clone());
    Ok(())
}

/// Drops ownership permanently. There is no way back from this.
///
/// Emits an `("OWN_REN", previous)` event.
pub fn renounce_ownership(env: &Env, caller: &Address) -> Result<(), CommonError> {
    require_owner(env, caller)?;
    env.storage().instance().remove(&OWNER);
    env.events()
        .publish((symbol_short!("OWN_REN"), caller.clone()), ());
    Ok(())
}
