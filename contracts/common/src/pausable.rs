#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::CommonError;

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Published whenever the pause switch flips.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseToggledEvent {
    pub admin: Address,
    pub paused: bool,
    pub timestamp: u64,
}

/// Returns `true` when the contract is paused.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Guard: returns `CommonError::Paused` when the contract is paused.
///
/// Call it first in every entry point that writes records. Reads and
/// aggregation stay available while paused.
pub fn require_not_paused(env: &Env) -> Result<(), CommonError> {
    if is_paused(env) {
        return Err(CommonError::Paused);
    }
    Ok(())
}

/// Flips the pause switch and publishes a `PauseToggledEvent`.
///
/// The caller must already be authorized as admin; this module does not
/// know the admin model of the contract using it.
pub fn set_paused(env: &Env, admin: &Address, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    env.events().publish(
        (topic, admin.clone()),
        PauseToggledEvent {
            admin: admin.clone(),
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}
