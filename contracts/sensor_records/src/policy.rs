use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::types::{Config, DataKey, VerificationPolicy};

pub fn is_oracle(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Oracle(account.clone()))
        .unwrap_or(false)
}

pub fn add_oracle(env: &Env, account: &Address) {
    let key = DataKey::Oracle(account.clone());
    env.storage().persistent().set(&key, &true);
    common::extend_persistent_ttl(env, &key);
}

pub fn remove_oracle(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Oracle(account.clone()));
}

/// Checks that `claimant` may submit decryption claims under `config`.
///
/// Ciphertexts stay publicly decryptable either way; the policy only gates
/// who may commit a revealed value into the store.
pub fn require_claimant(
    env: &Env,
    config: &Config,
    claimant: &Address,
) -> Result<(), ContractError> {
    match config.policy {
        VerificationPolicy::Permissionless => Ok(()),
        VerificationPolicy::OracleOnly if is_oracle(env, claimant) => Ok(()),
        VerificationPolicy::OracleOnly => Err(ContractError::Unauthorized),
    }
}
