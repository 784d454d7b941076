use soroban_sdk::{Env, String, Vec};

use crate::errors::ContractError;
use crate::fhe::FheEngineClient;
use crate::store::RecordStore;
use crate::types::CiphertextHandle;

pub struct Aggregator;

impl Aggregator {
    /// Sums the ciphertexts of `ids` with homomorphic addition.
    ///
    /// Every id is resolved before any arithmetic, in the given order, so a
    /// missing id fails without producing a handle. Addition is commutative
    /// and associative, so the decrypted sum does not depend on the order;
    /// the fold still follows it for reproducible cost. Repeated ids count
    /// once per occurrence.
    pub fn aggregate_sum(
        env: &Env,
        store: &RecordStore,
        engine: &FheEngineClient,
        ids: &Vec<String>,
    ) -> Result<CiphertextHandle, ContractError> {
        if ids.is_empty() {
            return Err(ContractError::EmptyInput);
        }
        let handles = store.handles(ids)?;

        let mut total = engine.zero();
        for handle in handles.iter() {
            total = engine.add(&total, &handle);
        }

        engine.allow(&total, &env.current_contract_address());
        engine.allow_public_decrypt(&total);
        Ok(total)
    }
}
