//! Encrypted sensor readings with verifiable, at-most-once decryption.
//!
//! Readings arrive as FHE ciphertexts and are stored as opaque engine
//! handles. Any list of readings can be summed homomorphically. A reading is
//! revealed by submitting a cleartext together with an attestation proof;
//! once the proof checks out the plaintext is committed and never changes.

#![no_std]

pub mod aggregator;
pub mod errors;
pub mod events;
pub mod fhe;
pub mod policy;
pub mod store;
pub mod types;
pub mod validation;
pub mod verifier;


use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, String, Vec};

use crate::aggregator::Aggregator;
use crate::fhe::FheEngineClient;
use crate::store::RecordStore;
use crate::verifier::DecryptionVerifier;

pub use crate::errors::ContractError;
pub use crate::events::{DecryptionVerifiedEvent, EventEntry, RecordCreatedEvent, RecordEvent};
pub use crate::types::{CiphertextHandle, Config, DataKey, SensorRecord, VerificationPolicy};

#[contract]
pub struct SensorRecordsContract;

#[contractimpl]
impl SensorRecordsContract {
    /// Initialize the contract with its admin and external collaborators.
    pub fn initialize(
        env: Env,
        admin: Address,
        fhe_engine: Address,
        authority: Address,
        policy: VerificationPolicy,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(
            &DataKey::Config,
            &Config {
                fhe_engine,
                authority,
                policy,
            },
        );
        common::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Admin)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_config(env: Env) -> Result<Config, ContractError> {
        load_config(&env)
    }

    pub fn version() -> u32 {
        1
    }

    // ======================== Administration ========================

    pub fn set_verification_policy(
        env: Env,
        caller: Address,
        policy: VerificationPolicy,
    ) -> Result<(), ContractError> {
        require_admin(&env, &caller)?;
        let mut config = load_config(&env)?;
        config.policy = policy;
        env.storage().instance().set(&DataKey::Config, &config);
        Ok(())
    }

    pub fn add_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), ContractError> {
        require_admin(&env, &caller)?;
        policy::add_oracle(&env, &oracle);
        Ok(())
    }

    pub fn remove_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), ContractError> {
        require_admin(&env, &caller)?;
        policy::remove_oracle(&env, &oracle);
        Ok(())
    }

    pub fn is_oracle(env: Env, account: Address) -> bool {
        policy::is_oracle(&env, &account)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        require_admin(&env, &caller)?;
        common::set_paused(&env, &caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        require_admin(&env, &caller)?;
        common::set_paused(&env, &caller, false);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        common::is_paused(&env)
    }

    // ======================== Record Store ========================

    /// Ingest an encrypted reading under a new identifier.
    pub fn create_record(
        env: Env,
        creator: Address,
        id: String,
        ciphertext: Bytes,
        input_proof: Bytes,
        location_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        let config = load_config(&env)?;
        common::require_not_paused(&env)?;
        creator.require_auth();
        validation::validate_record_id(&id)?;

        let engine = FheEngineClient::new(&env, &config.fhe_engine);
        RecordStore::new(&env).create(
            &engine,
            &creator,
            &id,
            &ciphertext,
            &input_proof,
            &location_hash,
        )?;
        common::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn get_record(env: Env, id: String) -> Result<SensorRecord, ContractError> {
        RecordStore::new(&env).get(&id)
    }

    pub fn record_exists(env: Env, id: String) -> bool {
        RecordStore::new(&env).exists(&id)
    }

    /// All identifiers in creation order.
    pub fn list_record_ids(env: Env) -> Vec<String> {
        RecordStore::new(&env).ids()
    }

    pub fn list_record_ids_page(
        env: Env,
        start: u32,
        limit: u32,
    ) -> Result<Vec<String>, ContractError> {
        validation::validate_page(limit)?;
        Ok(RecordStore::new(&env).ids_page(start, limit))
    }

    pub fn get_record_count(env: Env) -> u32 {
        RecordStore::new(&env).count()
    }

    // ======================== Decryption Verifier ========================

    /// Reveal a record: check the claimed cleartext against its proof and
    /// commit the plaintext. Succeeds at most once per record.
    pub fn submit_decryption_claim(
        env: Env,
        claimant: Address,
        id: String,
        cleartexts: Bytes,
        decryption_proof: Bytes,
    ) -> Result<(), ContractError> {
        let config = load_config(&env)?;
        common::require_not_paused(&env)?;
        claimant.require_auth();
        policy::require_claimant(&env, &config, &claimant)?;

        DecryptionVerifier::new(&env, &config).verify_record(
            &RecordStore::new(&env),
            &claimant,
            &id,
            &cleartexts,
            &decryption_proof,
        )?;
        Ok(())
    }

    /// Check a decryption claim for any handle, such as an aggregate,
    /// without touching stored records.
    pub fn check_decryption(
        env: Env,
        handle: BytesN<32>,
        cleartexts: Bytes,
        decryption_proof: Bytes,
    ) -> Result<u32, ContractError> {
        let config = load_config(&env)?;
        DecryptionVerifier::new(&env, &config).check(&handle, &cleartexts, &decryption_proof)
    }

    // ======================== Aggregator ========================

    /// Homomorphic sum of the readings of `ids`.
    pub fn aggregate(env: Env, ids: Vec<String>) -> Result<BytesN<32>, ContractError> {
        let config = load_config(&env)?;
        let engine = FheEngineClient::new(&env, &config.fhe_engine);
        Aggregator::aggregate_sum(&env, &RecordStore::new(&env), &engine, &ids)
    }

    // ======================== Event log ========================

    pub fn get_event_count(env: Env) -> u64 {
        events::event_count(&env)
    }

    pub fn get_events(env: Env, start: u64, limit: u32) -> Result<Vec<EventEntry>, ContractError> {
        validation::validate_page(limit)?;
        Ok(events::read_events(&env, start, limit))
    }
}

fn load_config(env: &Env) -> Result<Config, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}
