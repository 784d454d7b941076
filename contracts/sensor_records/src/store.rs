//! Record store: id → record map plus an append-only id index.
//!
//! The index lives in `RecordAt(0..count)` slots so enumeration never has to
//! load one ever-growing vector. A record and its index slot are written in
//! the same invocation; Soroban rolls both back together on failure.

use soroban_sdk::{log, Address, Bytes, BytesN, Env, String, Vec};

use crate::errors::ContractError;
use crate::events;
use crate::fhe::FheEngineClient;
use crate::types::{CiphertextHandle, DataKey, SensorRecord};

pub struct RecordStore<'a> {
    env: &'a Env,
}

impl<'a> RecordStore<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Ingests the ciphertext through the engine and persists a new record.
    pub fn create(
        &self,
        engine: &FheEngineClient,
        creator: &Address,
        id: &String,
        ciphertext: &Bytes,
        input_proof: &Bytes,
        location_hash: &BytesN<32>,
    ) -> Result<SensorRecord, ContractError> {
        if self.exists(id) {
            return Err(ContractError::AlreadyExists);
        }

        let handle = match engine.try_ingest(ciphertext, input_proof) {
            Ok(Ok(handle)) => handle,
            _ => {
                log!(self.env, "ciphertext rejected by engine", id);
                return Err(ContractError::InvalidCiphertext);
            }
        };
        engine.allow(&handle, &self.env.current_contract_address());
        engine.allow_public_decrypt(&handle);

        let record = SensorRecord {
            id: id.clone(),
            ciphertext_handle: handle,
            location_hash: location_hash.clone(),
            created_at: self.env.ledger().timestamp(),
            creator: creator.clone(),
            plaintext_value: 0,
            verified: false,
            verified_at: 0,
        };
        self.insert(&record)?;

        events::publish_record_created(
            self.env,
            id.clone(),
            creator.clone(),
            location_hash.clone(),
        );
        Ok(record)
    }

    pub fn exists(&self, id: &String) -> bool {
        self.env
            .storage()
            .persistent()
            .has(&DataKey::Record(id.clone()))
    }

    pub fn get(&self, id: &String) -> Result<SensorRecord, ContractError> {
        let key = DataKey::Record(id.clone());
        let record = self
            .env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::NotFound)?;
        common::extend_persistent_ttl(self.env, &key);
        Ok(record)
    }

    /// Commits a revealed plaintext. Both fields change in one write.
    pub fn mark_verified(
        &self,
        mut record: SensorRecord,
        plaintext_value: u32,
    ) -> Result<SensorRecord, ContractError> {
        if record.verified {
            return Err(ContractError::AlreadyVerified);
        }
        record.plaintext_value = plaintext_value;
        record.verified = true;
        record.verified_at = self.env.ledger().timestamp();

        let key = DataKey::Record(record.id.clone());
        self.env.storage().persistent().set(&key, &record);
        common::extend_persistent_ttl(self.env, &key);
        Ok(record)
    }

    pub fn count(&self) -> u32 {
        self.env
            .storage()
            .instance()
            .get(&DataKey::RecordCount)
            .unwrap_or(0)
    }

    /// All ids in creation order.
    pub fn ids(&self) -> Vec<String> {
        self.ids_page(0, self.count())
    }

    /// Up to `limit` ids starting at creation index `start`.
    pub fn ids_page(&self, start: u32, limit: u32) -> Vec<String> {
        let end = self.count().min(start.saturating_add(limit));
        let mut out = Vec::new(self.env);
        for index in start..end {
            if let Some(id) = self
                .env
                .storage()
                .persistent()
                .get::<_, String>(&DataKey::RecordAt(index))
            {
                out.push_back(id);
            }
        }
        out
    }

    /// Ciphertext handles of `ids`, in the given order.
    ///
    /// Fails on the first id that has no record.
    pub fn handles(&self, ids: &Vec<String>) -> Result<Vec<CiphertextHandle>, ContractError> {
        let mut handles = Vec::new(self.env);
        for id in ids.iter() {
            handles.push_back(self.get(&id)?.ciphertext_handle);
        }
        Ok(handles)
    }

    fn insert(&self, record: &SensorRecord) -> Result<(), ContractError> {
        let index = self.count();
        let next = index.checked_add(1).ok_or(ContractError::InvalidInput)?;

        let record_key = DataKey::Record(record.id.clone());
        let slot_key = DataKey::RecordAt(index);
        let storage = self.env.storage().persistent();
        storage.set(&record_key, record);
        storage.set(&slot_key, &record.id);
        common::extend_persistent_ttl(self.env, &record_key);
        common::extend_persistent_ttl(self.env, &slot_key);

        self.env
            .storage()
            .instance()
            .set(&DataKey::RecordCount, &next);
        Ok(())
    }
}
