#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Vec};

use crate::types::DataKey;

/// Event published when a record is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordCreatedEvent {
    pub id: String,
    pub creator: Address,
    pub location_hash: BytesN<32>,
    pub timestamp: u64,
}

/// Event published when a decryption claim is accepted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptionVerifiedEvent {
    pub id: String,
    pub plaintext_value: u32,
    pub verifier: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordEvent {
    Created(RecordCreatedEvent),
    Verified(DecryptionVerifiedEvent),
}

/// One entry of the persisted notification log.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EventEntry {
    pub seq: u64,
    pub timestamp: u64,
    pub event: RecordEvent,
}

/// Publishes `RecordCreated` and appends it to the log.
pub fn publish_record_created(env: &Env, id: String, creator: Address, location_hash: BytesN<32>) {
    let data = RecordCreatedEvent {
        id: id.clone(),
        creator,
        location_hash,
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("REC_NEW"), id), data.clone());
    append(env, RecordEvent::Created(data));
}

/// Publishes `DecryptionVerified` and appends it to the log.
pub fn publish_decryption_verified(env: &Env, id: String, plaintext_value: u32, verifier: Address) {
    let data = DecryptionVerifiedEvent {
        id: id.clone(),
        plaintext_value,
        verifier,
        timestamp: env.ledger().timestamp(),
    };
    env.events()
        .publish((symbol_short!("REC_VFY"), id), data.clone());
    append(env, RecordEvent::Verified(data));
}

fn append(env: &Env, event: RecordEvent) {
    let seq = event_count(env);
    let key = DataKey::Event(seq);
    let entry = EventEntry {
        seq,
        timestamp: env.ledger().timestamp(),
        event,
    };
    env.storage().persistent().set(&key, &entry);
    common::extend_persistent_ttl(env, &key);
    env.storage()
        .instance()
        .set(&DataKey::EventCount, &(seq + 1));
}

/// Number of entries ever appended to the log.
pub fn event_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::EventCount)
        .unwrap_or(0)
}

/// Up to `limit` entries starting at sequence number `start`, in emission order.
pub fn read_events(env: &Env, start: u64, limit: u32) -> Vec<EventEntry> {
    let end = event_count(env).min(start.saturating_add(limit as u64));
    let mut out = Vec::new(env);
    for seq in start..end {
        if let Some(entry) = env.storage().persistent().get(&DataKey::Event(seq)) {
            out.push_back(entry);
        }
    }
    out
}
