//! Decryption verifier.
//!
//! The contract never decrypts. It asks the attestation authority whether a
//! proof covers exactly one handle and exactly the claimed cleartext bytes,
//! then decodes those bytes and commits them once.

use soroban_sdk::{log, Address, Bytes, Env, String, Vec};

use crate::errors::ContractError;
use crate::events;
use crate::fhe::{AttestationAuthorityClient, FheEngineClient};
use crate::store::RecordStore;
use crate::types::{CiphertextHandle, Config, SensorRecord};

/// Length of one ABI-encoded `uint32` word.
pub const CLEARTEXT_LEN: u32 = 32;

pub struct DecryptionVerifier<'a> {
    env: &'a Env,
    engine: FheEngineClient<'a>,
    authority: AttestationAuthorityClient<'a>,
}

impl<'a> DecryptionVerifier<'a> {
    pub fn new(env: &'a Env, config: &Config) -> Self {
        Self {
            env,
            engine: FheEngineClient::new(env, &config.fhe_engine),
            authority: AttestationAuthorityClient::new(env, &config.authority),
        }
    }

    /// Checks a decryption claim for `handle` and returns the revealed value.
    pub fn check(
        &self,
        handle: &CiphertextHandle,
        cleartexts: &Bytes,
        decryption_proof: &Bytes,
    ) -> Result<u32, ContractError> {
        let mut batch = Vec::new(self.env);
        batch.push_back(self.engine.to_bytes(handle));

        match self
            .authority
            .try_check_proof(&batch, cleartexts, decryption_proof)
        {
            Ok(Ok(true)) => {}
            _ => {
                log!(self.env, "decryption proof rejected", handle.clone());
                return Err(ContractError::ProofRejected);
            }
        }

        decode_cleartext(cleartexts)
    }

    /// Verifies a claim against a stored record and commits the plaintext.
    pub fn verify_record(
        &self,
        store: &RecordStore,
        claimant: &Address,
        id: &String,
        cleartexts: &Bytes,
        decryption_proof: &Bytes,
    ) -> Result<SensorRecord, ContractError> {
        let record = store.get(id)?;
        if record.verified {
            return Err(ContractError::AlreadyVerified);
        }

        let value = self.check(&record.ciphertext_handle, cleartexts, decryption_proof)?;
        let record = store.mark_verified(record, value)?;

        events::publish_decryption_verified(self.env, id.clone(), value, claimant.clone());
        Ok(record)
    }
}

/// Decodes one ABI-encoded `uint32`: a 32-byte big-endian word whose upper
/// 28 bytes are zero.
pub fn decode_cleartext(cleartexts: &Bytes) -> Result<u32, ContractError> {
    if cleartexts.len() != CLEARTEXT_LEN {
        return Err(ContractError::MalformedPlaintext);
    }
    let mut word = [0u8; CLEARTEXT_LEN as usize];
    cleartexts.copy_into_slice(&mut word);

    if word[..28].iter().any(|b| *b != 0) {
        return Err(ContractError::MalformedPlaintext);
    }
    let mut value = [0u8; 4];
    value.copy_from_slice(&word[28..]);
    Ok(u32::from_be_bytes(value))
}
