//! Stand-ins for the external FHE collaborators of the sensor-records contract.
//!
//! - [`MockFheEngine`] keeps plaintext `u32` values behind opaque 32-byte
//!   handles and performs homomorphic addition as wrapping integer addition.
//! - [`MockAttestationAuthority`] accepts a decryption claim when the proof is
//!   the expected digest of the batch and the cleartexts match what the engine
//!   holds for every handle.
//!
//! The free functions ([`encrypt_input`], [`encode_cleartext`],
//! [`sign_decryption`]) build the byte strings a real client SDK would produce.

#![no_std]

pub mod authority;
pub mod engine;


pub use authority::{
    sign_decryption, sign_handle_decryption, AuthorityMode, MockAttestationAuthority,
    MockAttestationAuthorityClient,
};
pub use engine::{encrypt_input, MockFheEngine, MockFheEngineClient};

use soroban_sdk::{contracterror, Bytes, Env};

/// Width of one ABI-encoded cleartext word.
pub const WORD_LEN: u32 = 32;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MockError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    MalformedCiphertext = 200,
    InvalidInputProof = 201,
    UnknownHandle = 202,
}

/// ABI-encodes `value` as a single 32-byte big-endian word.
pub fn encode_cleartext(env: &Env, value: u32) -> Bytes {
    let mut word = [0u8; WORD_LEN as usize];
    word[28..].copy_from_slice(&value.to_be_bytes());
    Bytes::from_array(env, &word)
}
