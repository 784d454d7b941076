//! Capability interfaces of the two external collaborators.
//!
//! Neither is implemented here. The contract only holds their addresses
//! (see [`crate::types::Config`]) and calls them through the generated
//! clients.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env, Vec};

/// The homomorphic engine that owns every ciphertext.
#[contractclient(name = "FheEngineClient")]
pub trait FheEngine {
    /// Verifies `input_proof` and returns a handle for a `u32` ciphertext.
    fn ingest(env: Env, ciphertext: Bytes, input_proof: Bytes) -> BytesN<32>;

    /// Handle of an encryption of zero.
    fn zero(env: Env) -> BytesN<32>;

    /// Handle of the encrypted sum of `lhs` and `rhs`.
    fn add(env: Env, lhs: BytesN<32>, rhs: BytesN<32>) -> BytesN<32>;

    /// Lets `account` use `handle` in later computations.
    fn allow(env: Env, handle: BytesN<32>, account: Address);

    /// Lets anyone request a decryption of `handle`.
    fn allow_public_decrypt(env: Env, handle: BytesN<32>);

    /// Canonical byte form of a handle, as signed over by the authority.
    fn to_bytes(env: Env, handle: BytesN<32>) -> Bytes;
}

/// The authority that attests to decryptions under the network key.
#[contractclient(name = "AttestationAuthorityClient")]
pub trait AttestationAuthority {
    /// `true` when `decryption_proof` proves that decrypting `handles`
    /// yields exactly `cleartexts`.
    fn check_proof(
        env: Env,
        handles: Vec<Bytes>,
        cleartexts: Bytes,
        decryption_proof: Bytes,
    ) -> bool;
}
