use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Bytes, BytesN, Env, Symbol,
};

use crate::MockError;

const NONCE: Symbol = symbol_short!("NONCE");
const VALUE: Symbol = symbol_short!("VALUE");
const PUBLIC: Symbol = symbol_short!("PUBDEC");
const ACL: Symbol = symbol_short!("ACL");

const INPUT_DOMAIN: &[u8] = b"mock-fhe/input/v1";

/// Builds `(ciphertext, input_proof)` for `value` the way a client SDK would.
///
/// The mock "ciphertext" is the big-endian plaintext; the proof binds it to
/// the input domain with SHA-256.
pub fn encrypt_input(env: &Env, value: u32) -> (Bytes, Bytes) {
    let ciphertext = Bytes::from_array(env, &value.to_be_bytes());
    let proof = input_digest(env, &ciphertext);
    (ciphertext, proof)
}

fn input_digest(env: &Env, ciphertext: &Bytes) -> Bytes {
    let mut data = Bytes::from_slice(env, INPUT_DOMAIN);
    data.append(ciphertext);
    let digest: BytesN<32> = env.crypto().sha256(&data).into();
    Bytes::from_array(env, &digest.to_array())
}

#[contract]
pub struct MockFheEngine;

#[contractimpl]
impl MockFheEngine {
    /// Verifies the input proof and returns a fresh handle for the value.
    pub fn ingest(
        env: Env,
        ciphertext: Bytes,
        input_proof: Bytes,
    ) -> Result<BytesN<32>, MockError> {
        if ciphertext.len() != 4 {
            return Err(MockError::MalformedCiphertext);
        }
        if input_proof != input_digest(&env, &ciphertext) {
            return Err(MockError::InvalidInputProof);
        }
        let mut raw = [0u8; 4];
        ciphertext.copy_into_slice(&mut raw);
        Ok(Self::store_value(&env, u32::from_be_bytes(raw)))
    }

    /// Trivial encryption of zero.
    pub fn zero(env: Env) -> BytesN<32> {
        Self::store_value(&env, 0)
    }

    /// Homomorphic addition; `euint32` arithmetic wraps on overflow.
    pub fn add(env: Env, lhs: BytesN<32>, rhs: BytesN<32>) -> Result<BytesN<32>, MockError> {
        let a = Self::value_of(&env, &lhs)?;
        let b = Self::value_of(&env, &rhs)?;
        Ok(Self::store_value(&env, a.wrapping_add(b)))
    }

    pub fn allow(env: Env, handle: BytesN<32>, account: Address) -> Result<(), MockError> {
        Self::value_of(&env, &handle)?;
        env.storage().persistent().set(&(ACL, handle, account), &true);
        Ok(())
    }

    pub fn allow_public_decrypt(env: Env, handle: BytesN<32>) -> Result<(), MockError> {
        Self::value_of(&env, &handle)?;
        env.storage().persistent().set(&(PUBLIC, handle), &true);
        Ok(())
    }

    pub fn to_bytes(env: Env, handle: BytesN<32>) -> Bytes {
        Bytes::from_array(&env, &handle.to_array())
    }

    pub fn is_allowed(env: Env, handle: BytesN<32>, account: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(ACL, handle, account))
            .unwrap_or(false)
    }

    pub fn is_public(env: Env, handle: BytesN<32>) -> bool {
        env.storage()
            .persistent()
            .get(&(PUBLIC, handle))
            .unwrap_or(false)
    }

    /// Plaintext behind a handle. Only the mock authority and tests call this.
    pub fn reveal(env: Env, handle: BytesN<32>) -> Result<u32, MockError> {
        Self::value_of(&env, &handle)
    }

    /// Number of handles minted so far.
    pub fn handle_count(env: Env) -> u64 {
        env.storage().instance().get(&NONCE).unwrap_or(0)
    }

    fn store_value(env: &Env, value: u32) -> BytesN<32> {
        let nonce: u64 = env.storage().instance().get(&NONCE).unwrap_or(0);
        env.storage().instance().set(&NONCE, &nonce.wrapping_add(1));

        let mut seed = Bytes::from_slice(env, b"mock-fhe/handle/v1");
        seed.extend_from_array(&nonce.to_be_bytes());
        let handle: BytesN<32> = env.crypto().sha256(&seed).into();

        env.storage().persistent().set(&(VALUE, handle.clone()), &value);
        handle
    }

    fn value_of(env: &Env, handle: &BytesN<32>) -> Result<u32, MockError> {
        env.storage()
            .persistent()
            .get(&(VALUE, handle.clone()))
            .ok_or(MockError::UnknownHandle)
    }
}
