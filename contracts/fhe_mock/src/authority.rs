use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN, Env, Symbol, Vec,
};

use crate::engine::MockFheEngineClient;
use crate::{encode_cleartext, MockError, WORD_LEN};

const ENGINE: Symbol = symbol_short!("ENGINE");
const MODE: Symbol = symbol_short!("MODE");

const DECRYPTION_DOMAIN: &[u8] = b"mock-kms/decryption/v1";

/// How the authority answers `check_proof`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuthorityMode {
    /// Checks the proof digest and the engine plaintexts.
    Strict,
    /// Accepts any claim. Lets tests reach the cleartext decoding path.
    AcceptAll,
    /// Rejects every claim.
    RejectAll,
}

/// Produces the proof the authority expects for `(handles, cleartexts)`.
pub fn sign_decryption(env: &Env, handles: &Vec<Bytes>, cleartexts: &Bytes) -> Bytes {
    let mut data = Bytes::from_slice(env, DECRYPTION_DOMAIN);
    data.extend_from_array(&handles.len().to_be_bytes());
    for handle in handles.iter() {
        data.append(&handle);
    }
    data.append(cleartexts);
    let digest: BytesN<32> = env.crypto().sha256(&data).into();
    Bytes::from_array(env, &digest.to_array())
}

/// Proof for a one-element batch holding `handle`.
pub fn sign_handle_decryption(env: &Env, handle: &BytesN<32>, cleartexts: &Bytes) -> Bytes {
    let mut batch = Vec::new(env);
    batch.push_back(Bytes::from_array(env, &handle.to_array()));
    sign_decryption(env, &batch, cleartexts)
}

#[contract]
pub struct MockAttestationAuthority;

#[contractimpl]
impl MockAttestationAuthority {
    pub fn initialize(env: Env, engine: Address) -> Result<(), MockError> {
        if env.storage().instance().has(&ENGINE) {
            return Err(MockError::AlreadyInitialized);
        }
        env.storage().instance().set(&ENGINE, &engine);
        env.storage().instance().set(&MODE, &AuthorityMode::Strict);
        Ok(())
    }

    pub fn set_mode(env: Env, mode: AuthorityMode) -> Result<(), MockError> {
        if !env.storage().instance().has(&ENGINE) {
            return Err(MockError::NotInitialized);
        }
        env.storage().instance().set(&MODE, &mode);
        Ok(())
    }

    pub fn get_mode(env: Env) -> AuthorityMode {
        env.storage()
            .instance()
            .get(&MODE)
            .unwrap_or(AuthorityMode::Strict)
    }

    /// Attests that decrypting `handles` yields exactly `cleartexts`.
    pub fn check_proof(
        env: Env,
        handles: Vec<Bytes>,
        cleartexts: Bytes,
        decryption_proof: Bytes,
    ) -> bool {
        let engine: Address = match env.storage().instance().get(&ENGINE) {
            Some(engine) => engine,
            None => return false,
        };

        match Self::get_mode(env.clone()) {
            AuthorityMode::AcceptAll => return true,
            AuthorityMode::RejectAll => return false,
            AuthorityMode::Strict => {}
        }

        if handles.is_empty() || decryption_proof != sign_decryption(&env, &handles, &cleartexts) {
            return false;
        }
        if cleartexts.len() != handles.len().saturating_mul(WORD_LEN) {
            return false;
        }

        let engine = MockFheEngineClient::new(&env, &engine);
        for (i, raw) in handles.iter().enumerate() {
            if raw.len() != 32 {
                return false;
            }
            let mut buf = [0u8; 32];
            raw.copy_into_slice(&mut buf);
            let handle = BytesN::from_array(&env, &buf);

            if !engine.is_public(&handle) {
                return false;
            }
            let value = match engine.try_reveal(&handle) {
                Ok(Ok(value)) => value,
                _ => return false,
            };

            let start = (i as u32) * WORD_LEN;
            if cleartexts.slice(start..start + WORD_LEN) != encode_cleartext(&env, value) {
                return false;
            }
        }
        true
    }
}
