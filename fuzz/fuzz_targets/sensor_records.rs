#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use fhe_mock::{
    encode_cleartext, encrypt_input, sign_handle_decryption, MockAttestationAuthority,
    MockAttestationAuthorityClient, MockFheEngine,
};
use libfuzzer_sys::fuzz_target;
use sensor_records::{SensorRecordsContract, SensorRecordsContractClient, VerificationPolicy};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Bytes, BytesN, Env, String, Vec,
};

/// Actions over a pool of eight ids, plus raw inputs that must be rejected
/// cleanly rather than trap.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Create { id: u8, value: u32 },
    CreateRaw { id: std::string::String, ciphertext: std::vec::Vec<u8>, proof: std::vec::Vec<u8> },
    Claim { id: u8, claimed: u32 },
    ClaimRaw { id: u8, cleartexts: std::vec::Vec<u8>, proof: std::vec::Vec<u8> },
    Aggregate { ids: std::vec::Vec<u8> },
    Pause,
    Unpause,
    AdvanceTime { delta: u16 },
}

fn pool_id(env: &Env, id: u8) -> String {
    String::from_str(env, &format!("sensor-{}", id % 8))
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let engine_id = env.register(MockFheEngine, ());
    let authority_id = env.register(MockAttestationAuthority, ());
    MockAttestationAuthorityClient::new(&env, &authority_id).initialize(&engine_id);

    let contract_id = env.register(SensorRecordsContract, ());
    let client = SensorRecordsContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    let sensor = Address::generate(&env);
    client.initialize(&admin, &engine_id, &authority_id, &VerificationPolicy::Permissionless);

    let location = BytesN::from_array(&env, &[0u8; 32]);
    // Plaintexts of successfully created records, and of verified ones.
    let mut created: BTreeMap<u8, u32> = BTreeMap::new();
    let mut revealed: BTreeMap<u8, u32> = BTreeMap::new();

    for action in actions.into_iter().take(64) {
        match action {
            FuzzAction::Create { id, value } => {
                let (ct, proof) = encrypt_input(&env, value);
                let key = pool_id(&env, id);
                let res = client.try_create_record(&sensor, &key, &ct, &proof, &location);
                if res.is_ok() {
                    assert!(created.insert(id % 8, value).is_none(), "duplicate id accepted");
                }
            }
            FuzzAction::CreateRaw { id, ciphertext, proof } => {
                let id = String::from_str(&env, &id);
                let before = client.get_record_count();
                let res = client.try_create_record(
                    &sensor,
                    &id,
                    &Bytes::from_slice(&env, &ciphertext),
                    &Bytes::from_slice(&env, &proof),
                    &location,
                );
                assert!(res.is_err(), "unproven ciphertext accepted");
                assert_eq!(client.get_record_count(), before, "failed create wrote state");
            }
            FuzzAction::Claim { id, claimed } => {
                let key = pool_id(&env, id);
                let Ok(Ok(record)) = client.try_get_record(&key) else {
                    continue;
                };
                let cleartext = encode_cleartext(&env, claimed);
                let proof = sign_handle_decryption(&env, &record.ciphertext_handle, &cleartext);
                if client
                    .try_submit_decryption_claim(&sensor, &key, &cleartext, &proof)
                    .is_ok()
                {
                    assert_eq!(created.get(&(id % 8)), Some(&claimed), "wrong plaintext accepted");
                    assert!(revealed.insert(id % 8, claimed).is_none(), "record verified twice");
                }
            }
            FuzzAction::ClaimRaw { id, cleartexts, proof } => {
                let res = client.try_submit_decryption_claim(
                    &sensor,
                    &pool_id(&env, id),
                    &Bytes::from_slice(&env, &cleartexts),
                    &Bytes::from_slice(&env, &proof),
                );
                assert!(res.is_err(), "unsigned claim accepted");
            }
            FuzzAction::Aggregate { ids } => {
                let mut list = Vec::new(&env);
                for id in ids.iter().take(8) {
                    list.push_back(pool_id(&env, *id));
                }
                let res = client.try_aggregate(&list);
                let all_known = !list.is_empty()
                    && ids.iter().take(8).all(|id| created.contains_key(&(id % 8)));
                assert_eq!(res.is_ok(), all_known, "aggregate outcome disagrees with store");
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&admin);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&admin);
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        let ids = client.list_record_ids();
        assert_eq!(
            ids.len(),
            client.get_record_count(),
            "INVARIANT VIOLATION: index/count mismatch"
        );
        for (slot, value) in &revealed {
            let record = client.get_record(&pool_id(&env, *slot));
            assert!(record.verified, "INVARIANT VIOLATION: verification reverted");
            assert_eq!(record.plaintext_value, *value, "INVARIANT VIOLATION: plaintext changed");
        }
    }
});
