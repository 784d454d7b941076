use soroban_sdk::{contracttype, Address, BytesN, String};

/// Opaque reference to an encrypted `u32`, minted by the FHE engine.
pub type CiphertextHandle = BytesN<32>;

/// One sensor reading, encrypted at rest and revealed at most once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SensorRecord {
    pub id: String,
    pub ciphertext_handle: CiphertextHandle,
    /// Stored verbatim, never interpreted.
    pub location_hash: BytesN<32>,
    pub created_at: u64,
    pub creator: Address,
    /// Zero until `verified` is set; readers must ignore it before then.
    pub plaintext_value: u32,
    pub verified: bool,
    pub verified_at: u64,
}

/// Who may submit decryption claims.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationPolicy {
    /// Any address may reveal any record.
    Permissionless,
    /// Only addresses in the oracle set may reveal records.
    OracleOnly,
}

/// Deployment configuration kept in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub fhe_engine: Address,
    pub authority: Address,
    pub policy: VerificationPolicy,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Config,
    RecordCount,
    EventCount,
    Record(String),
    RecordAt(u32),
    Oracle(Address),
    Event(u64),
}
