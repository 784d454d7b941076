use common::CommonError;

/// Contract error codes.
///
/// Codes below 100 mirror [`CommonError`]; 100 and up belong to the record
/// lifecycle.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    InvalidInput = 30,
    Paused = 40,

    // Record store
    AlreadyExists = 100,
    NotFound = 101,
    InvalidCiphertext = 102,

    // Decryption verifier
    AlreadyVerified = 103,
    ProofRejected = 104,
    MalformedPlaintext = 105,

    // Aggregator
    EmptyInput = 106,
}

impl From<CommonError> for ContractError {
    fn from(error: CommonError) -> Self {
        match error {
            CommonError::NotInitialized => ContractError::NotInitialized,
            CommonError::AlreadyInitialized => ContractError::AlreadyInitialized,
            CommonError::Unauthorized => ContractError::Unauthorized,
            CommonError::InvalidInput => ContractError::InvalidInput,
            CommonError::Paused => ContractError::Paused,
        }
    }
}
