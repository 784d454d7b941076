use soroban_sdk::String;

use crate::errors::ContractError;

/// Longest identifier accepted, in bytes.
pub const MAX_ID_LEN: u32 = 64;

/// Largest page `list_record_ids_page` and `get_events` will return.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Validate a record identifier.
/// Any UTF-8 content is accepted, including the empty string; only the
/// length is bounded since the id is part of a storage key.
pub fn validate_record_id(id: &String) -> Result<(), ContractError> {
    if id.len() > MAX_ID_LEN {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Validate a paging window.
pub fn validate_page(limit: u32) -> Result<(), ContractError> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
