use soroban_sdk::Bytes;

use crate::{ConfidentialClient, Error};

/// Cleartexts for a single boolean: one 32-byte big-endian word.
const WORD_LEN: u32 = 32;

/// Ask the service whether `cleartexts` is its genuine decryption for
/// `request_id`. Only the service can produce a proof that passes.
pub fn authenticate(
    service: &ConfidentialClient,
    request_id: u64,
    cleartexts: &Bytes,
    proof: &Bytes,
) -> bool {
    service.verify_decryption(&request_id, cleartexts, proof)
}

/// Decode the ABI-encoded boolean: 31 zero bytes then 0x00 or 0x01.
pub fn decode_bool(cleartexts: &Bytes) -> Result<bool, Error> {
    if cleartexts.len() != WORD_LEN {
        return Err(Error::MalformedCleartext);
    }
    for i in 0..WORD_LEN - 1 {
        if cleartexts.get(i) != Some(0) {
            return Err(Error::MalformedCleartext);
        }
    }
    match cleartexts.get(WORD_LEN - 1) {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(Error::MalformedCleartext),
    }
}
