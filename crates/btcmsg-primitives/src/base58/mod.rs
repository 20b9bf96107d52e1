//! Base58 encoding and decoding with optional checksum support.
//!
//! Raw Base58 uses Bitcoin's alphabet through `bs58`. Base58Check appends
//! the first four bytes of SHA-256d(payload) and is the outer layer of WIF
//! private keys and P2PKH addresses.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Length of the Base58Check checksum suffix in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string.
///
/// Leading zero bytes are encoded as leading '1' characters.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).with_alphabet(bs58::Alphabet::BITCOIN).into_string()
}

/// Decode a Base58 string to a byte vector.
///
/// Leading '1' characters decode to leading zero bytes.
///
/// # Returns
/// `Ok(Vec<u8>)` on success, or an error for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Compute the 4-byte Base58Check checksum of a payload.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256d(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Encode a byte slice with a 4-byte double-SHA-256 checksum appended (Base58Check).
///
/// # Arguments
/// * `data` - The bytes to encode (typically version byte + payload).
///
/// # Returns
/// `encode(data || checksum(data))`.
pub fn check_encode(data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum(data));
    encode(&payload)
}

/// Decode a Base58Check string, verifying the 4-byte checksum.
///
/// # Returns
/// The payload without its checksum, `InvalidBase58` for bad characters or
/// short input, or `ChecksumInvalid` when the checksum does not match.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let decoded = decode(s)?;
    split_checked(&decoded).map(<[u8]>::to_vec)
}

/// Split raw decoded Base58Check bytes into the payload after validating
/// the trailing checksum.
pub fn split_checked(decoded: &[u8]) -> Result<&[u8], PrimitivesError> {
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let (payload, sum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    if sum != checksum(payload) {
        return Err(PrimitivesError::ChecksumInvalid);
    }
    Ok(payload)
}
