//! Legacy wallet private key formats.
//!
//! A key string is matched against an ordered table of classifiers:
//! WIF, compressed WIF, mini private key, raw hex, raw base64. The first
//! classifier whose predicate accepts the input decodes it; the order is
//! part of the public contract so overlapping inputs resolve the same way
//! everywhere.

use std::fmt;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, trace};
use regex::Regex;
use zeroize::Zeroize;

use crate::base58;
use crate::ec::private_key::WIF_COMPRESSED_MARKER;
use crate::hash::sha256;
use crate::network::Network;
use crate::PrimitivesError;

static WIF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{51}$").unwrap());

static COMPRESSED_WIF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{52}$").unwrap());

// 22, 26 or 30 characters
static MINI_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^S[1-9A-HJ-NP-Za-km-z]{21}(?:[1-9A-HJ-NP-Za-km-z]{4}){0,2}$").unwrap()
});

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{64}$").unwrap());

static BASE64_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]{43}=$").unwrap());

/// The textual encodings a private key can be imported from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalletFormat {
    /// Base58Check of `0x80 || scalar`.
    Wif,
    /// Base58Check of `0x80 || scalar || 0x01`.
    CompressedWif,
    /// Casascius mini private key, scalar = SHA-256 of the string.
    MiniKey,
    /// 64 hex digits.
    Hex,
    /// 32 bytes in padded standard base64.
    Base64,
}

impl WalletFormat {
    /// Whether keys imported from this format derive compressed public keys.
    pub fn is_compressed(&self) -> bool {
        matches!(self, WalletFormat::CompressedWif)
    }
}

impl fmt::Display for WalletFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WalletFormat::Wif => "wif",
            WalletFormat::CompressedWif => "compressed wif",
            WalletFormat::MiniKey => "mini key",
            WalletFormat::Hex => "hex",
            WalletFormat::Base64 => "base64",
        };
        f.write_str(name)
    }
}

type Predicate = fn(&str) -> bool;
type Decoder = fn(&str, u8) -> Result<[u8; 32], PrimitivesError>;

/// Classifiers in priority order.
const CLASSIFIERS: [(WalletFormat, Predicate, Decoder); 5] = [
    (WalletFormat::Wif, is_wif, decode_wif),
    (WalletFormat::CompressedWif, is_compressed_wif, decode_compressed_wif),
    (WalletFormat::MiniKey, is_mini_key, decode_mini_key),
    (WalletFormat::Hex, is_hex, decode_hex),
    (WalletFormat::Base64, is_base64, decode_base64),
];

/// A private key scalar together with the format it was read from.
pub struct DecodedKey {
    format: WalletFormat,
    scalar: [u8; 32],
}

impl DecodedKey {
    /// The wallet format the key was read from.
    pub fn format(&self) -> WalletFormat {
        self.format
    }

    /// The raw 32-byte big-endian scalar, not yet reduced mod n.
    pub fn scalar(&self) -> &[u8; 32] {
        &self.scalar
    }
}

impl fmt::Debug for DecodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedKey")
            .field("format", &self.format)
            .field("scalar", &"<redacted>")
            .finish()
    }
}

impl Drop for DecodedKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

/// The first format whose predicate accepts `text`, if any.
pub fn classify(text: &str) -> Option<WalletFormat> {
    CLASSIFIERS
        .iter()
        .find(|(_, accepts, _)| accepts(text))
        .map(|(format, _, _)| *format)
}

/// Every format whose predicate accepts `text`, in priority order.
pub fn matching_formats(text: &str) -> Vec<WalletFormat> {
    CLASSIFIERS
        .iter()
        .filter(|(_, accepts, _)| accepts(text))
        .map(|(format, _, _)| *format)
        .collect()
}

/// Decode a private key in any supported format, expecting mainnet WIF.
pub fn decode_private_key(text: &str) -> Result<DecodedKey, PrimitivesError> {
    decode_private_key_for_version(text, Network::Mainnet.wif_version())
}

/// Decode a private key in any supported format.
///
/// # Arguments
/// * `text` - The encoded key; surrounding whitespace is ignored.
/// * `wif_version` - Version byte WIF inputs must carry.
///
/// # Returns
/// The scalar and its format, `UnknownWalletFormat` when no classifier
/// accepts the input, or the chosen decoder's error.
pub fn decode_private_key_for_version(
    text: &str,
    wif_version: u8,
) -> Result<DecodedKey, PrimitivesError> {
    let text = text.trim();
    for (format, accepts, decode) in CLASSIFIERS.iter() {
        if !accepts(text) {
            trace!("private key is not {}", format);
            continue;
        }
        let scalar = decode(text, wif_version)?;
        debug!("decoded private key as {}", format);
        return Ok(DecodedKey { format: *format, scalar });
    }
    debug!("private key matched no wallet format");
    Err(PrimitivesError::UnknownWalletFormat)
}

/// Validate a Base58-decoded WIF (payload plus checksum) and extract the scalar.
///
/// Checks run in order: total length, checksum, version byte, compression
/// marker.
pub(crate) fn wif_scalar(
    decoded: &[u8],
    compressed: bool,
    version: u8,
) -> Result<[u8; 32], PrimitivesError> {
    let payload_len = if compressed { 34 } else { 33 };
    if decoded.len() != payload_len + base58::CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidWif(format!(
            "expected {} bytes, got {}",
            payload_len + base58::CHECKSUM_LEN,
            decoded.len()
        )));
    }
    let payload = base58::split_checked(decoded)?;
    if payload[0] != version {
        return Err(PrimitivesError::UnsupportedWalletVersion {
            expected: version,
            got: payload[0],
        });
    }
    if compressed && payload[33] != WIF_COMPRESSED_MARKER {
        return Err(PrimitivesError::InvalidWif(format!(
            "compression marker is {:#04x}",
            payload[33]
        )));
    }
    let mut scalar = [0u8; 32];
    scalar.copy_from_slice(&payload[1..33]);
    Ok(scalar)
}

fn is_wif(text: &str) -> bool {
    WIF_RE.is_match(text)
}

fn is_compressed_wif(text: &str) -> bool {
    COMPRESSED_WIF_RE.is_match(text)
}

fn is_mini_key(text: &str) -> bool {
    if !MINI_KEY_RE.is_match(text) {
        return false;
    }
    let check = sha256(format!("{}?", text).as_bytes());
    check[0] <= 0x01
}

fn is_hex(text: &str) -> bool {
    HEX_RE.is_match(text)
}

fn is_base64(text: &str) -> bool {
    BASE64_RE.is_match(text)
}

fn decode_wif_with(text: &str, compressed: bool, version: u8) -> Result<[u8; 32], PrimitivesError> {
    let mut decoded = base58::decode(text)?;
    let scalar = wif_scalar(&decoded, compressed, version);
    decoded.zeroize();
    scalar
}

fn decode_wif(text: &str, version: u8) -> Result<[u8; 32], PrimitivesError> {
    decode_wif_with(text, false, version)
}

fn decode_compressed_wif(text: &str, version: u8) -> Result<[u8; 32], PrimitivesError> {
    decode_wif_with(text, true, version)
}

fn decode_mini_key(text: &str, _version: u8) -> Result<[u8; 32], PrimitivesError> {
    Ok(sha256(text.as_bytes()))
}

fn decode_hex(text: &str, _version: u8) -> Result<[u8; 32], PrimitivesError> {
    let mut scalar = [0u8; 32];
    hex::decode_to_slice(text, &mut scalar)?;
    Ok(scalar)
}

fn decode_base64(text: &str, _version: u8) -> Result<[u8; 32], PrimitivesError> {
    let mut bytes = STANDARD.decode(text)?;
    if bytes.len() != 32 {
        let got = bytes.len();
        bytes.zeroize();
        return Err(PrimitivesError::InvalidKeyLength { expected: 32, got });
    }
    let mut scalar = [0u8; 32];
    scalar.copy_from_slice(&bytes);
    bytes.zeroize();
    Ok(scalar)
}
