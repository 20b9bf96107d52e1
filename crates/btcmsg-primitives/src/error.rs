/// Unified error type for all primitives operations.
///
/// Covers errors from field arithmetic, curve operations, key parsing,
/// signature decoding, and the text encodings that feed them.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("bad signature length: expected 65 bytes, got {0}")]
    BadSignatureLength(usize),

    #[error("bad first byte of signature: {0} is not in [27, 34]")]
    BadFirstByte(u8),

    #[error("checksum mismatch")]
    ChecksumInvalid,

    #[error("unsupported wallet version: expected {expected:#04x}, got {got:#04x}")]
    UnsupportedWalletVersion { expected: u8, got: u8 },

    #[error("unknown wallet format")]
    UnknownWalletFormat,

    #[error("no square root exists for the given element")]
    NoSquareRoot,

    #[error("no modular inverse exists")]
    NoInverse,

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}

impl From<base64::DecodeError> for PrimitivesError {
    fn from(e: base64::DecodeError) -> Self {
        PrimitivesError::InvalidBase64(e.to_string())
    }
}
