//! Signer configuration.
//!
//! Every field has a default, so `{}` is a complete configuration:
//!
//! ```json
//! {
//!   "network": "mainnet",
//!   "nonce": "deterministic",
//!   "length_encoding": "var_int",
//!   "compression": "never"
//! }
//! ```

use serde::{Deserialize, Serialize};

use btcmsg_primitives::ec::NonceStrategy;
use btcmsg_primitives::network::Network;

use crate::MessageError;

/// How the message length is written into the signed digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthEncoding {
    /// CompactSize varint, as Bitcoin Core writes it.
    #[default]
    VarInt,
    /// One byte holding the low 8 bits of the length. Messages longer than
    /// 255 bytes hash differently from every other implementation.
    SingleByte,
}

/// Whether keys imported as compressed WIF sign with compressed headers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionPolicy {
    /// Always sign for the uncompressed address (headers 27 to 30).
    #[default]
    Never,
    /// Compressed WIF keys sign for their compressed address (headers 31 to 34).
    FromWalletFormat,
}

/// Settings for a [`crate::MessageSigner`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessageConfig {
    /// Network whose WIF version keys must carry and whose address version
    /// the signer probes against.
    pub network: Network,
    /// Source of ECDSA nonces.
    pub nonce: NonceStrategy,
    /// Message length prefix inside the digest.
    pub length_encoding: LengthEncoding,
    /// Compression of the signing key.
    pub compression: CompressionPolicy,
}

impl MessageConfig {
    /// Parse a configuration from JSON, filling absent fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, MessageError> {
        serde_json::from_str(json).map_err(|e| MessageError::Config(e.to_string()))
    }

    /// Serialize the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, MessageError> {
        serde_json::to_string_pretty(self).map_err(|e| MessageError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = MessageConfig::from_json("{}").unwrap();
        assert_eq!(config, MessageConfig::default());
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.nonce, NonceStrategy::Deterministic);
        assert_eq!(config.length_encoding, LengthEncoding::VarInt);
        assert_eq!(config.compression, CompressionPolicy::Never);
    }

    #[test]
    fn test_full_json() {
        let config = MessageConfig::from_json(
            r#"{
                "network": "testnet",
                "nonce": "random",
                "length_encoding": "single_byte",
                "compression": "from_wallet_format"
            }"#,
        )
        .unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.nonce, NonceStrategy::Random);
        assert_eq!(config.length_encoding, LengthEncoding::SingleByte);
        assert_eq!(config.compression, CompressionPolicy::FromWalletFormat);

        let reparsed = MessageConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_partial_json() {
        let config = MessageConfig::from_json(r#"{"length_encoding": "single_byte"}"#).unwrap();
        assert_eq!(config.length_encoding, LengthEncoding::SingleByte);
        assert_eq!(config.network, Network::Mainnet);
    }

    #[test]
    fn test_bad_json() {
        let err = MessageConfig::from_json(r#"{"nonce": "lcg"}"#).unwrap_err();
        assert!(matches!(err, MessageError::Config(_)));

        let err = MessageConfig::from_json(r#"{"netwrok": "mainnet"}"#).unwrap_err();
        let err_str = err.to_string();
        assert!(err_str.contains("netwrok"), "unexpected error: {}", err_str);
    }
}
