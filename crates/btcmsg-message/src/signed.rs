//! Signing and verifying Bitcoin signed messages.
//!
//! A signature is a base64 compact signature over the magic digest of the
//! message. Verification never needs the public key: it is recovered from
//! the signature, hashed into an address and compared with the address the
//! caller claims signed the message.

use log::{debug, trace};

use btcmsg_primitives::address::Address;
use btcmsg_primitives::ec::{CompactSignature, PrivateKey};
use btcmsg_primitives::keyformat::decode_private_key_for_version;

use crate::config::{CompressionPolicy, MessageConfig};
use crate::digest::magic_hash;
use crate::MessageError;

/// Signs and verifies messages under a fixed [`MessageConfig`].
///
/// Holds nothing but its configuration, so it can be shared freely
/// between threads.
#[derive(Clone, Debug, Default)]
pub struct MessageSigner {
    config: MessageConfig,
}

impl MessageSigner {
    /// Create a signer with the given configuration.
    pub fn new(config: MessageConfig) -> Self {
        MessageSigner { config }
    }

    /// The configuration this signer was built with.
    pub fn config(&self) -> &MessageConfig {
        &self.config
    }

    /// The 32-byte digest signed for `message`.
    pub fn digest(&self, message: &[u8]) -> [u8; 32] {
        magic_hash(message, self.config.length_encoding)
    }

    /// Sign a message with a private key in any supported wallet format.
    ///
    /// The signature is checked against the signer's public key, then each
    /// recovery id is tried in turn until one verifies against the
    /// signer's own address.
    ///
    /// # Arguments
    /// * `private_key` - WIF, compressed WIF, mini key, hex or base64 text.
    /// * `message` - The message bytes.
    ///
    /// # Returns
    /// The base64 compact signature, or the first error encountered.
    pub fn sign_strict(&self, private_key: &str, message: &[u8]) -> Result<String, MessageError> {
        let decoded = decode_private_key_for_version(private_key, self.config.network.wif_version())?;
        let compressed = match self.config.compression {
            CompressionPolicy::Never => false,
            CompressionPolicy::FromWalletFormat => decoded.format().is_compressed(),
        };
        let key = PrivateKey::from_decoded(&decoded)?.with_compressed(compressed);
        drop(decoded);

        let hash = self.digest(message);
        let signature = key.sign(&hash, self.config.nonce)?;
        let pub_key = key.pub_key();
        if !pub_key.verify(&hash, &signature) {
            return Err(MessageError::UnableToSign);
        }

        let address = pub_key
            .to_address(self.config.network.address_version())
            .to_string();
        (0..4u8)
            .find_map(|recovery_id| {
                let compact = CompactSignature::new(signature.clone(), recovery_id, compressed).ok()?;
                let encoded = compact.to_base64();
                match self.verify_strict(&address, &encoded, message) {
                    Ok(()) => Some(encoded),
                    Err(e) => {
                        trace!("header {} does not recover the signer: {}", compact.header(), e);
                        None
                    }
                }
            })
            .ok_or(MessageError::UnableToConstructRecoverableKey)
    }

    /// Sign a message, returning `None` on any failure.
    pub fn sign(&self, private_key: &str, message: &[u8]) -> Option<String> {
        match self.sign_strict(private_key, message) {
            Ok(signature) => Some(signature),
            Err(e) => {
                debug!("signing failed: {}", e);
                None
            }
        }
    }

    /// Verify a base64 compact signature against a claimed address.
    ///
    /// The version byte of `address` picks the version of the recomputed
    /// address, and the signature's header picks its compression, so the
    /// result does not depend on this signer's configured network.
    ///
    /// # Returns
    /// `Ok(())` when the recovered key hashes to `address`, otherwise the
    /// specific failure, with `AddressMismatch` naming both addresses.
    pub fn verify_strict(
        &self,
        address: &str,
        signature: &str,
        message: &[u8],
    ) -> Result<(), MessageError> {
        let claimed = Address::from_string(address)?;
        let hash = self.digest(message);
        let compact = CompactSignature::from_base64(signature)?;
        let pub_key = compact.recover_public_key(&hash)?;

        let recovered = pub_key.to_address(claimed.version());
        if recovered != claimed {
            return Err(MessageError::AddressMismatch {
                recovered: recovered.to_string(),
                expected: address.to_string(),
            });
        }
        Ok(())
    }

    /// Verify a signature, returning `false` on any failure.
    pub fn verify(&self, address: &str, signature: &str, message: &[u8]) -> bool {
        match self.verify_strict(address, signature, message) {
            Ok(()) => true,
            Err(e) => {
                debug!("verification failed: {}", e);
                false
            }
        }
    }
}

/// Sign `message` with the default configuration, or return `None`.
pub fn sign_message(private_key: &str, message: &[u8]) -> Option<String> {
    MessageSigner::default().sign(private_key, message)
}

/// Sign `message` with the default configuration.
pub fn sign_message_strict(private_key: &str, message: &[u8]) -> Result<String, MessageError> {
    MessageSigner::default().sign_strict(private_key, message)
}

/// Check that `address` signed `message`; `false` on any failure.
pub fn verify_message(address: &str, signature: &str, message: &[u8]) -> bool {
    MessageSigner::default().verify(address, signature, message)
}

/// Check that `address` signed `message`, reporting why not.
pub fn verify_message_strict(
    address: &str,
    signature: &str,
    message: &[u8],
) -> Result<(), MessageError> {
    MessageSigner::default().verify_strict(address, signature, message)
}
