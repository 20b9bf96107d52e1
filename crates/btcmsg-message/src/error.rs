/// Error types for message signing and verification.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// A decoding, key parsing or curve arithmetic step failed.
    #[error("{0}")]
    Primitives(#[from] btcmsg_primitives::PrimitivesError),
    /// The key recovered from the signature hashes to a different address.
    #[error("address mismatch: recovered {recovered}, expected {expected}")]
    AddressMismatch {
        /// Address derived from the recovered public key.
        recovered: String,
        /// Address the caller claimed signed the message.
        expected: String,
    },
    /// A freshly produced signature did not verify against its own key.
    #[error("unable to sign: signature failed self-verification")]
    UnableToSign,
    /// None of the four recovery ids reproduced the signer's address.
    #[error("unable to construct a recoverable key from the signature")]
    UnableToConstructRecoverableKey,
    /// The configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}
