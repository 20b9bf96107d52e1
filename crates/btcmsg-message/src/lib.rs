#![deny(missing_docs)]

//! Bitcoin signed messages.
//!
//! Signs a text message with a private key given in any legacy wallet
//! encoding and verifies a base64 compact signature against a claimed
//! P2PKH address by recovering the signer's public key.

mod error;
pub mod config;
pub mod digest;
pub mod signed;

pub use config::{CompressionPolicy, LengthEncoding, MessageConfig};
pub use digest::{magic_hash, MAGIC_PREFIX};
pub use error::MessageError;
pub use signed::{sign_message, sign_message_strict, verify_message, verify_message_strict, MessageSigner};
