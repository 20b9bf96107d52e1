//! Pay-to-public-key-hash addresses.
//!
//! An address is Base58Check over `version || hash160(pubkey)`. Only the
//! version byte and the 20-byte hash are kept; the string form is
//! recomputed on demand.

use std::fmt;
use std::str::FromStr;

use crate::base58;
use crate::network::Network;
use crate::PrimitivesError;

const PAYLOAD_LEN: usize = 21;

/// A decoded P2PKH address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    version: u8,
    hash: [u8; 20],
}

impl Address {
    /// Build an address from a version byte and a public key hash.
    pub fn new(version: u8, hash: [u8; 20]) -> Self {
        Address { version, hash }
    }

    /// Parse a Base58Check address string.
    ///
    /// Any version byte is accepted; callers that care about the network
    /// inspect [`Address::network`].
    ///
    /// # Returns
    /// `InvalidBase58` or `ChecksumInvalid` from the Base58Check layer, and
    /// `InvalidAddress` when the payload is not 21 bytes.
    pub fn from_string(s: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(s)?;
        if payload.len() != PAYLOAD_LEN {
            return Err(PrimitivesError::InvalidAddress(format!(
                "expected {} byte payload, got {}",
                PAYLOAD_LEN,
                payload.len()
            )));
        }
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);
        Ok(Address { version: payload[0], hash })
    }

    /// The network version byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The Hash160 of the serialized public key.
    pub fn hash(&self) -> &[u8; 20] {
        &self.hash
    }

    /// The known network for this version byte, if any.
    pub fn network(&self) -> Option<Network> {
        Network::from_address_version(self.version)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[0] = self.version;
        payload[1..].copy_from_slice(&self.hash);
        f.write_str(&base58::check_encode(&payload))
    }
}

impl FromStr for Address {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}
