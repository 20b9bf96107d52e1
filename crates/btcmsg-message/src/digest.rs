//! The digest a signed message commits to.

use btcmsg_primitives::hash::sha256d;
use btcmsg_primitives::util::VarInt;

use crate::config::LengthEncoding;

/// `0x18 || "Bitcoin Signed Message:\n"`: the prefix length byte and text.
pub const MAGIC_PREFIX: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// Compute `SHA256d(MAGIC_PREFIX || length || message)`.
///
/// # Arguments
/// * `message` - The raw message bytes.
/// * `encoding` - How `length` is written.
///
/// # Returns
/// The 32-byte digest that gets signed.
pub fn magic_hash(message: &[u8], encoding: LengthEncoding) -> [u8; 32] {
    let mut buf = Vec::with_capacity(MAGIC_PREFIX.len() + 9 + message.len());
    buf.extend_from_slice(MAGIC_PREFIX);
    match encoding {
        LengthEncoding::VarInt => buf.extend_from_slice(&VarInt::from(message.len()).to_bytes()),
        // truncates above 255
        LengthEncoding::SingleByte => buf.push(message.len() as u8),
    }
    buf.extend_from_slice(message);
    sha256d(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_bytes() {
        assert_eq!(MAGIC_PREFIX.len(), 25);
        assert_eq!(MAGIC_PREFIX[0] as usize, MAGIC_PREFIX.len() - 1);
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            hex::encode(magic_hash(b"Hello, world", LengthEncoding::VarInt)),
            "03af9d9c64df11d97b123ce04749096404323b86a3b5ecca2f57cf637ecb97ca"
        );
        assert_eq!(
            hex::encode(magic_hash(b"", LengthEncoding::VarInt)),
            "80e795d4a4caadd7047af389d9f7f220562feb6196032e2131e10563352c4bcc"
        );
    }

    #[test]
    fn test_encodings_agree_below_253() {
        for len in [0usize, 1, 100, 252] {
            let message = vec![b'x'; len];
            assert_eq!(
                magic_hash(&message, LengthEncoding::VarInt),
                magic_hash(&message, LengthEncoding::SingleByte),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_encodings_diverge_from_253() {
        let message = vec![b'x'; 253];
        assert_eq!(
            hex::encode(magic_hash(&message, LengthEncoding::VarInt)),
            "fd004912e3def0dcafc8ac1ac391c296b945f9eba52adb9b39b7f88d7f3b67d1"
        );
        assert_eq!(
            hex::encode(magic_hash(&message, LengthEncoding::SingleByte)),
            "6ea4a751a4de538ddfca6698bbf4579b9c0245f0d18e75bb1574e0a9c6c87f43"
        );
    }
}
