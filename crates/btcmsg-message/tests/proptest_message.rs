use proptest::prelude::*;

use btcmsg_message::{
    magic_hash, sign_message_strict, verify_message, verify_message_strict, LengthEncoding,
    MessageError,
};
use btcmsg_primitives::ec::PrivateKey;
use btcmsg_primitives::network::Network;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sign_then_verify_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..=255)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let address = pk.pub_key().to_address(Network::Mainnet.address_version()).to_string();
            let signature = sign_message_strict(&pk.to_hex(), &msg).unwrap();
            prop_assert!(verify_message_strict(&address, &signature, &msg).is_ok());
        }
    }

    #[test]
    fn message_tampering_is_detected(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 1..64),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let address = pk.pub_key().to_address(Network::Mainnet.address_version()).to_string();
            let signature = sign_message_strict(&pk.to_wif(Network::Mainnet), &msg).unwrap();

            let mut tampered = msg.clone();
            tampered[index.index(msg.len())] ^= flip;
            prop_assert!(!verify_message(&address, &signature, &tampered));
            let err = verify_message_strict(&address, &signature, &tampered).unwrap_err();
            let is_mismatch = matches!(err, MessageError::AddressMismatch { .. });
            prop_assert!(is_mismatch);
        }
    }

    #[test]
    fn length_encodings_agree_on_short_messages(msg in prop::collection::vec(any::<u8>(), 0..253)) {
        prop_assert_eq!(
            magic_hash(&msg, LengthEncoding::VarInt),
            magic_hash(&msg, LengthEncoding::SingleByte)
        );
    }
}
