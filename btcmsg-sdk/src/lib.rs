#![deny(missing_docs)]

//! Bitcoin signed message SDK.
//!
//! Re-exports the primitives and message crates for single-crate usage.
//!
//! ```
//! use btcmsg_sdk::message::{sign_message_strict, verify_message};
//!
//! let key = "5Kbkm9hz5sAyKZtAvERagifSkpnnsqStGua1T1MyYsqM6GnMxag";
//! let message = b"This is an example of a signed message.";
//! let signature = sign_message_strict(key, message).unwrap();
//! assert!(verify_message("1Dvc3bNVvNV8YT1ECWXjQ4F9eiAN5UjJnc", &signature, message));
//! ```

pub use btcmsg_primitives as primitives;
pub use btcmsg_message as message;
