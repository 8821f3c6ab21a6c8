//! # Codec Layer
//!
//! Binary-protocol concerns: Solidity ABI encoding for calldata and
//! configuration structs, and the byte-exact executor options attached to an
//! outbound message. Both must be deterministic for the destination-side
//! contracts to decode them.

pub mod abi;
pub mod options;

pub use abi::{decode_bool, decode_u256, encode, encode_call, selector, Token};
pub use options::{transfer_options, OptionsBuilder};
