//! # Contract Adapters
//!
//! Calldata builders and return decoders for the three contracts the core
//! drives through a [`crate::ports::LedgerClient`]: the source-side ERC-20
//! token, the OFT adapter / OFT token pair, and the messaging endpoint.

pub mod endpoint;
pub mod erc20;
pub mod oft;

pub use oft::SendParams;
