//! # OFT Adapter / OFT Token Calldata
//!
//! The send path (`quoteSend`, `send`) talks to the source-side adapter; the
//! peering calls (`isPeer`, `setPeer`) exist on both the adapter and the
//! destination-side OFT token with identical signatures.

use crate::codec::abi::{decode_bool, decode_u256, encode_call, selector, Token};
use crate::domain::{Address, BridgeError, Bytes32, EndpointId};
use primitive_types::U256;

/// Canonical signature of the fee-quote view.
pub const SIG_QUOTE_SEND: &str =
    "quoteSend((uint32,bytes32,uint256,uint256,bytes,bytes,bytes),bool)";

/// Canonical signature of the send entrypoint.
pub const SIG_SEND: &str =
    "send((uint32,bytes32,uint256,uint256,bytes,bytes,bytes),(uint256,uint256),address)";

/// Canonical signature of the peer read.
pub const SIG_IS_PEER: &str = "isPeer(uint32,bytes32)";

/// Canonical signature of the peer write.
pub const SIG_SET_PEER: &str = "setPeer(uint32,bytes32)";

/// The `SendParam` struct both `quoteSend` and `send` take. Frozen between
/// quotation and send so the fee quote stays valid for the exact message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendParams {
    /// Destination endpoint id.
    pub dst_eid: EndpointId,
    /// Recipient, zero-padded to 32 bytes.
    pub to: Bytes32,
    /// Amount in local decimals.
    pub amount_ld: U256,
    /// Minimum amount accepted on the far side. Equal to `amount_ld` here:
    /// zero-slippage transfers, no partial-fill tolerance.
    pub min_amount_ld: U256,
    /// Executor options bytes.
    pub options: Vec<u8>,
    /// Composed message; empty for plain transfers.
    pub compose_msg: Vec<u8>,
    /// OFT command; unused in default implementations.
    pub oft_cmd: Vec<u8>,
}

impl SendParams {
    /// Zero-slippage transfer parameters.
    pub fn transfer(dst_eid: EndpointId, recipient: Address, amount: U256, options: Vec<u8>) -> Self {
        Self {
            dst_eid,
            to: recipient.to_bytes32(),
            amount_ld: amount,
            min_amount_ld: amount,
            options,
            compose_msg: Vec::new(),
            oft_cmd: Vec::new(),
        }
    }

    fn to_token(&self) -> Token {
        Token::Tuple(vec![
            Token::Uint(U256::from(self.dst_eid.0)),
            Token::FixedBytes(self.to),
            Token::Uint(self.amount_ld),
            Token::Uint(self.min_amount_ld),
            Token::Bytes(self.options.clone()),
            Token::Bytes(self.compose_msg.clone()),
            Token::Bytes(self.oft_cmd.clone()),
        ])
    }
}

/// Calldata for the fee-quote view. `pay_in_lz_token` selects the fee
/// denomination; this core always quotes in native currency.
pub fn quote_send(params: &SendParams, pay_in_lz_token: bool) -> Vec<u8> {
    encode_call(
        SIG_QUOTE_SEND,
        &[params.to_token(), Token::Bool(pay_in_lz_token)],
    )
}

/// Decode the native fee from a `quoteSend` return (`MessagingFee` struct).
pub fn decode_quote(data: &[u8]) -> Result<U256, BridgeError> {
    decode_u256(data, 0)
}

/// Calldata for the send entrypoint. The native fee also rides along as the
/// transaction value; `refund` receives any overpayment.
pub fn send(params: &SendParams, native_fee: U256, lz_token_fee: U256, refund: Address) -> Vec<u8> {
    encode_call(
        SIG_SEND,
        &[
            params.to_token(),
            Token::Tuple(vec![Token::Uint(native_fee), Token::Uint(lz_token_fee)]),
            Token::Address(refund),
        ],
    )
}

/// Calldata for the peer read: does this contract recognize `peer` at
/// `remote_eid`?
pub fn is_peer(remote_eid: EndpointId, peer: Bytes32) -> Vec<u8> {
    encode_call(
        SIG_IS_PEER,
        &[Token::Uint(U256::from(remote_eid.0)), Token::FixedBytes(peer)],
    )
}

/// Decode an `isPeer` return.
pub fn decode_is_peer(data: &[u8]) -> Result<bool, BridgeError> {
    decode_bool(data)
}

/// Calldata for the peer write.
pub fn set_peer(remote_eid: EndpointId, peer: Bytes32) -> Vec<u8> {
    encode_call(
        SIG_SET_PEER,
        &[Token::Uint(U256::from(remote_eid.0)), Token::FixedBytes(peer)],
    )
}

/// Selector helpers for call-sequence assertions in tests.
pub mod selectors {
    use super::*;

    /// `approve(address,uint256)`
    pub fn approve() -> [u8; 4] {
        selector("approve(address,uint256)")
    }

    /// `quoteSend(...)`
    pub fn quote_send() -> [u8; 4] {
        selector(SIG_QUOTE_SEND)
    }

    /// `send(...)`
    pub fn send() -> [u8; 4] {
        selector(SIG_SEND)
    }

    /// `isPeer(uint32,bytes32)`
    pub fn is_peer() -> [u8; 4] {
        selector(SIG_IS_PEER)
    }

    /// `setPeer(uint32,bytes32)`
    pub fn set_peer() -> [u8; 4] {
        selector(SIG_SET_PEER)
    }
}
