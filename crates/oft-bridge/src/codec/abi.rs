//! # Solidity ABI Encoding
//!
//! Minimal head/tail ABI encoder covering the value shapes the bridge
//! contracts take: words, dynamic bytes, address arrays, tuples, and arrays
//! of tuples. Selectors are the first four bytes of keccak-256 over the
//! canonical signature.

use crate::domain::{Address, BridgeError, Bytes32};
use primitive_types::U256;
use sha3::{Digest, Keccak256};

const WORD: usize = 32;

/// An ABI-encodable value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// `uintN`, right-aligned in one word.
    Uint(U256),
    /// `address`, left-padded to one word.
    Address(Address),
    /// `bool` as 0 or 1.
    Bool(bool),
    /// `bytes32`, verbatim.
    FixedBytes(Bytes32),
    /// `bytes`, length-prefixed and zero-padded.
    Bytes(Vec<u8>),
    /// `address[]`, length-prefixed.
    AddressArray(Vec<Address>),
    /// Tuple/struct of other tokens.
    Tuple(Vec<Token>),
    /// Dynamic array of tokens; elements must share one shape.
    Array(Vec<Token>),
}

impl Token {
    /// Dynamic types are encoded in the tail with an offset in the head.
    fn is_dynamic(&self) -> bool {
        match self {
            Token::Bytes(_) | Token::AddressArray(_) | Token::Array(_) => true,
            Token::Tuple(inner) => inner.iter().any(Token::is_dynamic),
            _ => false,
        }
    }

    /// Head width in bytes: one word, except static tuples, which inline.
    fn head_width(&self) -> usize {
        match self {
            Token::Tuple(inner) if !self.is_dynamic() => {
                inner.iter().map(Token::head_width).sum()
            }
            _ => WORD,
        }
    }

    /// In-place encoding of a static token.
    fn encode_static(&self, out: &mut Vec<u8>) {
        match self {
            Token::Uint(v) => {
                let mut word = [0u8; WORD];
                v.to_big_endian(&mut word);
                out.extend_from_slice(&word);
            }
            Token::Address(addr) => out.extend_from_slice(&addr.to_bytes32()),
            Token::Bool(b) => {
                let mut word = [0u8; WORD];
                word[WORD - 1] = u8::from(*b);
                out.extend_from_slice(&word);
            }
            Token::FixedBytes(b) => out.extend_from_slice(b),
            Token::Tuple(inner) => {
                for token in inner {
                    token.encode_static(out);
                }
            }
            // Dynamic tokens never reach here; encode() routes them to tails.
            Token::Bytes(_) | Token::AddressArray(_) | Token::Array(_) => {
                unreachable!("dynamic token encoded as static")
            }
        }
    }

    /// Tail encoding of a dynamic token.
    fn encode_tail(&self) -> Vec<u8> {
        match self {
            Token::Bytes(data) => {
                let mut out = Vec::with_capacity(WORD + data.len().div_ceil(WORD) * WORD);
                Token::Uint(U256::from(data.len())).encode_static(&mut out);
                out.extend_from_slice(data);
                while out.len() % WORD != 0 {
                    out.push(0);
                }
                out
            }
            Token::AddressArray(addrs) => {
                let mut out = Vec::with_capacity(WORD * (addrs.len() + 1));
                Token::Uint(U256::from(addrs.len())).encode_static(&mut out);
                for addr in addrs {
                    out.extend_from_slice(&addr.to_bytes32());
                }
                out
            }
            Token::Array(elems) => {
                let mut out = Vec::new();
                Token::Uint(U256::from(elems.len())).encode_static(&mut out);
                out.extend_from_slice(&encode(elems));
                out
            }
            Token::Tuple(inner) => encode(inner),
            _ => unreachable!("static token encoded as tail"),
        }
    }
}

/// Encode a token sequence (function arguments or a tuple body).
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(Token::head_width).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail: Vec<u8> = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            Token::Uint(U256::from(head_len + tail.len())).encode_static(&mut head);
            tail.extend_from_slice(&token.encode_tail());
        } else {
            token.encode_static(&mut head);
        }
    }

    head.extend_from_slice(&tail);
    head
}

/// 4-byte function selector for a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Full calldata: selector followed by encoded arguments.
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend_from_slice(&encode(args));
    out
}

/// Decode a `bool` return word.
pub fn decode_bool(data: &[u8]) -> Result<bool, BridgeError> {
    if data.len() < WORD {
        return Err(BridgeError::Decode(format!(
            "bool return too short: {} bytes",
            data.len()
        )));
    }
    Ok(data[WORD - 1] != 0)
}

/// Decode the `index`-th `uint256` word of a return payload.
pub fn decode_u256(data: &[u8], index: usize) -> Result<U256, BridgeError> {
    let start = index * WORD;
    if data.len() < start + WORD {
        return Err(BridgeError::Decode(format!(
            "uint256 return too short: {} bytes, wanted word {index}",
            data.len()
        )));
    }
    Ok(U256::from_big_endian(&data[start..start + WORD]))
}
