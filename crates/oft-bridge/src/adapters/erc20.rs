//! ERC-20 token calldata.

use crate::codec::abi::{encode_call, Token};
use crate::domain::Address;
use primitive_types::U256;

/// Authorize `spender` to move exactly `amount` of the caller's tokens.
pub fn approve(spender: Address, amount: U256) -> Vec<u8> {
    encode_call(
        "approve(address,uint256)",
        &[Token::Address(spender), Token::Uint(amount)],
    )
}
