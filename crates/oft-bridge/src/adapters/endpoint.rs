//! # Messaging Endpoint Calldata
//!
//! Security-stack configuration: the validator (DVN) policy and the executor
//! policy for one message channel, packed into the binary struct layouts the
//! endpoint expects and written with a single `setConfig` transaction.

use crate::codec::abi::{encode, encode_call, Token};
use crate::domain::{Address, SecurityStackConfig};
use primitive_types::U256;

/// Canonical signature of the endpoint configuration entrypoint.
pub const SIG_SET_CONFIG: &str = "setConfig(address,address,(uint32,uint32,bytes)[])";

/// Config type tag for the executor policy struct.
pub const EXECUTOR_CONFIG_TYPE: u64 = 1;

/// Config type tag for the validator (ULN) policy struct.
pub const ULN_CONFIG_TYPE: u64 = 2;

/// Encode the validator policy:
/// `(uint64 confirmations, uint8 requiredDVNCount, uint8 optionalDVNCount,
///   uint8 optionalDVNThreshold, address[] requiredDVNs, address[] optionalDVNs)`.
pub fn encode_uln_config(config: &SecurityStackConfig) -> Vec<u8> {
    encode(&[Token::Tuple(vec![
        Token::Uint(U256::from(config.required_confirmations)),
        Token::Uint(U256::from(config.required_validators.len() as u64)),
        Token::Uint(U256::from(config.optional_validators.len() as u64)),
        Token::Uint(U256::from(config.validator_threshold)),
        Token::AddressArray(config.required_validators.clone()),
        Token::AddressArray(config.optional_validators.clone()),
    ])])
}

/// Encode the executor policy:
/// `(uint32 maxMessageSize, address executorAddress)`.
pub fn encode_executor_config(config: &SecurityStackConfig) -> Vec<u8> {
    encode(&[Token::Tuple(vec![
        Token::Uint(U256::from(config.max_message_size)),
        Token::Address(config.executor),
    ])])
}

/// Calldata writing both policies for `config.remote_eid` in one call.
pub fn set_config(oapp: Address, send_library: Address, config: &SecurityStackConfig) -> Vec<u8> {
    let param = |config_type: u64, bytes: Vec<u8>| {
        Token::Tuple(vec![
            Token::Uint(U256::from(config.remote_eid.0)),
            Token::Uint(U256::from(config_type)),
            Token::Bytes(bytes),
        ])
    };

    encode_call(
        SIG_SET_CONFIG,
        &[
            Token::Address(oapp),
            Token::Address(send_library),
            Token::Array(vec![
                param(ULN_CONFIG_TYPE, encode_uln_config(config)),
                param(EXECUTOR_CONFIG_TYPE, encode_executor_config(config)),
            ]),
        ],
    )
}
