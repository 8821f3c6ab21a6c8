//! # Executor Options
//!
//! Byte-encoded execution instructions attached to an outbound message and
//! decoded by the destination-side executor. The format is a type-3 options
//! envelope: a `u16` options-type header, then an ordered list of
//! `[worker_id][size][option_type][payload]` entries. Encoding is
//! deterministic; unsupported option kinds are rejected, never dropped.

use crate::domain::{Address, BridgeError};

/// Options-type header for the worker-option list format.
pub const OPTIONS_TYPE_3: u16 = 3;

/// Worker id of the executor (the only worker this core targets).
pub const WORKER_ID_EXECUTOR: u8 = 1;

/// Receive-execution gas ceiling option.
pub const OPTION_TYPE_LZ_RECEIVE: u8 = 1;

/// Native gas drop option.
pub const OPTION_TYPE_NATIVE_DROP: u8 = 2;

/// Builder for the executor option byte sequence.
///
/// Option order is preserved; identical inputs yield byte-identical output.
#[derive(Clone, Debug)]
pub struct OptionsBuilder {
    buf: Vec<u8>,
}

impl OptionsBuilder {
    /// Start a type-3 options envelope.
    pub fn new() -> Self {
        Self {
            buf: OPTIONS_TYPE_3.to_be_bytes().to_vec(),
        }
    }

    /// Deliver `amount` wei of destination-chain native currency to
    /// `receiver` on arrival.
    pub fn add_executor_native_drop(mut self, amount: u128, receiver: Address) -> Self {
        let mut payload = [0u8; 48];
        payload[..16].copy_from_slice(&amount.to_be_bytes());
        payload[16..].copy_from_slice(&receiver.to_bytes32());
        self.push_option(OPTION_TYPE_NATIVE_DROP, &payload);
        self
    }

    /// Upper bound on gas the executor may spend invoking the receive
    /// handler, with an optional native `value` forwarded to it.
    pub fn add_executor_lz_receive(mut self, gas: u128, value: u128) -> Self {
        if value == 0 {
            self.push_option(OPTION_TYPE_LZ_RECEIVE, &gas.to_be_bytes());
        } else {
            let mut payload = [0u8; 32];
            payload[..16].copy_from_slice(&gas.to_be_bytes());
            payload[16..].copy_from_slice(&value.to_be_bytes());
            self.push_option(OPTION_TYPE_LZ_RECEIVE, &payload);
        }
        self
    }

    /// Append a raw executor option, rejecting option kinds this core does
    /// not understand.
    pub fn add_executor_option(
        mut self,
        option_type: u8,
        payload: &[u8],
    ) -> Result<Self, BridgeError> {
        if option_type != OPTION_TYPE_LZ_RECEIVE && option_type != OPTION_TYPE_NATIVE_DROP {
            return Err(BridgeError::UnsupportedOption(option_type));
        }
        self.push_option(option_type, payload);
        Ok(self)
    }

    fn push_option(&mut self, option_type: u8, payload: &[u8]) {
        // size counts the option_type byte plus the payload
        let size = (payload.len() + 1) as u16;
        self.buf.push(WORKER_ID_EXECUTOR);
        self.buf.extend_from_slice(&size.to_be_bytes());
        self.buf.push(option_type);
        self.buf.extend_from_slice(payload);
    }

    /// Finish and take the encoded bytes.
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The option set every outbound transfer carries: a native gas drop to the
/// recipient plus a receive-execution gas ceiling.
pub fn transfer_options(native_drop_wei: u128, recipient: Address, receive_gas: u128) -> Vec<u8> {
    OptionsBuilder::new()
        .add_executor_native_drop(native_drop_wei, recipient)
        .add_executor_lz_receive(receive_gas, 0)
        .build()
}
