//! # Domain Value Objects
//!
//! Immutable value types for cross-chain transfer orchestration.

use super::errors::BridgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 32-byte value (zero-padded addresses, message payloads).
pub type Bytes32 = [u8; 32];

/// EVM chain identifier (e.g. 84532 for base-sepolia).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Messaging endpoint identifier (e.g. 40245), distinct from the chain id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointId(pub u32);

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 20-byte EVM contract or account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, BridgeError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| BridgeError::Decode(format!("bad address hex: {e}")))?;
        if bytes.len() != 20 {
            return Err(BridgeError::Decode(format!(
                "address must be 20 bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }

    /// Left-pad to 32 bytes, the wire form for remote peers and recipients.
    pub fn to_bytes32(self) -> Bytes32 {
        let mut out = [0u8; 32];
        out[12..].copy_from_slice(&self.0);
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// 32-byte transaction hash; doubles as the local transaction handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    /// Parse from a hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, BridgeError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(stripped).map_err(|e| BridgeError::Decode(format!("bad tx hash: {e}")))?;
        if bytes.len() != 32 {
            return Err(BridgeError::Decode(format!(
                "tx hash must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({self})")
    }
}

impl Serialize for TxHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Transfer orchestration state machine.
///
/// Terminal states are `Delivered`, `DeliveryTimeout` and `Failed`, and only
/// those three. `DeliveryTimeout` means funds left the source chain but
/// destination completion is unconfirmed; it is never conflated with
/// `Failed`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Request passed validation; no transaction submitted yet.
    #[default]
    Validated,
    /// Allowance approval submitted, awaiting local inclusion.
    Approving,
    /// Allowance confirmed on the source chain.
    Approved,
    /// Fee quote requested from the adapter.
    Quoting,
    /// Native fee quoted; send parameters are frozen.
    Quoted,
    /// Send transaction submitted, awaiting local inclusion.
    Sending,
    /// Send confirmed locally; message is in flight.
    Sent,
    /// Waiting on the delivery oracle for destination confirmation.
    AwaitingDelivery,
    /// Destination chain processed the message.
    Delivered,
    /// Delivery bound elapsed; outcome unconfirmed, not failed.
    DeliveryTimeout,
    /// A step failed terminally (revert, RPC error, oracle outage, cancel).
    Failed,
}

impl TransferStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        match (self, next) {
            (Self::Validated, Self::Approving) => true,
            (Self::Approving, Self::Approved) => true,
            (Self::Approved, Self::Quoting) => true,
            (Self::Quoting, Self::Quoted) => true,
            (Self::Quoted, Self::Sending) => true,
            (Self::Sending, Self::Sent) => true,
            (Self::Sent, Self::AwaitingDelivery) => true,
            (Self::AwaitingDelivery, Self::Delivered) => true,
            (Self::AwaitingDelivery, Self::DeliveryTimeout) => true,
            // Any non-terminal state may fail (revert, RPC error, cancel).
            (from, Self::Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::DeliveryTimeout | Self::Failed)
    }
}

/// The orchestration step a failure is attributed to, so a caller can
/// distinguish "money not yet moved" from "money moved, unconfirmed".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStep {
    /// Allowance approval on the source token.
    Approving,
    /// Fee quotation on the adapter.
    Quoting,
    /// Send submission on the adapter.
    Sending,
    /// Cross-chain delivery wait.
    AwaitingDelivery,
}

impl fmt::Display for TransferStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Approving => "APPROVING",
            Self::Quoting => "QUOTING",
            Self::Sending => "SENDING",
            Self::AwaitingDelivery => "AWAITING_DELIVERY",
        };
        write!(f, "{name}")
    }
}
