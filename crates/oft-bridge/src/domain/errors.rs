//! # Domain Errors
//!
//! Error taxonomy for the bridge core.
//!
//! Validation errors (`InvalidRequest`, `UnknownChain`, `IncompleteConfig`)
//! are returned before any transaction is submitted. Chain-communication
//! errors (`Submission`, `Rpc`, `InclusionTimeout`) are never auto-retried
//! for state-changing steps. On-chain reverts of a transfer step become a
//! terminal record failure; reverts of a security-stack write surface as
//! `ConfigRejected`.

use super::value_objects::ChainId;
use thiserror::Error;

/// Bridge error types.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Request rejected before any transaction was submitted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Chain id absent from the deployment registry.
    #[error("unknown chain: {0}")]
    UnknownChain(ChainId),

    /// Chain is registered but lacks a field its role requires.
    #[error("incomplete config for chain {chain}: missing {field}")]
    IncompleteConfig {
        /// Chain whose config is incomplete.
        chain: ChainId,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Executor option type outside the supported set.
    #[error("unsupported executor option type: {0}")]
    UnsupportedOption(u8),

    /// RPC node rejected the transaction submission.
    #[error("submission rejected: {0}")]
    Submission(String),

    /// Read-only chain communication failed.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// Local inclusion wait exceeded its bound.
    #[error("inclusion wait timed out after {timeout_secs}s")]
    InclusionTimeout {
        /// Configured bound in seconds.
        timeout_secs: u64,
    },

    /// The confirmation channel itself is broken; no information was
    /// obtainable (distinct from a delivery timeout, where the bound merely
    /// elapsed).
    #[error("delivery oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// Security-stack write reverted on-chain.
    #[error("security config rejected: {0}")]
    ConfigRejected(String),

    /// Contract returned bytes the caller could not interpret.
    #[error("malformed contract response: {0}")]
    Decode(String),

    /// Invalid transfer status transition.
    #[error("invalid transfer transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Attempted status.
        to: String,
    },
}
