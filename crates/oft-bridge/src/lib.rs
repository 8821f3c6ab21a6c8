//! # OFT Bridge Core
//!
//! Cross-chain fungible-token transfer orchestration over a LayerZero-style
//! asynchronous message-passing bridge.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Move an OFT-style token from a source EVM ledger to a destination EVM
//! ledger, sequencing the dependent on-chain transactions and waiting for the
//! external relayer network to confirm delivery on the far side:
//! - Allowance approval, fee quotation, message submission, delivery wait
//! - Idempotent bidirectional peer-trust configuration (`setPeer`)
//! - DVN/executor security-stack configuration for a message channel
//!
//! ## Guarantees
//!
//! | Guarantee | Description |
//! |-----------|-------------|
//! | Fail-fast validation | No transaction is submitted for a bad request |
//! | Strict step ordering | approve → quote → send → await delivery |
//! | Bounded waits | Every suspension point carries an explicit timeout |
//! | Distinct ambiguity | Delivery timeout is never conflated with failure |
//! | No hidden retries | A record is never reused for a second send |
//!
//! ## Module Structure
//!
//! ```text
//! oft-bridge/
//! ├── domain/     # Requests, records, registry, errors
//! ├── codec/      # Executor options + Solidity ABI encoding
//! ├── ports/      # LedgerClient, DeliveryOracle, exposed APIs
//! ├── adapters/   # Per-contract calldata builders and decoders
//! └── service/    # Orchestrator and configurators
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use codec::{transfer_options, OptionsBuilder};
pub use domain::{
    Address, BridgeError, ChainConfig, ChainId, ConfigOutcome, DeploymentRegistry, EndpointId,
    FailureReason, PeerDirection, PeeringOutcome, SecurityStackConfig, StepFailure,
    TransferOutcome, TransferRecord, TransferRequest, TransferStatus, TransferStep, TxHash,
};
pub use ports::{
    DeliveryOracle, DeliveryReceipt, DeliveryStatus, LedgerClient, LedgerRouter, MockDeliveryMode,
    MockDeliveryOracle, MockLedgerClient, PeeringApi, SecurityConfigApi, TransferApi, TxReceipt,
};
pub use service::{
    CancelHandle, OrchestratorConfig, PeerConfigurator, SecurityStackConfigurator,
    TransferOrchestrator,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
