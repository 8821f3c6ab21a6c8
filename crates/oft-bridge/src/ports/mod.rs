//! # Ports
//!
//! Inbound ports are the operations the surrounding application consumes;
//! outbound ports are the external collaborators the core drives. All
//! collaborators must be safe for concurrent use by independent runs.

pub mod inbound;
pub mod outbound;

pub use inbound::{PeeringApi, SecurityConfigApi, TransferApi};
pub use outbound::{
    DeliveryOracle, DeliveryReceipt, DeliveryStatus, LedgerClient, LedgerRouter, MockDeliveryMode,
    MockDeliveryOracle, MockLedgerClient, SubmittedTx, TxReceipt,
};
