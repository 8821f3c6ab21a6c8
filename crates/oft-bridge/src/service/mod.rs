//! # Service Layer
//!
//! The orchestrator and configurators: each run is logically
//! single-threaded, its steps strictly ordered, with bounded waits at every
//! suspension point. Independent runs share no mutable state.

pub mod cancel;
pub mod peering;
pub mod security;
pub mod transfer;

pub use cancel::CancelHandle;
pub use peering::PeerConfigurator;
pub use security::SecurityStackConfigurator;
pub use transfer::{OrchestratorConfig, TransferOrchestrator};
