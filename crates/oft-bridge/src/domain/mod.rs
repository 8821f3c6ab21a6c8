//! # Domain Layer
//!
//! Requests, records, the deployment registry, and the error taxonomy.

pub mod entities;
pub mod errors;
pub mod registry;
pub mod value_objects;

pub use entities::{
    ConfigOutcome, FailureReason, PeerDirection, PeeringOutcome, SecurityStackConfig, StepFailure,
    TransferOutcome, TransferRecord, TransferRequest,
};
pub use errors::BridgeError;
pub use registry::{ChainConfig, DeploymentRegistry};
pub use value_objects::{
    Address, Bytes32, ChainId, EndpointId, TransferStatus, TransferStep, TxHash,
};
