//! # Integration Flows
//!
//! End-to-end choreography of the registry, orchestrator, and configurators
//! against scripted ledger clients and a stateful peering fake.

pub mod security_flow;
pub mod transfer_flow;
