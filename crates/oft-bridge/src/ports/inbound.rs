//! # Inbound Ports
//!
//! Operations exposed to the surrounding application (an HTTP layer or
//! deployment pipeline, not specified here). The core keeps no durable
//! state; every identifying handle is returned to the caller.

use crate::domain::{
    Address, BridgeError, ChainId, ConfigOutcome, PeeringOutcome, SecurityStackConfig,
    TransferOutcome, TransferRequest,
};
use async_trait::async_trait;

/// Cross-chain token transfer - inbound port.
#[async_trait]
pub trait TransferApi: Send + Sync {
    /// Drive one transfer to a terminal outcome within the configured
    /// bounds. Validation errors are returned before any transaction is
    /// submitted; everything after that point is reported in the outcome.
    async fn execute_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferOutcome, BridgeError>;
}

/// Bidirectional peer-trust configuration - inbound port.
#[async_trait]
pub trait PeeringApi: Send + Sync {
    /// Idempotently establish mutual authorization between the source-side
    /// adapter and the destination-side token. Safe to invoke repeatedly;
    /// partial success is reported per direction.
    async fn ensure_bidirectional_peering(
        &self,
        source_chain: ChainId,
        dest_chain: ChainId,
    ) -> Result<PeeringOutcome, BridgeError>;
}

/// Message-channel security policy - inbound port.
#[async_trait]
pub trait SecurityConfigApi: Send + Sync {
    /// Push validator and executor policy for one remote endpoint.
    /// Deliberate overwrite; no idempotency read.
    async fn apply_security_stack(
        &self,
        endpoint: Address,
        oapp: Address,
        send_library: Address,
        config: &SecurityStackConfig,
    ) -> Result<ConfigOutcome, BridgeError>;
}
