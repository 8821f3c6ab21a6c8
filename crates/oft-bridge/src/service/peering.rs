//! # Peer Configurator
//!
//! Establishes mutual trust between the source-side adapter and the
//! destination-side token: each contract must recognize the other's address
//! at the other's endpoint id before messages flow. Every write is preceded
//! by an `isPeer` read so reruns issue no redundant transactions.

use crate::adapters::oft;
use crate::domain::{
    Address, BridgeError, Bytes32, ChainId, DeploymentRegistry, EndpointId, PeerDirection,
    PeeringOutcome,
};
use crate::ports::{LedgerClient, LedgerRouter, PeeringApi};
use async_trait::async_trait;
use primitive_types::U256;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Idempotent bidirectional peering between two registered chains.
pub struct PeerConfigurator {
    registry: Arc<DeploymentRegistry>,
    ledgers: LedgerRouter,
    inclusion_timeout: Duration,
}

impl PeerConfigurator {
    /// Create a configurator with the default inclusion bound.
    pub fn new(registry: Arc<DeploymentRegistry>, ledgers: LedgerRouter) -> Self {
        Self::with_inclusion_timeout(registry, ledgers, Duration::from_secs(120))
    }

    /// Create with an explicit inclusion bound.
    pub fn with_inclusion_timeout(
        registry: Arc<DeploymentRegistry>,
        ledgers: LedgerRouter,
        inclusion_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            ledgers,
            inclusion_timeout,
        }
    }

    /// Read-before-write for one direction: `contract` on `ledger` must
    /// recognize `peer` at `remote_eid`. Errors are captured in the
    /// direction result, not propagated, so the other direction still runs.
    async fn ensure_direction(
        &self,
        ledger: &dyn LedgerClient,
        contract: Address,
        remote_eid: EndpointId,
        peer: Bytes32,
    ) -> PeerDirection {
        let read = async {
            let ret = ledger
                .call_view(contract, oft::is_peer(remote_eid, peer))
                .await?;
            oft::decode_is_peer(&ret)
        };
        match read.await {
            Ok(true) => return PeerDirection::AlreadySet,
            Ok(false) => {}
            Err(error) => {
                return PeerDirection::Failed {
                    error: format!("isPeer read failed: {error}"),
                }
            }
        }

        let write = async {
            let tx = ledger
                .submit_transaction(contract, oft::set_peer(remote_eid, peer), U256::zero())
                .await?;
            ledger.wait_for_inclusion(tx, self.inclusion_timeout).await
        };
        match write.await {
            Ok(receipt) if receipt.success => PeerDirection::Set {
                tx: receipt.tx_hash,
            },
            Ok(_) => PeerDirection::Failed {
                error: "setPeer reverted on-chain".to_string(),
            },
            Err(error) => PeerDirection::Failed {
                error: format!("setPeer failed: {error}"),
            },
        }
    }
}

#[async_trait]
impl PeeringApi for PeerConfigurator {
    async fn ensure_bidirectional_peering(
        &self,
        source_chain: ChainId,
        dest_chain: ChainId,
    ) -> Result<PeeringOutcome, BridgeError> {
        let source = self.registry.resolve(source_chain)?.clone();
        let dest = self.registry.resolve(dest_chain)?.clone();
        let adapter = source.bridge_adapter()?;
        let remote_token = dest.remote_token()?;
        let source_ledger = self.ledgers.client(source_chain)?;
        let dest_ledger = self.ledgers.client(dest_chain)?;

        info!(
            "[bridge] peering {} <-> {}",
            source.network, dest.network
        );

        // Source adapter trusts the destination token at the destination eid.
        let source_dir = self
            .ensure_direction(
                source_ledger.as_ref(),
                adapter,
                dest.endpoint_id,
                remote_token.to_bytes32(),
            )
            .await;

        // Destination token trusts the source adapter at the source eid.
        let dest_dir = self
            .ensure_direction(
                dest_ledger.as_ref(),
                remote_token,
                source.endpoint_id,
                adapter.to_bytes32(),
            )
            .await;

        let outcome = PeeringOutcome {
            source: source_dir,
            destination: dest_dir,
        };
        if !outcome.is_fully_peered() {
            warn!(
                "[bridge] peering {} <-> {} incomplete: {:?}",
                source.network, dest.network, outcome
            );
        }
        Ok(outcome)
    }
}
