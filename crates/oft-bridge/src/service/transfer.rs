//! # Transfer Orchestrator
//!
//! Turns a `(source, destination, amount, recipient)` request into the
//! ordered transaction sequence: allowance approval, fee quotation, message
//! submission, delivery confirmation. Preconditions fail fast before any
//! transaction; after that every terminal state is explicit and attributed
//! to its step.

use crate::adapters::{erc20, oft, SendParams};
use crate::codec::transfer_options;
use crate::domain::{
    Address, BridgeError, DeploymentRegistry, FailureReason, TransferOutcome, TransferRecord,
    TransferRequest, TransferStatus, TransferStep, TxHash,
};
use crate::ports::{
    DeliveryOracle, DeliveryStatus, LedgerClient, LedgerRouter, TransferApi, TxReceipt,
};
use crate::service::cancel::CancelHandle;
use async_trait::async_trait;
use primitive_types::U256;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Orchestrator tunables. The gas drop and receive gas ceiling ride along
/// on every outbound message as executor options.
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Bound on each local inclusion wait.
    pub inclusion_timeout: Duration,
    /// Bound on the cross-chain delivery wait.
    pub delivery_timeout: Duration,
    /// Destination-chain native currency dropped to the recipient on
    /// arrival, in wei. May be zero; the option is still attached.
    pub gas_drop_wei: u128,
    /// Gas ceiling for the destination-side receive handler.
    pub executor_receive_gas: u128,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            inclusion_timeout: Duration::from_secs(120),
            delivery_timeout: Duration::from_secs(300),
            gas_drop_wei: 0,
            executor_receive_gas: 200_000,
        }
    }
}

/// The core transfer state machine. One instance serves many concurrent
/// runs; each run owns its own [`TransferRecord`] and a record is never
/// reused for a second send — retries must start a brand-new request so the
/// approval and fee quote are fresh.
pub struct TransferOrchestrator<O: DeliveryOracle> {
    registry: Arc<DeploymentRegistry>,
    ledgers: LedgerRouter,
    oracle: Arc<O>,
    config: OrchestratorConfig,
}

impl<O: DeliveryOracle> TransferOrchestrator<O> {
    /// Create an orchestrator with default tunables.
    pub fn new(registry: Arc<DeploymentRegistry>, ledgers: LedgerRouter, oracle: Arc<O>) -> Self {
        Self {
            registry,
            ledgers,
            oracle,
            config: OrchestratorConfig::default(),
        }
    }

    /// Create with explicit tunables.
    pub fn with_config(
        registry: Arc<DeploymentRegistry>,
        ledgers: LedgerRouter,
        oracle: Arc<O>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            registry,
            ledgers,
            oracle,
            config,
        }
    }

    /// Drive one transfer to a terminal outcome, honoring `cancel` between
    /// steps. Validation failures return `Err` before a record exists; all
    /// later failures are reported in the outcome with their step.
    pub async fn execute_transfer_with_cancel(
        &self,
        request: TransferRequest,
        cancel: &CancelHandle,
    ) -> Result<TransferOutcome, BridgeError> {
        request.validate()?;
        let source = self.registry.resolve(request.source_chain)?.clone();
        let dest = self.registry.resolve(request.dest_chain)?.clone();
        let adapter = source.bridge_adapter()?;
        let token = source.token()?;
        // Role invariant: the destination must carry the OFT token mint.
        dest.remote_token()?;
        let ledger = self.ledgers.client(request.source_chain)?;

        let mut record = TransferRecord::new(request);
        info!(
            "[bridge] transfer {}: {} -> {}, amount {}",
            record.id, source.network, dest.network, record.request.amount
        );

        // APPROVING: authorize the adapter for exactly the transfer amount.
        // A revert here is terminal; re-approving under the same nonce
        // context risks double-approval ambiguity.
        if cancel.is_cancelled() {
            record.fail(
                TransferStep::Approving,
                FailureReason::Cancelled,
                "cancelled before approval",
            );
            return Ok(record.into_outcome());
        }
        record.transition_to(TransferStatus::Approving)?;
        let approve_data = erc20::approve(adapter, record.request.amount);
        let mut approval_tx = None;
        let approved = self
            .submit_and_wait(
                ledger.as_ref(),
                token,
                approve_data,
                U256::zero(),
                &mut approval_tx,
            )
            .await;
        record.approval_tx = approval_tx;
        match approved {
            Ok(receipt) if receipt.success => {
                record.transition_to(TransferStatus::Approved)?;
                debug!("[bridge] transfer {}: approval {}", record.id, receipt.tx_hash);
            }
            Ok(_) => {
                record.fail(
                    TransferStep::Approving,
                    FailureReason::ApprovalRejected,
                    "approval reverted on-chain",
                );
                warn!("[bridge] transfer {}: approval reverted", record.id);
                return Ok(record.into_outcome());
            }
            Err(error) => {
                record.fail(TransferStep::Approving, classify(&error), error.to_string());
                return Ok(record.into_outcome());
            }
        }

        // QUOTING: freeze the send parameters, then price them. The quote
        // is time-sensitive, so the same parameters must reach the send.
        if cancel.is_cancelled() {
            record.fail(
                TransferStep::Quoting,
                FailureReason::Cancelled,
                "cancelled before quotation",
            );
            return Ok(record.into_outcome());
        }
        record.transition_to(TransferStatus::Quoting)?;
        let options = transfer_options(
            self.config.gas_drop_wei,
            record.request.recipient,
            self.config.executor_receive_gas,
        );
        let params = SendParams::transfer(
            dest.endpoint_id,
            record.request.recipient,
            record.request.amount,
            options,
        );
        let quote = match ledger.call_view(adapter, oft::quote_send(&params, false)).await {
            Ok(ret) => oft::decode_quote(&ret),
            Err(error) => Err(error),
        };
        let native_fee = match quote {
            Ok(fee) => fee,
            Err(error) => {
                record.fail(TransferStep::Quoting, classify(&error), error.to_string());
                return Ok(record.into_outcome());
            }
        };
        record.quoted_fee = Some(native_fee);
        record.transition_to(TransferStatus::Quoted)?;
        debug!("[bridge] transfer {}: native fee {}", record.id, native_fee);

        // SENDING: the quoted fee rides along as the transaction value;
        // overpayment is refunded to the recipient.
        if cancel.is_cancelled() {
            record.fail(
                TransferStep::Sending,
                FailureReason::Cancelled,
                "cancelled before send",
            );
            return Ok(record.into_outcome());
        }
        record.transition_to(TransferStatus::Sending)?;
        let send_data = oft::send(&params, native_fee, U256::zero(), record.request.recipient);
        let mut submitted_send_tx = None;
        let sent = self
            .submit_and_wait(
                ledger.as_ref(),
                adapter,
                send_data,
                native_fee,
                &mut submitted_send_tx,
            )
            .await;
        record.send_tx = submitted_send_tx;
        let send_tx = match sent {
            Ok(receipt) if receipt.success => {
                record.transition_to(TransferStatus::Sent)?;
                info!("[bridge] transfer {}: sent in {}", record.id, receipt.tx_hash);
                receipt.tx_hash
            }
            Ok(_) => {
                record.fail(
                    TransferStep::Sending,
                    FailureReason::SendRejected,
                    "send reverted on-chain",
                );
                warn!("[bridge] transfer {}: send reverted", record.id);
                return Ok(record.into_outcome());
            }
            Err(error) => {
                record.fail(TransferStep::Sending, classify(&error), error.to_string());
                return Ok(record.into_outcome());
            }
        };

        // AWAITING_DELIVERY: funds have left the source chain. A timeout
        // here is unconfirmed, not failed, and nothing is rolled back.
        if cancel.is_cancelled() {
            record.fail(
                TransferStep::AwaitingDelivery,
                FailureReason::Cancelled,
                "cancelled before delivery wait; send already submitted",
            );
            return Ok(record.into_outcome());
        }
        record.transition_to(TransferStatus::AwaitingDelivery)?;
        match self
            .oracle
            .await_delivery(dest.endpoint_id, send_tx, self.config.delivery_timeout)
            .await
        {
            Ok(DeliveryStatus::Delivered(receipt)) => {
                record.delivery = Some(receipt.dest_tx_hash);
                record.transition_to(TransferStatus::Delivered)?;
                info!(
                    "[bridge] transfer {}: delivered in {}",
                    record.id, receipt.dest_tx_hash
                );
            }
            Ok(DeliveryStatus::TimedOut) => {
                record.transition_to(TransferStatus::DeliveryTimeout)?;
                warn!(
                    "[bridge] transfer {}: delivery unconfirmed after {:?}",
                    record.id, self.config.delivery_timeout
                );
            }
            Err(error) => {
                record.fail(
                    TransferStep::AwaitingDelivery,
                    FailureReason::OracleUnavailable,
                    error.to_string(),
                );
            }
        }

        Ok(record.into_outcome())
    }

    /// Submit, then wait for inclusion. The hash is written to `handle` as
    /// soon as submission succeeds: a transaction whose inclusion wait
    /// errors out was still submitted and may land on-chain later, so the
    /// caller must see its handle in the outcome.
    async fn submit_and_wait(
        &self,
        ledger: &dyn LedgerClient,
        to: Address,
        data: Vec<u8>,
        value: U256,
        handle: &mut Option<TxHash>,
    ) -> Result<TxReceipt, BridgeError> {
        let tx = ledger.submit_transaction(to, data, value).await?;
        *handle = Some(tx);
        ledger.wait_for_inclusion(tx, self.config.inclusion_timeout).await
    }
}

#[async_trait]
impl<O: DeliveryOracle> TransferApi for TransferOrchestrator<O> {
    async fn execute_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferOutcome, BridgeError> {
        self.execute_transfer_with_cancel(request, &CancelHandle::new())
            .await
    }
}

/// Attribute a chain-communication error to its failure class.
fn classify(error: &BridgeError) -> FailureReason {
    match error {
        BridgeError::Submission(_) => FailureReason::Submission,
        BridgeError::InclusionTimeout { .. } => FailureReason::InclusionTimeout,
        BridgeError::OracleUnavailable(_) => FailureReason::OracleUnavailable,
        _ => FailureReason::Rpc,
    }
}
