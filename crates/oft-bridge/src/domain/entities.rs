//! # Domain Entities
//!
//! Transfer requests, in-flight records, and operation outcomes.

use super::errors::BridgeError;
use super::value_objects::{Address, ChainId, EndpointId, TransferStatus, TransferStep, TxHash};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One user-initiated transfer. Never mutated after validation; lives for
/// the duration of a single orchestration run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Source chain (must carry token + bridge adapter).
    pub source_chain: ChainId,
    /// Destination chain (must carry the remote OFT token).
    pub dest_chain: ChainId,
    /// Amount in token base units. Must be positive.
    pub amount: U256,
    /// Recipient on the destination chain; also the fee refund address.
    pub recipient: Address,
}

impl TransferRequest {
    /// Build a request from a whole-token amount (18-decimal token).
    pub fn from_whole_tokens(
        source_chain: ChainId,
        dest_chain: ChainId,
        whole_tokens: u64,
        recipient: Address,
    ) -> Self {
        let scale = U256::from(10u64).pow(U256::from(18u64));
        Self {
            source_chain,
            dest_chain,
            amount: U256::from(whole_tokens) * scale,
            recipient,
        }
    }

    /// Fail fast on requests that must never reach a ledger.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.amount.is_zero() {
            return Err(BridgeError::InvalidRequest(
                "amount must be positive".to_string(),
            ));
        }
        if self.source_chain == self.dest_chain {
            return Err(BridgeError::InvalidRequest(format!(
                "source and destination chain are both {}",
                self.source_chain
            )));
        }
        Ok(())
    }
}

/// Why a transfer record reached `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Allowance approval reverted on-chain.
    ApprovalRejected,
    /// Send transaction reverted on-chain.
    SendRejected,
    /// RPC node rejected a submission.
    Submission,
    /// Read-only chain communication failed.
    Rpc,
    /// Local inclusion wait exceeded its bound.
    InclusionTimeout,
    /// The delivery oracle itself errored; no information was obtainable.
    OracleUnavailable,
    /// Caller cancelled the run before the named step.
    Cancelled,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ApprovalRejected => "ApprovalRejected",
            Self::SendRejected => "SendRejected",
            Self::Submission => "Submission",
            Self::Rpc => "Rpc",
            Self::InclusionTimeout => "InclusionTimeout",
            Self::OracleUnavailable => "OracleUnavailable",
            Self::Cancelled => "Cancelled",
        };
        write!(f, "{name}")
    }
}

/// Terminal failure details, attributed to the step that caused them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    /// Step the failure occurred at (or was cancelled before).
    pub step: TransferStep,
    /// Failure classification.
    pub reason: FailureReason,
    /// Human-readable detail.
    pub detail: String,
}

/// Working state for one in-flight transfer. Owned exclusively by the
/// orchestrator and converted into a [`TransferOutcome`] at a terminal
/// status; a record is never reused for a second send.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Correlation id for this run.
    pub id: Uuid,
    /// The validated request.
    pub request: TransferRequest,
    /// Current status.
    pub status: TransferStatus,
    /// Allowance approval transaction, once submitted.
    pub approval_tx: Option<TxHash>,
    /// Send transaction, once submitted; the delivery-tracking handle.
    pub send_tx: Option<TxHash>,
    /// Native fee quoted by the adapter.
    pub quoted_fee: Option<U256>,
    /// Destination transaction hash, once delivery is confirmed.
    pub delivery: Option<TxHash>,
    /// Terminal failure details, if any.
    pub failure: Option<StepFailure>,
}

impl TransferRecord {
    /// Create a record for a validated request.
    pub fn new(request: TransferRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            status: TransferStatus::Validated,
            approval_tx: None,
            send_tx: None,
            quoted_fee: None,
            delivery: None,
            failure: None,
        }
    }

    /// Transition to a new status, rejecting illegal jumps.
    pub fn transition_to(&mut self, next: TransferStatus) -> Result<(), BridgeError> {
        if !self.status.can_transition_to(next) {
            return Err(BridgeError::InvalidTransition {
                from: format!("{:?}", self.status),
                to: format!("{next:?}"),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Mark the record terminally failed at the given step.
    pub fn fail(&mut self, step: TransferStep, reason: FailureReason, detail: impl Into<String>) {
        self.failure = Some(StepFailure {
            step,
            reason,
            detail: detail.into(),
        });
        self.status = TransferStatus::Failed;
    }

    /// Consume the record into its caller-facing outcome.
    pub fn into_outcome(self) -> TransferOutcome {
        TransferOutcome {
            id: self.id,
            status: self.status,
            approval_tx: self.approval_tx,
            send_tx: self.send_tx,
            quoted_fee: self.quoted_fee,
            delivery: self.delivery,
            failure: self.failure,
        }
    }
}

/// Terminal result of one transfer run. Carries every identifying handle so
/// the caller can persist them; the core keeps no durable state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// Correlation id of the run.
    pub id: Uuid,
    /// Terminal status: `Delivered`, `DeliveryTimeout`, or `Failed`.
    pub status: TransferStatus,
    /// Allowance approval transaction, if one was submitted.
    pub approval_tx: Option<TxHash>,
    /// Send transaction, if one was submitted.
    pub send_tx: Option<TxHash>,
    /// Quoted native fee, if quotation succeeded.
    pub quoted_fee: Option<U256>,
    /// Destination transaction, if delivery was confirmed.
    pub delivery: Option<TxHash>,
    /// Failure details when `status == Failed`.
    pub failure: Option<StepFailure>,
}

/// Result of one peering direction. Directions are independent: one may be
/// set while the other fails, and that partial state is reportable, not an
/// error of the whole operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerDirection {
    /// The contract already recognized the peer; no transaction issued.
    AlreadySet,
    /// A `setPeer` transaction was submitted and confirmed.
    Set {
        /// The confirming transaction.
        tx: TxHash,
    },
    /// This direction could not be established.
    Failed {
        /// Human-readable cause.
        error: String,
    },
}

impl PeerDirection {
    /// Whether this direction ended with the peer recognized.
    pub fn is_established(&self) -> bool {
        matches!(self, Self::AlreadySet | Self::Set { .. })
    }
}

/// Outcome of a bidirectional peering run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeeringOutcome {
    /// Source adapter trusting the destination token.
    pub source: PeerDirection,
    /// Destination token trusting the source adapter.
    pub destination: PeerDirection,
}

impl PeeringOutcome {
    /// Full bridging requires both directions established.
    pub fn is_fully_peered(&self) -> bool {
        self.source.is_established() && self.destination.is_established()
    }
}

/// Validation and execution policy for one message channel. Write-only:
/// pushed to the endpoint contract, unconditionally overwriting prior
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityStackConfig {
    /// Remote endpoint the channel points at.
    pub remote_eid: EndpointId,
    /// Validators (DVNs) that must all attest to a message.
    pub required_validators: Vec<Address>,
    /// Optional validators, of which `validator_threshold` must attest.
    pub optional_validators: Vec<Address>,
    /// Threshold among the optional validators.
    pub validator_threshold: u8,
    /// Source-chain confirmations before validators attest.
    pub required_confirmations: u64,
    /// Executor that invokes the receive handler on the destination.
    pub executor: Address,
    /// Upper bound on message size the executor accepts.
    pub max_message_size: u32,
}

/// Outcome of a security-stack application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOutcome {
    /// The confirming `setConfig` transaction.
    pub tx: TxHash,
}
