//! # Outbound Ports
//!
//! Traits for the external collaborators the core drives: per-chain ledger
//! clients and the cross-chain delivery oracle. Both are stateless from the
//! core's perspective and must be safe for concurrent use by independent
//! orchestration runs.

use crate::domain::{Address, BridgeError, ChainId, EndpointId, TxHash};
use async_trait::async_trait;
use primitive_types::U256;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Receipt of a locally included transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxReceipt {
    /// The included transaction.
    pub tx_hash: TxHash,
    /// Block the transaction landed in.
    pub block_number: u64,
    /// False when the transaction reverted.
    pub success: bool,
}

/// Per-chain ledger client - outbound port.
///
/// One instance per chain, constructed once and passed in explicitly; the
/// core never reaches for a global provider or signer.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Submit a transaction. Fails with `Submission` on RPC rejection.
    async fn submit_transaction(
        &self,
        to: Address,
        data: Vec<u8>,
        value: U256,
    ) -> Result<TxHash, BridgeError>;

    /// Wait for local inclusion, bounded by `timeout`.
    async fn wait_for_inclusion(
        &self,
        tx: TxHash,
        timeout: Duration,
    ) -> Result<TxReceipt, BridgeError>;

    /// Execute a read-only contract call. Fails with `Rpc`.
    async fn call_view(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, BridgeError>;
}

/// Confirmation that the destination chain processed a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Transaction that executed the message on the destination chain.
    pub dest_tx_hash: TxHash,
}

/// Result of a bounded delivery wait. A timeout means the bound elapsed
/// with no confirmation, not that delivery failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The destination chain processed the message.
    Delivered(DeliveryReceipt),
    /// The bound elapsed; destination completion is unconfirmed.
    TimedOut,
}

/// Cross-chain delivery oracle - outbound port.
#[async_trait]
pub trait DeliveryOracle: Send + Sync {
    /// Poll or block until the message sent in `source_tx` is observed
    /// processed at `dest_eid`, up to `timeout`. Errors with
    /// `OracleUnavailable` when no information is obtainable at all.
    async fn await_delivery(
        &self,
        dest_eid: EndpointId,
        source_tx: TxHash,
        timeout: Duration,
    ) -> Result<DeliveryStatus, BridgeError>;
}

/// Explicit chain-id → ledger-client lookup, replacing implicit global
/// provider/signer singletons.
#[derive(Clone, Default)]
pub struct LedgerRouter {
    clients: HashMap<ChainId, Arc<dyn LedgerClient>>,
}

impl LedgerRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client for a chain.
    pub fn with_client(mut self, chain: ChainId, client: Arc<dyn LedgerClient>) -> Self {
        self.clients.insert(chain, client);
        self
    }

    /// Resolve the client for a chain.
    pub fn client(&self, chain: ChainId) -> Result<Arc<dyn LedgerClient>, BridgeError> {
        self.clients
            .get(&chain)
            .cloned()
            .ok_or(BridgeError::UnknownChain(chain))
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// A transaction captured by [`MockLedgerClient`].
#[derive(Clone, Debug)]
pub struct SubmittedTx {
    /// Target contract.
    pub to: Address,
    /// Calldata.
    pub data: Vec<u8>,
    /// Attached value.
    pub value: U256,
}

impl SubmittedTx {
    /// First four bytes of the calldata.
    pub fn selector(&self) -> [u8; 4] {
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.data[..4]);
        out
    }
}

/// Mock ledger client for testing: records submissions, answers views from
/// a selector-keyed script, and reports reverts for marked selectors.
#[derive(Default)]
pub struct MockLedgerClient {
    submitted: parking_lot::Mutex<Vec<SubmittedTx>>,
    view_responses: parking_lot::Mutex<HashMap<[u8; 4], Vec<u8>>>,
    revert_selectors: parking_lot::Mutex<Vec<[u8; 4]>>,
    stall_selectors: parking_lot::Mutex<Vec<[u8; 4]>>,
    /// Reject every submission with a `Submission` error.
    pub fail_submission: bool,
}

impl MockLedgerClient {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that rejects every submission.
    pub fn failing_submission() -> Self {
        Self {
            fail_submission: true,
            ..Self::default()
        }
    }

    /// Script the response for view calls matching `selector`.
    pub fn set_view_response(&self, selector: [u8; 4], response: Vec<u8>) {
        self.view_responses.lock().insert(selector, response);
    }

    /// Mark transactions with this selector as reverting on inclusion.
    pub fn revert_on(&self, selector: [u8; 4]) {
        self.revert_selectors.lock().push(selector);
    }

    /// Mark transactions with this selector as never included: the
    /// submission succeeds, but the inclusion wait times out.
    pub fn stall_inclusion_on(&self, selector: [u8; 4]) {
        self.stall_selectors.lock().push(selector);
    }

    /// Transactions submitted so far.
    pub fn submissions(&self) -> Vec<SubmittedTx> {
        self.submitted.lock().clone()
    }

    /// Number of transactions submitted so far.
    pub fn submission_count(&self) -> usize {
        self.submitted.lock().len()
    }

    fn mock_tx_hash(index: usize) -> TxHash {
        let mut hash = [0u8; 32];
        hash[24..].copy_from_slice(&(index as u64).to_be_bytes());
        TxHash(hash)
    }

    fn index_of(tx: TxHash) -> usize {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&tx.0[24..]);
        u64::from_be_bytes(bytes) as usize
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn submit_transaction(
        &self,
        to: Address,
        data: Vec<u8>,
        value: U256,
    ) -> Result<TxHash, BridgeError> {
        if self.fail_submission {
            return Err(BridgeError::Submission("mock rejection".to_string()));
        }
        let mut submitted = self.submitted.lock();
        submitted.push(SubmittedTx { to, data, value });
        Ok(Self::mock_tx_hash(submitted.len() - 1))
    }

    async fn wait_for_inclusion(
        &self,
        tx: TxHash,
        timeout: Duration,
    ) -> Result<TxReceipt, BridgeError> {
        let submitted = self.submitted.lock();
        let entry = submitted
            .get(Self::index_of(tx))
            .ok_or_else(|| BridgeError::Rpc(format!("unknown mock tx {tx}")))?;
        if self.stall_selectors.lock().contains(&entry.selector()) {
            return Err(BridgeError::InclusionTimeout {
                timeout_secs: timeout.as_secs(),
            });
        }
        let reverted = self.revert_selectors.lock().contains(&entry.selector());
        Ok(TxReceipt {
            tx_hash: tx,
            block_number: 1 + Self::index_of(tx) as u64,
            success: !reverted,
        })
    }

    async fn call_view(&self, _to: Address, data: Vec<u8>) -> Result<Vec<u8>, BridgeError> {
        if data.len() < 4 {
            return Err(BridgeError::Rpc("calldata too short".to_string()));
        }
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&data[..4]);
        self.view_responses
            .lock()
            .get(&selector)
            .cloned()
            .ok_or_else(|| BridgeError::Rpc(format!("no scripted response for 0x{}", hex::encode(selector))))
    }
}

/// Behavior of [`MockDeliveryOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockDeliveryMode {
    /// Confirm delivery immediately.
    Deliver,
    /// Report the bound elapsed with no confirmation.
    TimeOut,
    /// Fail as if the confirmation channel itself is broken.
    Unavailable,
}

/// Mock delivery oracle for testing.
pub struct MockDeliveryOracle {
    /// How the oracle answers.
    pub mode: MockDeliveryMode,
    /// Destination transaction reported on delivery.
    pub dest_tx: TxHash,
    calls: parking_lot::Mutex<Vec<(EndpointId, TxHash)>>,
}

impl MockDeliveryOracle {
    /// Oracle that confirms delivery with the given destination tx.
    pub fn delivering(dest_tx: TxHash) -> Self {
        Self {
            mode: MockDeliveryMode::Deliver,
            dest_tx,
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Oracle whose bound always elapses.
    pub fn timing_out() -> Self {
        Self {
            mode: MockDeliveryMode::TimeOut,
            dest_tx: TxHash([0u8; 32]),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Oracle that is down.
    pub fn unavailable() -> Self {
        Self {
            mode: MockDeliveryMode::Unavailable,
            dest_tx: TxHash([0u8; 32]),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far.
    pub fn calls(&self) -> Vec<(EndpointId, TxHash)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl DeliveryOracle for MockDeliveryOracle {
    async fn await_delivery(
        &self,
        dest_eid: EndpointId,
        source_tx: TxHash,
        _timeout: Duration,
    ) -> Result<DeliveryStatus, BridgeError> {
        self.calls.lock().push((dest_eid, source_tx));
        match self.mode {
            MockDeliveryMode::Deliver => Ok(DeliveryStatus::Delivered(DeliveryReceipt {
                dest_tx_hash: self.dest_tx,
            })),
            MockDeliveryMode::TimeOut => Ok(DeliveryStatus::TimedOut),
            MockDeliveryMode::Unavailable => {
                Err(BridgeError::OracleUnavailable("mock outage".to_string()))
            }
        }
    }
}
