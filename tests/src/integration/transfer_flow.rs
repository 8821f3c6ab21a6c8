//! # End-to-End Transfer Flows
//!
//! The full choreography: registry resolution → allowance approval → fee
//! quotation → send → delivery wait, against scripted ledger clients and
//! oracle fakes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use oft_bridge::adapters::oft::selectors;
    use oft_bridge::{
        Address, BridgeError, ChainId, DeploymentRegistry, FailureReason, LedgerRouter,
        MockDeliveryOracle, MockLedgerClient, TransferApi, TransferOrchestrator, TransferRequest,
        TransferStatus, TransferStep, TxHash,
    };
    use primitive_types::U256;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const QUOTED_FEE: u64 = 1_000_000_000_000_000;

    fn recipient() -> Address {
        Address::from_hex("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC").unwrap()
    }

    fn request() -> TransferRequest {
        TransferRequest::from_whole_tokens(ChainId(84532), ChainId(57054), 10, recipient())
    }

    fn quote_return(native_fee: u64) -> Vec<u8> {
        // MessagingFee struct: (nativeFee, lzTokenFee), two static words.
        let mut ret = vec![0u8; 64];
        ret[24..32].copy_from_slice(&native_fee.to_be_bytes());
        ret
    }

    fn source_ledger_with_quote() -> Arc<MockLedgerClient> {
        let ledger = Arc::new(MockLedgerClient::new());
        ledger.set_view_response(selectors::quote_send(), quote_return(QUOTED_FEE));
        ledger
    }

    fn orchestrator(
        ledger: Arc<MockLedgerClient>,
        oracle: Arc<MockDeliveryOracle>,
    ) -> TransferOrchestrator<MockDeliveryOracle> {
        TransferOrchestrator::new(
            Arc::new(DeploymentRegistry::testnet()),
            LedgerRouter::new().with_client(ChainId(84532), ledger),
            oracle,
        )
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[tokio::test]
    async fn test_base_sepolia_to_sonic_transfer_delivers() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle.clone());

        let outcome = orch.execute_transfer(request()).await.unwrap();

        assert_eq!(outcome.status, TransferStatus::Delivered);
        assert!(outcome.failure.is_none());
        assert_eq!(outcome.quoted_fee, Some(U256::from(QUOTED_FEE)));
        assert!(outcome.approval_tx.is_some());
        assert!(outcome.send_tx.is_some());
        assert_eq!(outcome.delivery, Some(TxHash([0xDE; 32])));

        // The oracle was asked about the destination endpoint with the
        // actual send transaction as the tracking handle.
        let calls = oracle.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0 .0, 40349);
        assert_eq!(Some(calls[0].1), outcome.send_tx);
    }

    #[tokio::test]
    async fn test_transfer_submits_approve_then_send_in_order() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle);

        orch.execute_transfer(request()).await.unwrap();

        let registry = DeploymentRegistry::testnet();
        let base = registry.resolve(ChainId(84532)).unwrap();
        let txs = ledger.submissions();
        assert_eq!(txs.len(), 2, "exactly approve and send, nothing else");

        // Approval targets the ERC-20, authorizing the adapter.
        assert_eq!(txs[0].selector(), selectors::approve());
        assert_eq!(txs[0].to, base.token().unwrap());
        assert_eq!(txs[0].value, U256::zero());
        assert_eq!(
            &txs[0].data[16..36],
            &base.bridge_adapter().unwrap().to_bytes32()[12..]
        );

        // Send targets the adapter and carries the quoted fee as value.
        assert_eq!(txs[1].selector(), selectors::send());
        assert_eq!(txs[1].to, base.bridge_adapter().unwrap());
        assert_eq!(txs[1].value, U256::from(QUOTED_FEE));
    }

    #[tokio::test]
    async fn test_approved_amount_matches_transfer_amount() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle);

        let req = request();
        orch.execute_transfer(req.clone()).await.unwrap();

        let approve = &ledger.submissions()[0];
        assert_eq!(U256::from_big_endian(&approve.data[36..68]), req.amount);
    }

    // =============================================================================
    // DELIVERY AMBIGUITY
    // =============================================================================

    #[tokio::test]
    async fn test_delivery_timeout_is_distinct_from_failure() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::timing_out());
        let orch = orchestrator(ledger, oracle);

        let outcome = orch.execute_transfer(request()).await.unwrap();

        assert_eq!(outcome.status, TransferStatus::DeliveryTimeout);
        assert!(outcome.failure.is_none(), "timeout is ambiguity, not failure");
        // The send handle survives for out-of-band tracking.
        assert!(outcome.send_tx.is_some());
        assert!(outcome.delivery.is_none());
    }

    #[tokio::test]
    async fn test_oracle_outage_after_send_keeps_the_handle() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::unavailable());
        let orch = orchestrator(ledger, oracle);

        let outcome = orch.execute_transfer(request()).await.unwrap();

        assert_eq!(outcome.status, TransferStatus::Failed);
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.step, TransferStep::AwaitingDelivery);
        assert_eq!(failure.reason, FailureReason::OracleUnavailable);
        assert!(outcome.send_tx.is_some());
    }

    // =============================================================================
    // FAIL-FAST VALIDATION
    // =============================================================================

    #[tokio::test]
    async fn test_same_chain_transfer_never_reaches_a_ledger() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle.clone());

        let mut req = request();
        req.dest_chain = req.source_chain;
        let result = orch.execute_transfer(req).await;

        assert!(matches!(result, Err(BridgeError::InvalidRequest(_))));
        assert_eq!(ledger.submission_count(), 0);
        assert!(oracle.calls().is_empty());
    }

    #[tokio::test]
    async fn test_zero_amount_transfer_never_reaches_a_ledger() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle);

        let mut req = request();
        req.amount = U256::zero();
        let result = orch.execute_transfer(req).await;

        assert!(matches!(result, Err(BridgeError::InvalidRequest(_))));
        assert_eq!(ledger.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_chain_is_rejected_before_any_transaction() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle);

        let mut req = request();
        req.dest_chain = ChainId(999_999);
        let result = orch.execute_transfer(req).await;

        assert!(matches!(
            result,
            Err(BridgeError::UnknownChain(ChainId(999_999)))
        ));
        assert_eq!(ledger.submission_count(), 0);
    }

    // =============================================================================
    // STEP-ATTRIBUTED FAILURES
    // =============================================================================

    #[tokio::test]
    async fn test_approval_revert_stops_before_the_quote() {
        let ledger = Arc::new(MockLedgerClient::new());
        ledger.set_view_response(selectors::quote_send(), quote_return(QUOTED_FEE));
        ledger.revert_on(selectors::approve());
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle.clone());

        let outcome = orch.execute_transfer(request()).await.unwrap();

        assert_eq!(outcome.status, TransferStatus::Failed);
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.step, TransferStep::Approving);
        assert_eq!(failure.reason, FailureReason::ApprovalRejected);
        assert_eq!(ledger.submission_count(), 1, "no send after a dead approval");
        assert!(oracle.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_revert_is_attributed_to_the_send_step() {
        let ledger = source_ledger_with_quote();
        ledger.revert_on(selectors::send());
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle.clone());

        let outcome = orch.execute_transfer(request()).await.unwrap();

        assert_eq!(outcome.status, TransferStatus::Failed);
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.step, TransferStep::Sending);
        assert_eq!(failure.reason, FailureReason::SendRejected);
        // The reverted transaction still happened and is reported.
        assert!(outcome.send_tx.is_some());
        assert!(oracle.calls().is_empty());
    }

    #[tokio::test]
    async fn test_stalled_send_inclusion_still_reports_the_send_hash() {
        // The send is submitted but never confirms locally. It may still
        // land on-chain, so the outcome must carry its hash.
        let ledger = source_ledger_with_quote();
        ledger.stall_inclusion_on(selectors::send());
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle.clone());

        let outcome = orch.execute_transfer(request()).await.unwrap();

        assert_eq!(outcome.status, TransferStatus::Failed);
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.step, TransferStep::Sending);
        assert_eq!(failure.reason, FailureReason::InclusionTimeout);
        assert_eq!(ledger.submission_count(), 2, "approve and send both submitted");
        assert!(outcome.approval_tx.is_some());
        assert!(outcome.send_tx.is_some());
        assert!(oracle.calls().is_empty());
    }

    #[tokio::test]
    async fn test_quote_failure_leaves_only_the_approval() {
        // No scripted quoteSend response: the fee view errors out.
        let ledger = Arc::new(MockLedgerClient::new());
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = orchestrator(ledger.clone(), oracle);

        let outcome = orch.execute_transfer(request()).await.unwrap();

        assert_eq!(outcome.status, TransferStatus::Failed);
        assert_eq!(outcome.failure.unwrap().step, TransferStep::Quoting);
        assert!(outcome.approval_tx.is_some());
        assert!(outcome.send_tx.is_none());
        assert!(outcome.quoted_fee.is_none());
        assert_eq!(ledger.submission_count(), 1);
    }

    // =============================================================================
    // CONCURRENT RUNS
    // =============================================================================

    #[tokio::test]
    async fn test_concurrent_transfers_share_no_state() {
        let ledger = source_ledger_with_quote();
        let oracle = Arc::new(MockDeliveryOracle::delivering(TxHash([0xDE; 32])));
        let orch = Arc::new(orchestrator(ledger.clone(), oracle));

        let runs = (0..4).map(|_| {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move { orch.execute_transfer(request()).await })
        });
        let mut ids = Vec::new();
        for run in runs {
            let outcome = run.await.unwrap().unwrap();
            assert_eq!(outcome.status, TransferStatus::Delivered);
            ids.push(outcome.id);
        }

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4, "each run gets its own correlation id");
        assert_eq!(ledger.submission_count(), 8);
    }
}
