//! # Security-Stack Flows
//!
//! Applying DVN/executor policy to an endpoint contract through the real
//! calldata builder, with the transaction captured and inspected.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use oft_bridge::adapters::endpoint::{EXECUTOR_CONFIG_TYPE, SIG_SET_CONFIG, ULN_CONFIG_TYPE};
    use oft_bridge::codec::abi::selector;
    use oft_bridge::{
        Address, BridgeError, ChainId, DeploymentRegistry, EndpointId, MockLedgerClient,
        SecurityConfigApi, SecurityStackConfig, SecurityStackConfigurator,
    };
    use primitive_types::U256;

    fn config_for_sonic() -> SecurityStackConfig {
        SecurityStackConfig {
            remote_eid: EndpointId(40349),
            required_validators: vec![
                Address::from_hex("0x88b27057a9e00c5f05dda29241027aff63f9e6e0").unwrap()
            ],
            optional_validators: vec![],
            validator_threshold: 0,
            required_confirmations: 99,
            executor: Address::from_hex("0xcfa038455b54714821f291814071161c9870B891").unwrap(),
            max_message_size: 10_000,
        }
    }

    #[tokio::test]
    async fn test_policy_lands_on_the_endpoint_contract() {
        let registry = DeploymentRegistry::testnet();
        let base = registry.resolve(ChainId(84532)).unwrap();
        let ledger = Arc::new(MockLedgerClient::new());
        let cfg = SecurityStackConfigurator::new(ledger.clone());

        let outcome = cfg
            .apply_security_stack(
                base.endpoint,
                base.bridge_adapter().unwrap(),
                Address([0xD6; 20]),
                &config_for_sonic(),
            )
            .await
            .unwrap();

        let txs = ledger.submissions();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].to, base.endpoint);
        assert_eq!(txs[0].selector(), selector(SIG_SET_CONFIG));
        assert_eq!(txs[0].value, U256::zero());
        assert_eq!(outcome.tx.0[24..], [0u8; 8]);
    }

    #[tokio::test]
    async fn test_calldata_carries_both_policy_structs() {
        let ledger = Arc::new(MockLedgerClient::new());
        let cfg = SecurityStackConfigurator::new(ledger.clone());

        cfg.apply_security_stack(
            Address([0x6E; 20]),
            Address([0xA9; 20]),
            Address([0xD6; 20]),
            &config_for_sonic(),
        )
        .await
        .unwrap();

        let data = ledger.submissions()[0].data.clone();
        // head: oapp, sendLib, offset to the params array; array length 2.
        assert_eq!(U256::from_big_endian(&data[100..132]), U256::from(2u64));
        let elems = &data[132..];
        let off0 = U256::from_big_endian(&elems[..32]).as_usize();
        let off1 = U256::from_big_endian(&elems[32..64]).as_usize();
        assert_eq!(
            U256::from_big_endian(&elems[off0 + 32..off0 + 64]),
            U256::from(ULN_CONFIG_TYPE)
        );
        assert_eq!(
            U256::from_big_endian(&elems[off1 + 32..off1 + 64]),
            U256::from(EXECUTOR_CONFIG_TYPE)
        );
        // both entries tagged with the remote eid
        assert_eq!(
            U256::from_big_endian(&elems[off0..off0 + 32]),
            U256::from(40349u64)
        );
        assert_eq!(
            U256::from_big_endian(&elems[off1..off1 + 32]),
            U256::from(40349u64)
        );
    }

    #[tokio::test]
    async fn test_reverted_policy_write_is_an_error() {
        let ledger = Arc::new(MockLedgerClient::new());
        ledger.revert_on(selector(SIG_SET_CONFIG));
        let cfg = SecurityStackConfigurator::new(ledger);

        let result = cfg
            .apply_security_stack(
                Address([0x6E; 20]),
                Address([0xA9; 20]),
                Address([0xD6; 20]),
                &config_for_sonic(),
            )
            .await;

        assert!(matches!(result, Err(BridgeError::ConfigRejected(_))));
    }

    #[tokio::test]
    async fn test_validator_free_policy_never_reaches_the_chain() {
        let ledger = Arc::new(MockLedgerClient::new());
        let cfg = SecurityStackConfigurator::new(ledger.clone());

        let mut bad = config_for_sonic();
        bad.required_validators.clear();
        let result = cfg
            .apply_security_stack(
                Address([0x6E; 20]),
                Address([0xA9; 20]),
                Address([0xD6; 20]),
                &bad,
            )
            .await;

        assert!(matches!(result, Err(BridgeError::InvalidRequest(_))));
        assert_eq!(ledger.submission_count(), 0);
    }
}
