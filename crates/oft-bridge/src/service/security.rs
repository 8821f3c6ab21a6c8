//! # Security-Stack Configurator
//!
//! Pushes the validator and executor policy for one message channel to the
//! local endpoint contract. A deliberate overwrite: operators change policy
//! on purpose, so there is no read-before-write here.

use crate::adapters::endpoint;
use crate::domain::{Address, BridgeError, ConfigOutcome, SecurityStackConfig};
use crate::ports::{LedgerClient, SecurityConfigApi};
use async_trait::async_trait;
use primitive_types::U256;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Applies a [`SecurityStackConfig`] through a single ledger client. The
/// endpoint lives on one chain; callers construct one configurator per
/// chain they administer.
pub struct SecurityStackConfigurator {
    ledger: Arc<dyn LedgerClient>,
    inclusion_timeout: Duration,
}

impl SecurityStackConfigurator {
    /// Create a configurator with the default inclusion bound.
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self::with_inclusion_timeout(ledger, Duration::from_secs(120))
    }

    /// Create with an explicit inclusion bound.
    pub fn with_inclusion_timeout(ledger: Arc<dyn LedgerClient>, inclusion_timeout: Duration) -> Self {
        Self {
            ledger,
            inclusion_timeout,
        }
    }
}

#[async_trait]
impl SecurityConfigApi for SecurityStackConfigurator {
    async fn apply_security_stack(
        &self,
        endpoint_addr: Address,
        oapp: Address,
        send_library: Address,
        config: &SecurityStackConfig,
    ) -> Result<ConfigOutcome, BridgeError> {
        if config.required_validators.is_empty() && config.optional_validators.is_empty() {
            return Err(BridgeError::InvalidRequest(
                "security stack needs at least one validator".to_string(),
            ));
        }
        if config.validator_threshold as usize > config.optional_validators.len() {
            return Err(BridgeError::InvalidRequest(format!(
                "validator threshold {} exceeds optional validator count {}",
                config.validator_threshold,
                config.optional_validators.len()
            )));
        }

        let data = endpoint::set_config(oapp, send_library, config);
        let tx = self
            .ledger
            .submit_transaction(endpoint_addr, data, U256::zero())
            .await?;
        let receipt = self.ledger.wait_for_inclusion(tx, self.inclusion_timeout).await?;
        if !receipt.success {
            return Err(BridgeError::ConfigRejected(format!(
                "setConfig for eid {} reverted in {}",
                config.remote_eid, receipt.tx_hash
            )));
        }
        info!(
            "[bridge] security stack for eid {} applied in {}",
            config.remote_eid, receipt.tx_hash
        );
        Ok(ConfigOutcome {
            tx: receipt.tx_hash,
        })
    }
}
