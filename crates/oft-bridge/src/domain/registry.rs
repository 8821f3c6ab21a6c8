//! # Deployment Registry
//!
//! Static lookup from chain id to that chain's bridge contract addresses,
//! token address, and messaging endpoint. Loaded once at process start and
//! treated as immutable for the process lifetime.

use super::errors::BridgeError;
use super::value_objects::{Address, ChainId, EndpointId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-chain deployment data. Which optional fields must be populated
/// depends on the role the chain plays in an operation: a transfer *source*
/// needs `bridge_adapter` and `token`; a transfer *destination* needs
/// `remote_token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// EVM chain id.
    pub chain_id: ChainId,
    /// Human-readable network name.
    pub network: String,
    /// ERC-20 token locked on this chain when it is a transfer source.
    #[serde(default)]
    pub token: Option<Address>,
    /// Adapter contract that escrows the token and emits bridge messages.
    #[serde(default)]
    pub bridge_adapter: Option<Address>,
    /// OFT-style token contract minting on this chain as a destination.
    #[serde(default)]
    pub remote_token: Option<Address>,
    /// Local messaging endpoint contract.
    pub endpoint: Address,
    /// Messaging endpoint id (not the chain id).
    pub endpoint_id: EndpointId,
}

impl ChainConfig {
    /// Bridge adapter, required when this chain sources a transfer or peers.
    pub fn bridge_adapter(&self) -> Result<Address, BridgeError> {
        self.bridge_adapter.ok_or(BridgeError::IncompleteConfig {
            chain: self.chain_id,
            field: "bridge_adapter",
        })
    }

    /// Source-side ERC-20 token, required when this chain sources a transfer.
    pub fn token(&self) -> Result<Address, BridgeError> {
        self.token.ok_or(BridgeError::IncompleteConfig {
            chain: self.chain_id,
            field: "token",
        })
    }

    /// Destination-side OFT token, required when this chain receives.
    pub fn remote_token(&self) -> Result<Address, BridgeError> {
        self.remote_token.ok_or(BridgeError::IncompleteConfig {
            chain: self.chain_id,
            field: "remote_token",
        })
    }
}

/// Immutable chain-id → deployment lookup. Pure data; no behavior beyond
/// resolution.
#[derive(Clone, Debug, Default)]
pub struct DeploymentRegistry {
    chains: HashMap<ChainId, ChainConfig>,
}

impl DeploymentRegistry {
    /// Build a registry from explicit configs.
    pub fn new(configs: impl IntoIterator<Item = ChainConfig>) -> Self {
        Self {
            chains: configs.into_iter().map(|c| (c.chain_id, c)).collect(),
        }
    }

    /// Load from a JSON array of chain configs.
    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        let configs: Vec<ChainConfig> = serde_json::from_str(json)
            .map_err(|e| BridgeError::Decode(format!("bad registry json: {e}")))?;
        Ok(Self::new(configs))
    }

    /// Resolve a chain id or fail with `UnknownChain`.
    pub fn resolve(&self, chain: ChainId) -> Result<&ChainConfig, BridgeError> {
        self.chains.get(&chain).ok_or(BridgeError::UnknownChain(chain))
    }

    /// Chains currently registered.
    pub fn chain_ids(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.chains.keys().copied()
    }

    /// The testnet deployment table: base-sepolia escrows the ERC-20 behind
    /// an adapter; sonic-blaze and holesky carry the OFT token mint.
    pub fn testnet() -> Self {
        fn addr(hex: &str) -> Address {
            Address::from_hex(hex).expect("static testnet address")
        }

        Self::new([
            ChainConfig {
                chain_id: ChainId(84532),
                network: "base-sepolia".to_string(),
                token: Some(addr("0x4801E23D9aBeA9e18538eBF95631BE0724eC148f")),
                bridge_adapter: Some(addr("0xA99bFF98db7A93A40935D85E5F5A2D4E99CF47d8")),
                remote_token: None,
                endpoint: addr("0x6EDCE65403992e310A62460808c4b910D972f10f"),
                endpoint_id: EndpointId(40245),
            },
            ChainConfig {
                chain_id: ChainId(57054),
                network: "sonic-blaze-testnet".to_string(),
                token: None,
                bridge_adapter: None,
                remote_token: Some(addr("0xBFff78BB02925E4D8671D0d90B2a6330fcAedd87")),
                endpoint: addr("0x6C7Ab2202C98C4227C5c46f1417D81144DA716Ff"),
                endpoint_id: EndpointId(40349),
            },
            ChainConfig {
                chain_id: ChainId(17000),
                network: "holesky".to_string(),
                token: None,
                bridge_adapter: None,
                remote_token: Some(addr("0x72105396D6b1c1378581D5Be21683A6470c1F2aE")),
                endpoint: addr("0x6EDCE65403992e310A62460808c4b910D972f10f"),
                endpoint_id: EndpointId(40217),
            },
        ])
    }
}
