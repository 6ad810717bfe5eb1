use crate::errors::FailureKind;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropConfig {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub batch: BatchConfig,
}

/// Network definition, exactly the payload needed to register the chain
/// with a wallet that does not know it yet (name, native currency, RPC
/// endpoint, explorer URL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_url: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
    pub explorer_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Airdrop contract address
    pub address: String,
    /// Symbol of the distributed token
    pub token_symbol: String,
    /// Fixed-point decimals of the on-chain allocation values
    pub token_decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum in-flight resolutions per batch
    pub concurrency: usize,
}

impl AirdropConfig {
    pub async fn load_from_file(path: &Path) -> eyre::Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Parse the configured contract address
    pub fn contract_address(&self) -> Result<Address, FailureKind> {
        crate::address::validate(&self.contract.address)
    }
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                chain_id: 8453,
                chain_name: "Base Mainnet".to_string(),
                rpc_url: "https://base-rpc.publicnode.com".to_string(),
                currency_name: "Ether".to_string(),
                currency_symbol: "ETH".to_string(),
                currency_decimals: 18,
                explorer_url: "https://basescan.org".to_string(),
            },
            contract: ContractConfig {
                address: "0x0000000002ba96C69b95E32CAAB8fc38bAB8B3F8".to_string(),
                token_symbol: "ZORA".to_string(),
                token_decimals: 18,
            },
            batch: BatchConfig { concurrency: 4 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_base() {
        let config = AirdropConfig::default();
        assert_eq!(config.network.chain_id, 8453);
        assert_eq!(config.contract.token_symbol, "ZORA");
        assert!(config.contract_address().is_ok());
        assert!(config.batch.concurrency >= 1);
    }

    #[test]
    fn serde_round_trip() {
        let config = AirdropConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AirdropConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.network.rpc_url, config.network.rpc_url);
        assert_eq!(back.contract.address, config.contract.address);
    }

    #[tokio::test]
    async fn load_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!("airdrop-config-{}.json", std::process::id()));
        let json = serde_json::to_string_pretty(&AirdropConfig::default()).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let loaded = AirdropConfig::load_from_file(&path).await.unwrap();
        assert_eq!(loaded.network.chain_id, 8453);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[test]
    fn bad_contract_address_is_reported() {
        let mut config = AirdropConfig::default();
        config.contract.address = "0x1234".to_string();
        assert!(matches!(
            config.contract_address(),
            Err(FailureKind::InvalidAddress { .. })
        ));
    }
}
