//! Network guard
//!
//! Ensures the connected wallet is on the required network before any
//! contract interaction. Fallback chain, keyed on the wallet's
//! structured switch-chain codes:
//!
//! 1. switch succeeds
//! 2. chain unknown to the wallet: register it, retry the switch once
//! 3. switching unsupported: proceed with a warning marker, since some
//!    wallets are permanently on a single chain
//!
//! Everything else is a `NetworkError`.

use crate::config::NetworkConfig;
use crate::errors::FailureKind;
use crate::wallet::{SwitchChainError, WalletCapability};
use std::sync::Arc;

/// Success-path outcome of the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    /// The wallet is now on the required chain
    Switched,
    /// The wallet cannot switch chains; the flow proceeds, but the
    /// caller should surface this as a non-fatal warning
    SwitchUnsupported,
}

pub struct ChainGuard<W>
where
    W: WalletCapability,
{
    capability: Arc<W>,
    network: NetworkConfig,
}

impl<W> ChainGuard<W>
where
    W: WalletCapability,
{
    pub fn new(capability: Arc<W>, network: NetworkConfig) -> Self {
        Self {
            capability,
            network,
        }
    }

    pub fn required_chain_id(&self) -> u64 {
        self.network.chain_id
    }

    /// Request a switch to the required network, registering it with
    /// the wallet first if unknown.
    pub async fn ensure_network(&self) -> Result<NetworkStatus, FailureKind> {
        let chain_id = self.network.chain_id;

        match self.capability.switch_chain(chain_id).await {
            Ok(()) => {
                tracing::debug!(chain_id, "Wallet switched to required chain");
                Ok(NetworkStatus::Switched)
            }
            Err(SwitchChainError::UnrecognizedChain) => {
                tracing::info!(
                    chain_id,
                    chain_name = %self.network.chain_name,
                    "Chain unknown to wallet, registering network definition"
                );
                self.capability
                    .register_chain(&self.network)
                    .await
                    .map_err(|e| FailureKind::NetworkError {
                        chain_id,
                        cause: format!("network registration failed: {}", e),
                    })?;

                // One retry after registration
                match self.capability.switch_chain(chain_id).await {
                    Ok(()) => Ok(NetworkStatus::Switched),
                    Err(SwitchChainError::Unsupported) => {
                        tracing::warn!(chain_id, "Wallet cannot switch chains, proceeding anyway");
                        Ok(NetworkStatus::SwitchUnsupported)
                    }
                    Err(e) => Err(FailureKind::NetworkError {
                        chain_id,
                        cause: format!("switch failed after registration: {}", e),
                    }),
                }
            }
            Err(SwitchChainError::Unsupported) => {
                tracing::warn!(chain_id, "Wallet cannot switch chains, proceeding anyway");
                Ok(NetworkStatus::SwitchUnsupported)
            }
            Err(e) => Err(FailureKind::NetworkError {
                chain_id,
                cause: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AirdropConfig;
    use crate::wallet::{SimulatedWallet, WalletError};

    fn base_network() -> NetworkConfig {
        AirdropConfig::default().network
    }

    #[tokio::test]
    async fn switch_success() {
        let wallet = Arc::new(SimulatedWallet::new());
        let guard = ChainGuard::new(Arc::clone(&wallet), base_network());

        let status = guard.ensure_network().await.unwrap();
        assert_eq!(status, NetworkStatus::Switched);
        assert_eq!(wallet.switch_attempts(), 1);
        assert!(wallet.registered_chains().is_empty());
    }

    #[tokio::test]
    async fn unknown_chain_is_registered_then_retried() {
        let wallet = Arc::new(
            SimulatedWallet::new()
                .with_switch_script(vec![Err(SwitchChainError::UnrecognizedChain), Ok(())]),
        );
        let guard = ChainGuard::new(Arc::clone(&wallet), base_network());

        let status = guard.ensure_network().await.unwrap();
        assert_eq!(status, NetworkStatus::Switched);
        assert_eq!(wallet.switch_attempts(), 2);

        let registered = wallet.registered_chains();
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].chain_id, 8453);
    }

    #[tokio::test]
    async fn unsupported_switch_is_a_warning_not_an_error() {
        let wallet = Arc::new(
            SimulatedWallet::new().with_switch_script(vec![Err(SwitchChainError::Unsupported)]),
        );
        let guard = ChainGuard::new(Arc::clone(&wallet), base_network());

        let status = guard.ensure_network().await.unwrap();
        assert_eq!(status, NetworkStatus::SwitchUnsupported);
    }

    #[tokio::test]
    async fn declined_switch_is_a_network_error() {
        let wallet = Arc::new(
            SimulatedWallet::new().with_switch_script(vec![Err(SwitchChainError::UserDeclined)]),
        );
        let guard = ChainGuard::new(Arc::clone(&wallet), base_network());

        let err = guard.ensure_network().await.unwrap_err();
        assert!(matches!(err, FailureKind::NetworkError { chain_id: 8453, .. }));
    }

    #[tokio::test]
    async fn failed_registration_is_a_network_error() {
        let wallet = Arc::new(
            SimulatedWallet::new()
                .with_switch_script(vec![Err(SwitchChainError::UnrecognizedChain)])
                .with_register_error(WalletError::UserDeclined),
        );
        let guard = ChainGuard::new(Arc::clone(&wallet), base_network());

        let err = guard.ensure_network().await.unwrap_err();
        assert!(matches!(err, FailureKind::NetworkError { .. }));
    }

    #[tokio::test]
    async fn failed_retry_after_registration_is_a_network_error() {
        let wallet = Arc::new(SimulatedWallet::new().with_switch_script(vec![
            Err(SwitchChainError::UnrecognizedChain),
            Err(SwitchChainError::UserDeclined),
        ]));
        let guard = ChainGuard::new(Arc::clone(&wallet), base_network());

        let err = guard.ensure_network().await.unwrap_err();
        assert!(matches!(err, FailureKind::NetworkError { .. }));
        assert_eq!(wallet.registered_chains().len(), 1);
    }
}
