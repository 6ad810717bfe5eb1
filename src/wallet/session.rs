//! Wallet session lifecycle
//!
//! Owns the connected/disconnected state and the active account
//! identity. Exactly one connect attempt may be in flight at a time; a
//! second concurrent call is rejected with `SessionBusy`, not queued.

use crate::errors::FailureKind;
use crate::wallet::capability::{WalletCapability, WalletError};
use alloy_primitives::Address;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Session state snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSessionState {
    pub connected: bool,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
}

pub struct WalletSession<W>
where
    W: WalletCapability,
{
    capability: Arc<W>,
    state: RwLock<WalletSessionState>,
    connecting: AtomicBool,
}

impl<W> WalletSession<W>
where
    W: WalletCapability,
{
    pub fn new(capability: Arc<W>) -> Self {
        Self {
            capability,
            state: RwLock::new(WalletSessionState::default()),
            connecting: AtomicBool::new(false),
        }
    }

    /// Request wallet access and record the first returned account as
    /// the active identity.
    pub async fn connect(&self) -> Result<WalletSessionState, FailureKind> {
        if self
            .connecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FailureKind::SessionBusy);
        }

        // Released on drop, so an abandoned connect future cannot
        // leave the session busy forever
        let _guard = ConnectGuard(&self.connecting);
        self.do_connect().await
    }

    async fn do_connect(&self) -> Result<WalletSessionState, FailureKind> {
        let accounts = match self.capability.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                // Fatal wallet errors reset the session
                *self.state.write() = WalletSessionState::default();
                return Err(match e {
                    WalletError::Unavailable => FailureKind::WalletUnavailable,
                    WalletError::UserDeclined => FailureKind::UserRejected,
                    WalletError::Other(msg) => {
                        tracing::error!(error = %msg, "Wallet connection failed");
                        FailureKind::WalletUnavailable
                    }
                });
            }
        };

        let Some(account) = accounts.first().copied() else {
            *self.state.write() = WalletSessionState::default();
            return Err(FailureKind::WalletUnavailable);
        };

        let state = WalletSessionState {
            connected: true,
            account: Some(account),
            chain_id: None,
        };
        *self.state.write() = state.clone();

        tracing::info!(account = %account, "Wallet connected");
        Ok(state)
    }

    /// Reset to the disconnected state. Idempotent; also clears a
    /// stale in-flight marker.
    pub fn disconnect(&self) {
        let mut state = self.state.write();
        if state.connected {
            tracing::info!(account = ?state.account, "Wallet disconnected");
        }
        *state = WalletSessionState::default();
        self.connecting.store(false, Ordering::Release);
    }

    /// Record the chain the wallet is now on, after a successful switch
    pub fn mark_chain(&self, chain_id: u64) {
        self.state.write().chain_id = Some(chain_id);
    }

    pub fn current_account(&self) -> Option<Address> {
        let state = self.state.read();
        if state.connected {
            state.account
        } else {
            None
        }
    }

    pub fn state(&self) -> WalletSessionState {
        self.state.read().clone()
    }
}

/// Clears the connect-in-flight flag when the attempt ends, whether it
/// returned or was dropped mid-flight.
struct ConnectGuard<'a>(&'a AtomicBool);

impl Drop for ConnectGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
