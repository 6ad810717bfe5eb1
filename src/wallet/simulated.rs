//! Deterministic wallet double
//!
//! Implements `WalletCapability` with scripted behavior so session,
//! guard and claim flows can be exercised without a real wallet. Real
//! wallet bridges live outside this crate; this is the only in-crate
//! implementation.

use crate::config::NetworkConfig;
use crate::wallet::capability::{
    ClaimReceipt, SubmitError, SwitchChainError, WalletCapability, WalletError,
};
use alloy::rpc::types::TransactionRequest;
use alloy_primitives::{Address, B256};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// Scripted wallet capability for tests and dry runs
#[derive(Default)]
pub struct SimulatedWallet {
    accounts: Vec<Address>,
    decline_connect: bool,
    unavailable: bool,
    connect_delay_ms: u64,
    /// Outcomes popped per switch call; once drained, switching succeeds
    switch_script: Mutex<VecDeque<Result<(), SwitchChainError>>>,
    register_error: Option<WalletError>,
    submit_error: Option<SubmitError>,
    confirm_error: Option<SubmitError>,
    failed_receipt: bool,
    registered: Mutex<Vec<NetworkConfig>>,
    submitted: Mutex<Vec<TransactionRequest>>,
    switch_calls: Mutex<u32>,
    confirm_calls: Mutex<u32>,
}

impl SimulatedWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(mut self, accounts: Vec<Address>) -> Self {
        self.accounts = accounts;
        self
    }

    pub fn with_declined_connect(mut self) -> Self {
        self.decline_connect = true;
        self
    }

    pub fn with_unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn with_connect_delay_ms(mut self, millis: u64) -> Self {
        self.connect_delay_ms = millis;
        self
    }

    /// Queue switch-chain outcomes, consumed one per call
    pub fn with_switch_script(self, outcomes: Vec<Result<(), SwitchChainError>>) -> Self {
        *self.switch_script.lock() = outcomes.into();
        self
    }

    pub fn with_register_error(mut self, error: WalletError) -> Self {
        self.register_error = Some(error);
        self
    }

    pub fn with_submit_error(mut self, error: SubmitError) -> Self {
        self.submit_error = Some(error);
        self
    }

    pub fn with_confirm_error(mut self, error: SubmitError) -> Self {
        self.confirm_error = Some(error);
        self
    }

    /// Confirmations report a mined-but-reverted transaction
    pub fn with_failed_receipt(mut self) -> Self {
        self.failed_receipt = true;
        self
    }

    pub fn registered_chains(&self) -> Vec<NetworkConfig> {
        self.registered.lock().clone()
    }

    pub fn submitted_transactions(&self) -> Vec<TransactionRequest> {
        self.submitted.lock().clone()
    }

    pub fn switch_attempts(&self) -> u32 {
        *self.switch_calls.lock()
    }

    pub fn confirmation_waits(&self) -> u32 {
        *self.confirm_calls.lock()
    }
}

#[async_trait::async_trait]
impl WalletCapability for SimulatedWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.connect_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.connect_delay_ms)).await;
        }
        if self.unavailable {
            return Err(WalletError::Unavailable);
        }
        if self.decline_connect {
            return Err(WalletError::UserDeclined);
        }
        Ok(self.accounts.clone())
    }

    async fn switch_chain(&self, _chain_id: u64) -> Result<(), SwitchChainError> {
        *self.switch_calls.lock() += 1;
        self.switch_script.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn register_chain(&self, descriptor: &NetworkConfig) -> Result<(), WalletError> {
        if let Some(error) = &self.register_error {
            return Err(error.clone());
        }
        self.registered.lock().push(descriptor.clone());
        Ok(())
    }

    async fn sign_and_submit(&self, tx: TransactionRequest) -> Result<B256, SubmitError> {
        if let Some(error) = &self.submit_error {
            return Err(error.clone());
        }
        let mut submitted = self.submitted.lock();
        submitted.push(tx);
        Ok(B256::with_last_byte(submitted.len() as u8))
    }

    async fn await_confirmation(&self, tx_hash: B256) -> Result<ClaimReceipt, SubmitError> {
        *self.confirm_calls.lock() += 1;
        if let Some(error) = &self.confirm_error {
            return Err(error.clone());
        }
        Ok(ClaimReceipt {
            tx_hash,
            block_number: 100,
            success: !self.failed_receipt,
        })
    }
}
