use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use capsule::{
    record::Address,
    session::{WalletAccount, WalletConnector},
};

/// A wallet that always connects to the same account. Connecting twice
/// without disconnecting is refused, as browser wallets do.
pub struct StaticWallet {
    account: WalletAccount,
    connected: AtomicBool,
}

impl StaticWallet {
    pub fn new(address: Address, chain_id: u64) -> Self {
        StaticWallet {
            account: WalletAccount { address, chain_id },
            connected: AtomicBool::new(false),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl WalletConnector for StaticWallet {
    async fn connect(&self) -> Result<WalletAccount> {
        if self.connected.swap(true, Ordering::SeqCst) {
            return Err(anyhow!("Wallet is already connected"));
        }

        debug!("Static wallet connected as {}", self.account.address);
        Ok(self.account.clone())
    }

    async fn disconnect(&self) -> Result<()> {
        match self.connected.swap(false, Ordering::SeqCst) {
            true => Ok(()),
            false => Err(anyhow!("Wallet is not connected")),
        }
    }
}
