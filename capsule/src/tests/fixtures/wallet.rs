use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use crate::session::{WalletAccount, WalletConnector};

pub struct FixtureWallet {
    pub account: WalletAccount,
    pub connected: AtomicBool,
}

impl FixtureWallet {
    pub fn new(account: WalletAccount) -> Self {
        FixtureWallet {
            account,
            connected: AtomicBool::new(false),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<'a> WalletConnector for &'a FixtureWallet {
    async fn connect(&self) -> Result<WalletAccount> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(self.account.clone())
    }

    async fn disconnect(&self) -> Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}
