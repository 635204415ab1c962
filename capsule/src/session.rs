use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    builder::CapsuleContentBuilder,
    codec,
    config::NetworkConfig,
    content::CapsuleContent,
    error::{SessionError, ValidationError},
    gateway::{ChainGateway, LockCondition, MintRequest, TxHash, TxStatus},
    manager::OwnedCapsules,
    record::{Address, CapsuleId, Visibility},
};

/// The account a wallet exposes once connected
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    pub address: Address,
    pub chain_id: u64,
}

#[cfg(not(target_arch = "wasm32"))]
pub trait WalletConditionalSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<W> WalletConditionalSendSync for W where W: WalletConnector + Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait WalletConditionalSendSync {}

#[cfg(target_arch = "wasm32")]
impl<W> WalletConditionalSendSync for W where W: WalletConnector {}

/// A wallet that can be connected to and disconnected from
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait WalletConnector: WalletConditionalSendSync {
    async fn connect(&self) -> Result<WalletAccount>;

    async fn disconnect(&self) -> Result<()>;
}

/// A connected wallet together with the gateway its writes go through.
///
/// A session exists from a successful [`Session::connect`] until
/// [`Session::disconnect`] consumes it; everything that needs the user's
/// account takes the session explicitly.
pub struct Session<W, G>
where
    W: WalletConnector,
    G: ChainGateway,
{
    wallet: W,
    gateway: G,
    account: WalletAccount,
    config: NetworkConfig,
}

impl<W, G> Session<W, G>
where
    W: WalletConnector,
    G: ChainGateway,
{
    pub async fn connect(wallet: W, gateway: G, config: NetworkConfig) -> Result<Self, SessionError> {
        let account = wallet.connect().await.map_err(SessionError::Wallet)?;

        if account.chain_id != config.chain_id {
            // Leave the wallet as we found it
            if let Err(error) = wallet.disconnect().await {
                warn!("Wallet refused to disconnect after chain mismatch: {error}");
            }
            return Err(SessionError::WrongChain {
                expected: config.chain_id,
                actual: account.chain_id,
            });
        }

        info!("Connected {} on chain {}", account.address, account.chain_id);

        Ok(Session {
            wallet,
            gateway,
            account,
            config,
        })
    }

    pub async fn disconnect(self) -> Result<(), SessionError> {
        info!("Disconnecting {}", self.account.address);
        self.wallet.disconnect().await.map_err(SessionError::Wallet)
    }

    pub fn address(&self) -> &Address {
        &self.account.address
    }

    pub fn account(&self) -> &WalletAccount {
        &self.account
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// A content builder pre-stamped with this session's creator and network
    pub fn content_builder(&self) -> CapsuleContentBuilder {
        CapsuleContentBuilder::default()
            .created_by(&self.account.address)
            .on_network(&self.config.network)
            .with_version(&self.config.content_version)
    }

    /// Validate, encode and mint a capsule from a builder
    pub async fn mint_capsule(
        &self,
        builder: CapsuleContentBuilder,
        lock: LockCondition,
        visibility: Visibility,
    ) -> Result<TxHash, SessionError> {
        let content = builder.build()?;
        self.mint_content(&content, lock, visibility).await
    }

    /// Encode and mint already-built content
    pub async fn mint_content(
        &self,
        content: &CapsuleContent,
        lock: LockCondition,
        visibility: Visibility,
    ) -> Result<TxHash, SessionError> {
        let content_uri = codec::encode(content).map_err(SessionError::Encoding)?;

        let request = MintRequest {
            content_uri,
            unlock_value: lock.unlock_value(),
            lock_type: lock.lock_type(),
            visibility,
        };

        Ok(self.gateway.mint(request).await?)
    }

    pub async fn unlock_capsule(&self, id: CapsuleId) -> Result<TxHash, SessionError> {
        Ok(self.gateway.unlock(id).await?)
    }

    pub async fn gift_capsule(&self, id: CapsuleId, recipient: &str) -> Result<TxHash, SessionError> {
        let recipient: Address = recipient.parse()?;
        if recipient == self.account.address {
            return Err(ValidationError::SelfGift.into());
        }

        Ok(self.gateway.gift(id, &recipient).await?)
    }

    pub async fn transaction_status(&self, tx: &TxHash) -> Result<TxStatus, SessionError> {
        Ok(self.gateway.transaction_status(tx).await?)
    }

    /// The capsules currently held by this session's account
    pub async fn owned_capsules(&self) -> Result<OwnedCapsules, SessionError> {
        Ok(OwnedCapsules::load(&self.gateway, &self.account.address).await?)
    }
}
