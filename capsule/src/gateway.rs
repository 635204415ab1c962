use std::fmt;

use async_trait::async_trait;
use futures::future::join_all;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::GatewayError,
    record::{Address, CapsuleId, CapsuleRecord, LockType, Visibility},
};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Hash of a submitted transaction
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TxStatus {
    Pending,
    Confirmed { block_number: u64 },
    Reverted { reason: String },
}

/// Arguments of the contract's mint call
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub content_uri: String,
    /// Unix seconds or block height, depending on `lock_type`
    pub unlock_value: u64,
    pub lock_type: LockType,
    pub visibility: Visibility,
}

/// When a capsule being minted should become unlockable
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockCondition {
    /// Unix seconds
    At(u64),
    /// Block height
    AtBlock(u64),
    /// Opened by a community vote held by the contract. Minted as a
    /// block-based lock at height zero.
    CommunityVote,
}

impl LockCondition {
    pub fn lock_type(&self) -> LockType {
        match self {
            LockCondition::At(_) => LockType::TimeBased,
            LockCondition::AtBlock(_) | LockCondition::CommunityVote => LockType::BlockBased,
        }
    }

    pub fn unlock_value(&self) -> u64 {
        match self {
            LockCondition::At(value) | LockCondition::AtBlock(value) => *value,
            LockCondition::CommunityVote => 0,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub trait GatewayConditionalSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<G> GatewayConditionalSendSync for G where G: ChainGateway + Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait GatewayConditionalSendSync {}

#[cfg(target_arch = "wasm32")]
impl<G> GatewayConditionalSendSync for G where G: ChainGateway {}

/// Read/write access to the capsule registry contract. Writes are signed by
/// whatever account the implementation is bound to.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait ChainGateway: GatewayConditionalSendSync {
    async fn mint(&self, request: MintRequest) -> GatewayResult<TxHash>;

    async fn unlock(&self, id: CapsuleId) -> GatewayResult<TxHash>;

    async fn gift(&self, id: CapsuleId, recipient: &Address) -> GatewayResult<TxHash>;

    async fn get_capsule(&self, id: CapsuleId) -> GatewayResult<CapsuleRecord>;

    async fn get_owned_capsule_ids(&self, owner: &Address) -> GatewayResult<Vec<CapsuleId>>;

    async fn get_all_capsules(&self) -> GatewayResult<Vec<CapsuleRecord>>;

    async fn transaction_status(&self, tx: &TxHash) -> GatewayResult<TxStatus>;

    /// Fetch several capsules concurrently. Results keep the order of `ids`;
    /// ids that fail to load are logged and left out.
    async fn fetch_many(&self, ids: &[CapsuleId]) -> Vec<CapsuleRecord> {
        let fetches = ids.iter().map(|id| self.get_capsule(*id));

        join_all(fetches)
            .await
            .into_iter()
            .zip(ids)
            .filter_map(|(result, id)| match result {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!("Could not fetch capsule {id}: {error}");
                    None
                }
            })
            .collect()
    }
}
