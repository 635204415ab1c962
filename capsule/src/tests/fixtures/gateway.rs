use std::{collections::BTreeSet, sync::Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::{
    error::GatewayError,
    gateway::{ChainGateway, GatewayResult, MintRequest, TxHash, TxStatus},
    record::{Address, CapsuleId, CapsuleRecord},
};

/// A canned gateway: serves the records it was given, records write calls
/// and fails reads of any id in `broken`
#[derive(Default)]
pub struct FixtureGateway {
    pub records: Vec<CapsuleRecord>,
    pub broken: BTreeSet<CapsuleId>,
    pub offline: bool,
    pub minted: Mutex<Vec<MintRequest>>,
    pub gifted: Mutex<Vec<(CapsuleId, Address)>>,
}

impl FixtureGateway {
    pub fn with_records(records: Vec<CapsuleRecord>) -> Self {
        FixtureGateway {
            records,
            ..Default::default()
        }
    }

    pub fn offline() -> Self {
        FixtureGateway {
            offline: true,
            ..Default::default()
        }
    }

    fn check_online(&self) -> GatewayResult<()> {
        match self.offline {
            true => Err(GatewayError::Transport(anyhow!("RPC endpoint unreachable"))),
            false => Ok(()),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChainGateway for FixtureGateway {
    async fn mint(&self, request: MintRequest) -> GatewayResult<TxHash> {
        self.check_online()?;
        let mut minted = self.minted.lock().unwrap();
        minted.push(request);
        Ok(TxHash(format!("0xmint{}", minted.len())))
    }

    async fn unlock(&self, id: CapsuleId) -> GatewayResult<TxHash> {
        self.check_online()?;
        let record = self.get_capsule(id).await?;
        match record.is_opened {
            true => Err(GatewayError::AlreadyOpened),
            false => Ok(TxHash(format!("0xunlock{id}"))),
        }
    }

    async fn gift(&self, id: CapsuleId, recipient: &Address) -> GatewayResult<TxHash> {
        self.check_online()?;
        self.gifted.lock().unwrap().push((id, recipient.clone()));
        Ok(TxHash(format!("0xgift{id}")))
    }

    async fn get_capsule(&self, id: CapsuleId) -> GatewayResult<CapsuleRecord> {
        self.check_online()?;
        if self.broken.contains(&id) {
            return Err(GatewayError::Transport(anyhow!("Timed out reading {id}")));
        }

        self.records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(GatewayError::NotFound(id))
    }

    async fn get_owned_capsule_ids(&self, owner: &Address) -> GatewayResult<Vec<CapsuleId>> {
        self.check_online()?;
        Ok(self
            .records
            .iter()
            .filter(|record| &record.recipient == owner)
            .map(|record| record.id)
            .chain(self.broken.iter().copied())
            .collect())
    }

    async fn get_all_capsules(&self) -> GatewayResult<Vec<CapsuleRecord>> {
        self.check_online()?;
        Ok(self.records.clone())
    }

    async fn transaction_status(&self, _tx: &TxHash) -> GatewayResult<TxStatus> {
        self.check_online()?;
        Ok(TxStatus::Confirmed { block_number: 1 })
    }
}
