use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::anyhow;
use async_trait::async_trait;

use capsule::{
    error::GatewayError,
    gateway::{ChainGateway, GatewayResult, MintRequest, TxHash, TxStatus},
    record::{Address, CapsuleId, CapsuleRecord, LockType},
    time::now,
};

#[derive(Debug, Default)]
struct Ledger {
    capsules: BTreeMap<CapsuleId, CapsuleRecord>,
    transactions: HashMap<TxHash, TxStatus>,
    next_id: CapsuleId,
    block_number: u64,
    clock: Option<u64>,
}

impl Ledger {
    fn now(&self) -> u64 {
        self.clock.unwrap_or_else(now)
    }

    /// Every accepted write lands in its own block
    fn confirm(&mut self) -> TxHash {
        self.block_number += 1;
        let tx = TxHash(format!("0x{:064x}", self.transactions.len() + 1));
        self.transactions.insert(
            tx.clone(),
            TxStatus::Confirmed {
                block_number: self.block_number,
            },
        );
        tx
    }

    fn held_by(&mut self, id: CapsuleId, signer: &Address) -> GatewayResult<&mut CapsuleRecord> {
        let record = self
            .capsules
            .get_mut(&id)
            .ok_or(GatewayError::NotFound(id))?;

        match &record.recipient == signer {
            true => Ok(record),
            false => Err(GatewayError::NotOwner(id)),
        }
    }
}

/// An in-process stand-in for the capsule registry contract.
///
/// Clones share one ledger. Each clone may be bound to a different signer
/// with [`MemoryGateway::signed_by`], which lets several accounts act on the
/// same capsules. Time-based locks are judged against the wall clock unless
/// [`MemoryGateway::set_time`] pins it; block-based locks against a block
/// height that grows by one per accepted write and by
/// [`MemoryGateway::advance_blocks`].
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    ledger: Arc<Mutex<Ledger>>,
    signer: Option<Address>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the same ledger whose writes are signed by `signer`
    pub fn signed_by(&self, signer: &Address) -> Self {
        MemoryGateway {
            ledger: self.ledger.clone(),
            signer: Some(signer.clone()),
        }
    }

    pub fn set_time(&self, now: u64) -> GatewayResult<()> {
        self.ledger()?.clock = Some(now);
        Ok(())
    }

    pub fn advance_blocks(&self, blocks: u64) -> GatewayResult<()> {
        self.ledger()?.block_number += blocks;
        Ok(())
    }

    pub fn block_number(&self) -> GatewayResult<u64> {
        Ok(self.ledger()?.block_number)
    }

    fn ledger(&self) -> GatewayResult<MutexGuard<'_, Ledger>> {
        self.ledger
            .lock()
            .map_err(|_| GatewayError::Transport(anyhow!("Ledger lock poisoned")))
    }

    fn signer(&self) -> GatewayResult<&Address> {
        self.signer.as_ref().ok_or(GatewayError::NoSigner)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChainGateway for MemoryGateway {
    async fn mint(&self, request: MintRequest) -> GatewayResult<TxHash> {
        let signer = self.signer()?.clone();
        let mut ledger = self.ledger()?;

        ledger.next_id += 1;
        let id = ledger.next_id;
        ledger.capsules.insert(
            id,
            CapsuleRecord {
                id,
                creator: signer.clone(),
                recipient: signer,
                unlock_time: request.unlock_value,
                encrypted_uri: request.content_uri,
                lock_type: request.lock_type,
                visibility: request.visibility,
                is_opened: false,
            },
        );

        debug!("Minted capsule {id}");
        Ok(ledger.confirm())
    }

    async fn unlock(&self, id: CapsuleId) -> GatewayResult<TxHash> {
        let signer = self.signer()?.clone();
        let mut ledger = self.ledger()?;
        let now = ledger.now();
        let block_number = ledger.block_number;

        let record = ledger.held_by(id, &signer)?;
        if record.is_opened {
            return Err(GatewayError::AlreadyOpened);
        }

        let reached = match record.lock_type {
            LockType::TimeBased => record.unlock_time <= now,
            LockType::BlockBased => record.unlock_time <= block_number,
        };
        if !reached {
            return Err(GatewayError::TriggerNotMet);
        }

        record.is_opened = true;
        debug!("Unlocked capsule {id}");
        Ok(ledger.confirm())
    }

    async fn gift(&self, id: CapsuleId, recipient: &Address) -> GatewayResult<TxHash> {
        let signer = self.signer()?.clone();
        let mut ledger = self.ledger()?;

        let record = ledger.held_by(id, &signer)?;
        if record.is_opened {
            return Err(GatewayError::AlreadyOpened);
        }

        record.recipient = recipient.clone();
        debug!("Gifted capsule {id} to {recipient}");
        Ok(ledger.confirm())
    }

    async fn get_capsule(&self, id: CapsuleId) -> GatewayResult<CapsuleRecord> {
        self.ledger()?
            .capsules
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound(id))
    }

    async fn get_owned_capsule_ids(&self, owner: &Address) -> GatewayResult<Vec<CapsuleId>> {
        Ok(self
            .ledger()?
            .capsules
            .values()
            .filter(|record| &record.recipient == owner)
            .map(|record| record.id)
            .collect())
    }

    async fn get_all_capsules(&self) -> GatewayResult<Vec<CapsuleRecord>> {
        Ok(self.ledger()?.capsules.values().cloned().collect())
    }

    async fn transaction_status(&self, tx: &TxHash) -> GatewayResult<TxStatus> {
        Ok(self
            .ledger()?
            .transactions
            .get(tx)
            .cloned()
            .unwrap_or(TxStatus::Pending))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryGateway;
    use crate::wallet::StaticWallet;
    use capsule::{
        config::NetworkConfig,
        content::CapsuleKind,
        error::{GatewayError, SessionError},
        feed::{Feed, PostKind},
        gateway::{ChainGateway, LockCondition, TxStatus},
        record::{Address, Visibility},
        session::Session,
    };

    const ALICE: &str = "0xa11ce00000000000000000000000000000000a11";
    const BOB: &str = "0xb0b0000000000000000000000000000000000b0b";
    const CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const NOW: u64 = 1_700_000_000;

    fn config() -> NetworkConfig {
        NetworkConfig::monad_testnet(Address::new(CONTRACT)).unwrap()
    }

    async fn session_for(
        address: &str,
        chain: &MemoryGateway,
    ) -> Session<StaticWallet, MemoryGateway> {
        let address = Address::new(address);
        let wallet = StaticWallet::new(address.clone(), config().chain_id);
        Session::connect(wallet, chain.signed_by(&address), config())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn it_mints_waits_and_unlocks() {
        let chain = MemoryGateway::new();
        chain.set_time(NOW).unwrap();
        let alice = session_for(ALICE, &chain).await;

        let tx = alice
            .mint_capsule(
                alice
                    .content_builder()
                    .titled("Hello")
                    .with_message("from the past 👋"),
                LockCondition::At(NOW + 3600),
                Visibility::Public,
            )
            .await
            .unwrap();
        assert_eq!(
            alice.transaction_status(&tx).await.unwrap(),
            TxStatus::Confirmed { block_number: 1 }
        );

        assert!(matches!(
            alice.unlock_capsule(1).await,
            Err(SessionError::Gateway(GatewayError::TriggerNotMet))
        ));

        chain.set_time(NOW + 3600).unwrap();
        alice.unlock_capsule(1).await.unwrap();

        assert!(matches!(
            alice.unlock_capsule(1).await,
            Err(SessionError::Gateway(GatewayError::AlreadyOpened))
        ));

        let owned = alice.owned_capsules().await.unwrap();
        assert_eq!(owned.opened_count(), 1);
        let content = owned.capsules()[0].content();
        assert_eq!(content.title.as_deref(), Some("Hello"));
        assert_eq!(content.message.as_deref(), Some("from the past 👋"));
        assert_eq!(content.kind, Some(CapsuleKind::Message));
    }

    #[tokio::test]
    async fn it_gifts_to_another_account() {
        let chain = MemoryGateway::new();
        let alice = session_for(ALICE, &chain).await;
        let bob = session_for(BOB, &chain).await;

        alice
            .mint_capsule(
                alice.content_builder().with_message("for bob"),
                LockCondition::At(0),
                Visibility::Private,
            )
            .await
            .unwrap();

        assert!(matches!(
            bob.gift_capsule(1, ALICE).await,
            Err(SessionError::Gateway(GatewayError::NotOwner(1)))
        ));

        alice.gift_capsule(1, BOB).await.unwrap();

        assert!(alice.owned_capsules().await.unwrap().is_empty());
        let owned = bob.owned_capsules().await.unwrap();
        assert_eq!(owned.len(), 1);
        assert!(owned.capsules()[0].is_gift());

        bob.unlock_capsule(1).await.unwrap();

        let feed = Feed::load(&chain, NOW, false).await;
        assert_eq!(feed.posts()[0].kind, PostKind::Gift);
    }

    #[tokio::test]
    async fn it_judges_block_locks_by_height() {
        let chain = MemoryGateway::new();
        let alice = session_for(ALICE, &chain).await;

        alice
            .mint_capsule(
                alice.content_builder().with_message("in ten blocks"),
                LockCondition::AtBlock(10),
                Visibility::Public,
            )
            .await
            .unwrap();

        assert!(matches!(
            alice.unlock_capsule(1).await,
            Err(SessionError::Gateway(GatewayError::TriggerNotMet))
        ));

        chain.advance_blocks(9).unwrap();
        assert_eq!(chain.block_number().unwrap(), 10);
        alice.unlock_capsule(1).await.unwrap();
    }

    #[tokio::test]
    async fn it_refuses_writes_without_a_signer() {
        let chain = MemoryGateway::new();

        assert!(matches!(
            chain.unlock(1).await,
            Err(GatewayError::NoSigner)
        ));
        assert!(matches!(
            chain.get_capsule(1).await,
            Err(GatewayError::NotFound(1))
        ));
        assert_eq!(
            chain
                .transaction_status(&capsule::gateway::TxHash("0xunknown".into()))
                .await
                .unwrap(),
            TxStatus::Pending
        );
    }
}
