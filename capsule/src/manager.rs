use serde::Serialize;

use crate::{
    content::CapsuleContent,
    error::GatewayError,
    gateway::ChainGateway,
    guard::RequestTicket,
    record::{Address, CapsuleRecord},
    time::format_countdown,
    unlock::UnlockStatus,
};

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// The capsules held by one account, newest unlock time first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnedCapsules {
    capsules: Vec<CapsuleRecord>,
}

/// One page of a listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<'a> {
    pub index: usize,
    pub total_pages: usize,
    pub items: &'a [CapsuleRecord],
}

impl<'a> Page<'a> {
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }
}

/// A capsule prepared for display
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleView {
    pub record: CapsuleRecord,
    pub content: CapsuleContent,
    pub status: UnlockStatus,
    pub countdown: String,
}

impl CapsuleView {
    pub fn new(record: &CapsuleRecord, now: u64) -> Self {
        let status = record.unlock_status(now);
        CapsuleView {
            content: record.content(),
            countdown: format_countdown(status.remaining_seconds()),
            record: record.clone(),
            status,
        }
    }
}

impl OwnedCapsules {
    pub fn new(mut capsules: Vec<CapsuleRecord>) -> Self {
        capsules.sort_by(|a, b| b.unlock_time.cmp(&a.unlock_time));
        OwnedCapsules { capsules }
    }

    /// Look up the ids held by `owner` and fetch each of them
    pub async fn load<G>(gateway: &G, owner: &Address) -> Result<Self, GatewayError>
    where
        G: ChainGateway + ?Sized,
    {
        let ids = gateway.get_owned_capsule_ids(owner).await?;
        Ok(OwnedCapsules::new(gateway.fetch_many(&ids).await))
    }

    /// [`OwnedCapsules::load`] on behalf of `ticket`; `None` if a newer
    /// refresh was begun while this one was loading
    pub async fn refresh<G>(
        ticket: RequestTicket,
        gateway: &G,
        owner: &Address,
    ) -> Option<Result<Self, GatewayError>>
    where
        G: ChainGateway + ?Sized,
    {
        ticket.run(OwnedCapsules::load(gateway, owner)).await
    }

    pub fn capsules(&self) -> &[CapsuleRecord] {
        &self.capsules
    }

    pub fn len(&self) -> usize {
        self.capsules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capsules.is_empty()
    }

    pub fn opened_count(&self) -> usize {
        self.capsules.iter().filter(|capsule| capsule.is_opened).count()
    }

    pub fn locked_count(&self) -> usize {
        self.len() - self.opened_count()
    }

    /// Capsules that may be unlocked at `now`
    pub fn unlockable(&self, now: u64) -> impl Iterator<Item = &CapsuleRecord> {
        self.capsules
            .iter()
            .filter(move |capsule| capsule.unlock_status(now).is_unlockable())
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        match page_size {
            0 => 0,
            _ => self.len().div_ceil(page_size),
        }
    }

    /// The page at `index`, clamped to the last page
    pub fn page(&self, index: usize, page_size: usize) -> Page<'_> {
        let total_pages = self.page_count(page_size);
        if total_pages == 0 {
            return Page {
                index: 0,
                total_pages,
                items: &[],
            };
        }

        let index = index.min(total_pages - 1);
        let start = index * page_size;
        let end = start.saturating_add(page_size).min(self.len());

        Page {
            index,
            total_pages,
            items: &self.capsules[start..end],
        }
    }

    pub fn views(&self, now: u64) -> Vec<CapsuleView> {
        self.capsules
            .iter()
            .map(|capsule| CapsuleView::new(capsule, now))
            .collect()
    }
}
