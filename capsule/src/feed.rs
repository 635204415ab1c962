use std::str::FromStr;

use log::{error, warn};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
    gateway::ChainGateway,
    guard::RequestTicket,
    record::CapsuleRecord,
    time::format_remaining,
    unlock::UnlockStatus,
};

const DEMO_POSTS: &str = include_str!("../fixtures/demo_posts.json");

#[derive(
    Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostKind {
    Mint,
    Unlock,
    Vote,
    Gift,
    Community,
    Achievement,
    Prediction,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
    Mythic,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PostUser {
    pub address: String,
    pub name: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_votes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewards: Vec<String>,
}

/// One entry of the activity feed
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub title: String,
    pub content: String,
    pub user: PostUser,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capsule_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capsule_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub shares: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: PostMetadata,
}

impl Post {
    /// Describe a capsule read from the chain as of `now`
    pub fn from_record(record: &CapsuleRecord, now: u64) -> Self {
        let id = record.id;
        let status = record.unlock_status(now);

        let (mut kind, mut title, mut content) = match status {
            UnlockStatus::Opened => (
                PostKind::Unlock,
                "Time Capsule Revealed!",
                format!("Capsule #{id} has been unlocked and opened, revealing its hidden contents."),
            ),
            UnlockStatus::Ready => (
                PostKind::Unlock,
                "Time Capsule Ready to Open!",
                format!("Capsule #{id} is now unlocked and ready to be opened."),
            ),
            UnlockStatus::Locked { .. } | UnlockStatus::ContractGoverned => (
                PostKind::Mint,
                "New Time Capsule Created",
                format!("A new time capsule #{id} has been minted and is waiting to be unlocked."),
            ),
        };

        if record.is_gift() {
            kind = PostKind::Gift;
            title = "Time Capsule Gifted";
            content =
                format!("A time capsule #{id} has been gifted and is waiting to be unlocked.");
        }

        let timestamp = match status {
            UnlockStatus::ContractGoverned => format!("Unlocks at block {}", record.unlock_time),
            _ => format_remaining(status.remaining_seconds()),
        };

        let progress = match status.is_due() {
            true => "unlocked",
            false => "locked",
        };

        Post {
            id: format!("capsule-{id}"),
            kind,
            title: title.into(),
            content,
            user: PostUser {
                address: record.creator.to_string(),
                name: record.creator.short(),
            },
            timestamp,
            block_number: None,
            capsule_id: Some(id),
            capsule_title: Some(format!("Capsule #{id}")),
            transaction_hash: None,
            likes: 0,
            comments: 0,
            shares: 0,
            is_liked: false,
            tags: vec![
                record.lock_type.to_string(),
                record.visibility.to_string(),
                progress.into(),
            ],
            metadata: PostMetadata {
                rarity: Some(Rarity::Common),
                recipient: record.is_gift().then(|| record.recipient.short()),
                ..Default::default()
            },
        }
    }

    /// Placeholder shown when capsules could not be read from the chain
    pub fn load_error() -> Self {
        Post {
            id: "load-error".into(),
            kind: PostKind::Mint,
            title: "Error Loading Real Data".into(),
            content: "Unable to fetch capsules from blockchain. Showing demo data.".into(),
            user: PostUser {
                address: "0x0000...0000".into(),
                name: "System".into(),
            },
            timestamp: "Just now".into(),
            block_number: None,
            capsule_id: None,
            capsule_title: None,
            transaction_hash: None,
            likes: 0,
            comments: 0,
            shares: 0,
            is_liked: false,
            tags: vec!["error".into(), "demo".into()],
            metadata: PostMetadata::default(),
        }
    }
}

pub fn posts_from_records(records: &[CapsuleRecord], now: u64) -> Vec<Post> {
    records
        .iter()
        .map(|record| Post::from_record(record, now))
        .collect()
}

/// The bundled demo posts shown alongside chain activity
pub fn demo_posts() -> Vec<Post> {
    serde_json::from_str(DEMO_POSTS).unwrap_or_else(|error| {
        warn!("Bundled demo posts are unreadable: {error}");
        Vec::new()
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    Only(PostKind),
}

impl FeedFilter {
    /// Every filter a feed can be viewed through, `All` first
    pub fn options() -> Vec<FeedFilter> {
        std::iter::once(FeedFilter::All)
            .chain(PostKind::iter().map(FeedFilter::Only))
            .collect()
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            FeedFilter::All => true,
            FeedFilter::Only(kind) => post.kind == *kind,
        }
    }
}

impl FromStr for FeedFilter {
    type Err = strum::ParseError;

    fn from_str(filter: &str) -> Result<Self, Self::Err> {
        match filter {
            "all" => Ok(FeedFilter::All),
            kind => Ok(FeedFilter::Only(PostKind::from_str(kind)?)),
        }
    }
}

/// Posts built from every capsule on chain, followed by demo posts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feed {
    posts: Vec<Post>,
    load_error: Option<String>,
}

impl Feed {
    pub fn new(posts: Vec<Post>) -> Self {
        Feed {
            posts,
            load_error: None,
        }
    }

    /// Read every capsule through `gateway`. A failed read leaves a notice
    /// post in place of the chain activity.
    pub async fn load<G>(gateway: &G, now: u64, with_demo_posts: bool) -> Self
    where
        G: ChainGateway + ?Sized,
    {
        let (mut posts, load_error) = match gateway.get_all_capsules().await {
            Ok(records) => (posts_from_records(&records, now), None),
            Err(gateway_error) => {
                error!("Error loading feed data: {gateway_error}");
                (vec![Post::load_error()], Some(gateway_error.to_string()))
            }
        };

        if with_demo_posts {
            posts.extend(demo_posts());
        }

        Feed { posts, load_error }
    }

    /// [`Feed::load`] on behalf of `ticket`; `None` if a newer refresh was
    /// begun while this one was loading
    pub async fn refresh<G>(
        ticket: RequestTicket,
        gateway: &G,
        now: u64,
        with_demo_posts: bool,
    ) -> Option<Self>
    where
        G: ChainGateway + ?Sized,
    {
        ticket
            .run(Feed::load(gateway, now, with_demo_posts))
            .await
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn filter(&self, filter: FeedFilter) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(move |post| filter.matches(post))
    }

    /// Put a newly observed post at the top of the feed
    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    /// Flip the like state of a post and adjust its count. Returns false if
    /// no post has this id.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        match self.posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.likes = match post.is_liked {
                    true => post.likes.saturating_sub(1),
                    false => post.likes + 1,
                };
                post.is_liked = !post.is_liked;
                true
            }
            None => false,
        }
    }
}
