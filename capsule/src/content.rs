use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{record::Address, serde::lenient};

pub const CONTENT_VERSION: &str = "1.0";
pub const PREDICTION_CATEGORY: &str = "future_prediction";

pub const UNKNOWN_TITLE: &str = "Unknown";
pub const UNKNOWN_MESSAGE: &str = "Unable to decode content";
pub const ERROR_TITLE: &str = "Error";
pub const ERROR_MESSAGE: &str = "Error decoding content";

/// What a capsule holds
#[derive(
    Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CapsuleKind {
    Message,
    Prediction,
    Art,
    Secret,
}

impl Default for CapsuleKind {
    fn default() -> Self {
        CapsuleKind::Message
    }
}

#[derive(
    Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SecretCategory {
    Personal,
    Confession,
    Wish,
    Dream,
    Memory,
    #[serde(other)]
    Other,
}

impl Default for SecretCategory {
    fn default() -> Self {
        SecretCategory::Personal
    }
}

#[derive(
    Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    Audio,
    Document,
}

/// How a media URI should be rendered, judged by its file extension
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unknown,
}

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];
const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "webm", "avi", "mov"];

impl MediaKind {
    /// Only a trailing extension counts; a URI with a query or fragment
    /// after it is `Unknown`
    pub fn of_uri(uri: &str) -> Self {
        let extension = match uri.rsplit_once('.') {
            Some((_, extension)) => extension.to_ascii_lowercase(),
            None => return MediaKind::Unknown,
        };

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            MediaKind::Video
        } else {
            MediaKind::Unknown
        }
    }
}

/// Attachment ids are client-generated and have been written both as
/// numbers and as strings
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum AttachmentId {
    Number(f64),
    Text(String),
}

impl From<u64> for AttachmentId {
    fn from(id: u64) -> Self {
        AttachmentId::Number(id as f64)
    }
}

impl From<&str> for AttachmentId {
    fn from(id: &str) -> Self {
        AttachmentId::Text(id.into())
    }
}

/// Metadata describing a file the creator attached. The bytes themselves are
/// not stored anywhere by this crate.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionMetadata {
    pub confidence_level: u8,
    pub category: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretMetadata {
    pub category: SecretCategory,
    pub is_encrypted: bool,
}

/// The payload a creator encodes into a capsule before minting it
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<CapsuleKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub prediction_confidence: Option<u8>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub prediction_metadata: Option<PredictionMetadata>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub secret_category: Option<SecretCategory>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub secret_metadata: Option<SecretMetadata>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

impl CapsuleContent {
    /// Placeholder shown for strings that are not content URIs at all
    pub fn unknown() -> Self {
        CapsuleContent {
            title: Some(UNKNOWN_TITLE.into()),
            message: Some(UNKNOWN_MESSAGE.into()),
            ..Default::default()
        }
    }

    /// Placeholder shown for content URIs whose payload is damaged
    pub fn undecodable() -> Self {
        CapsuleContent {
            title: Some(ERROR_TITLE.into()),
            message: Some(ERROR_MESSAGE.into()),
            ..Default::default()
        }
    }

    /// Rendering hint for `media_uri`; `None` when there is no media
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media_uri.as_deref().map(MediaKind::of_uri)
    }

    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    /// Total declared size of all attachments, in bytes
    pub fn attachments_size(&self) -> u64 {
        self.attachments().iter().map(|attachment| attachment.size).sum()
    }
}
