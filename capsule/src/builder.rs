use crate::{
    content::{
        Attachment, AttachmentId, CapsuleContent, CapsuleKind, PredictionMetadata, SecretCategory,
        SecretMetadata, CONTENT_VERSION, PREDICTION_CATEGORY,
    },
    error::ValidationError,
    record::Address,
    time::{iso_timestamp, now},
};

pub const DEFAULT_PREDICTION_CONFIDENCE: u8 = 50;

/// Base minting fee, in wei (0.025 ETH)
pub const BASE_MINT_FEE_WEI: u128 = 25_000_000_000_000_000;
/// Additional minting fee per attached asset, in wei (0.01 ETH)
pub const ATTACHMENT_FEE_WEI: u128 = 10_000_000_000_000_000;

/// A builder API for capsule content
#[derive(Clone, Debug)]
pub struct CapsuleContentBuilder {
    title: Option<String>,
    message: Option<String>,
    kind: CapsuleKind,
    media_uri: Option<String>,
    prediction_confidence: u8,
    secret_category: SecretCategory,
    attachments: Vec<Attachment>,
    created_at: Option<String>,
    creator: Option<Address>,
    network: Option<String>,
    version: String,
}

impl Default for CapsuleContentBuilder {
    /// Create an empty message capsule builder.
    ///
    /// Kind-specific fields are only carried into the built content when the
    /// kind calls for them; a confidence set on a message capsule is dropped.
    fn default() -> Self {
        CapsuleContentBuilder {
            title: None,
            message: None,
            kind: CapsuleKind::default(),
            media_uri: None,
            prediction_confidence: DEFAULT_PREDICTION_CONFIDENCE,
            secret_category: SecretCategory::default(),
            attachments: Vec::new(),
            created_at: None,
            creator: None,
            network: None,
            version: CONTENT_VERSION.into(),
        }
    }
}

impl CapsuleContentBuilder {
    pub fn of_kind(mut self, kind: CapsuleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_media_uri(mut self, media_uri: &str) -> Self {
        self.media_uri = Some(media_uri.into());
        self
    }

    pub fn with_prediction_confidence(mut self, confidence: u8) -> Self {
        self.prediction_confidence = confidence;
        self
    }

    pub fn with_secret_category(mut self, category: SecretCategory) -> Self {
        self.secret_category = category;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn without_attachment(mut self, id: &AttachmentId) -> Self {
        self.attachments.retain(|attachment| &attachment.id != id);
        self
    }

    pub fn created_by(mut self, creator: &Address) -> Self {
        self.creator = Some(creator.clone());
        self
    }

    /// Pin the creation stamp instead of taking the current time at build
    pub fn created_at(mut self, created_at: &str) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    pub fn on_network(mut self, network: &str) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.into();
        self
    }

    pub fn kind(&self) -> CapsuleKind {
        self.kind
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Check the per-kind required fields without building
    pub fn validate(&self) -> Result<(), ValidationError> {
        let is_blank = |field: &Option<String>| {
            field
                .as_deref()
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        };

        match self.kind {
            CapsuleKind::Art if is_blank(&self.media_uri) => Err(ValidationError::MissingMediaUri),
            CapsuleKind::Prediction if is_blank(&self.message) => {
                Err(ValidationError::MissingPrediction)
            }
            CapsuleKind::Prediction if self.prediction_confidence > 100 => Err(
                ValidationError::ConfidenceOutOfRange(self.prediction_confidence),
            ),
            CapsuleKind::Secret if is_blank(&self.message) => Err(ValidationError::MissingSecret),
            _ => Ok(()),
        }
    }

    /// Validate and produce the content record ready for encoding
    pub fn build(self) -> Result<CapsuleContent, ValidationError> {
        self.validate()?;

        let (prediction_confidence, prediction_metadata) = match self.kind {
            CapsuleKind::Prediction => (
                Some(self.prediction_confidence),
                Some(PredictionMetadata {
                    confidence_level: self.prediction_confidence,
                    category: PREDICTION_CATEGORY.into(),
                }),
            ),
            _ => (None, None),
        };

        let (secret_category, secret_metadata) = match self.kind {
            CapsuleKind::Secret => (
                Some(self.secret_category),
                Some(SecretMetadata {
                    category: self.secret_category,
                    is_encrypted: true,
                }),
            ),
            _ => (None, None),
        };

        Ok(CapsuleContent {
            title: self.title,
            message: self.message,
            kind: Some(self.kind),
            media_uri: self.media_uri,
            prediction_confidence,
            prediction_metadata,
            secret_category,
            secret_metadata,
            attachments: Some(self.attachments),
            created_at: Some(self.created_at.unwrap_or_else(|| iso_timestamp(now()))),
            creator: self.creator,
            version: Some(self.version),
            network: self.network,
        })
    }
}

/// Human label for a prediction confidence percentage
pub fn confidence_label(confidence: u8) -> &'static str {
    match confidence {
        80.. => "Very Confident",
        60..=79 => "Confident",
        40..=59 => "Somewhat Confident",
        _ => "Not Very Confident",
    }
}

/// Renders a byte count the way upload lists show it, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".into();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// Estimated minting fee for a capsule with this many attachments, in wei.
/// Gas is not included.
pub fn estimated_mint_fee_wei(attachment_count: usize) -> u128 {
    BASE_MINT_FEE_WEI + ATTACHMENT_FEE_WEI * attachment_count as u128
}
