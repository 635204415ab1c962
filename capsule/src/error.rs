//! Error types for capsule operations

use thiserror::Error;

use crate::record::CapsuleId;

/// Per-kind field requirements that a capsule must meet before it is minted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Art capsules point at their media and cannot be minted without it
    #[error("Media URL is required for Digital Art capsules")]
    MissingMediaUri,
    /// Predictions carry their statement in the message field
    #[error("Prediction statement is required for Prediction capsules")]
    MissingPrediction,
    /// Secrets carry their content in the message field
    #[error("Secret content is required for Secret capsules")]
    MissingSecret,
    /// Prediction confidence is a percentage
    #[error("Prediction confidence must be between 0 and 100, got {0}")]
    ConfidenceOutOfRange(u8),
    /// Gift recipients and creators must be `0x`-prefixed 20 byte hex strings
    #[error("Not a valid address: {0}")]
    MalformedAddress(String),
    /// A capsule cannot be gifted back to its current holder
    #[error("Cannot gift a capsule to yourself")]
    SelfGift,
}

/// The ways a content URI can fail to decode
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The tag was recognized but the payload could not be reversed to bytes
    #[error("Malformed transport encoding: {0}")]
    MalformedTransportEncoding(String),
    /// The payload was reversed but is not a content record
    #[error("Malformed content JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    /// The string does not start with a known media-type tag
    #[error("Unrecognized content URI tag")]
    UnrecognizedTag,
}

/// Failures reported by a [`crate::gateway::ChainGateway`]
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The unlock condition of the capsule has not been met yet
    #[error("Unlock trigger has not been met")]
    TriggerNotMet,
    /// The contract rejected the call data or its signature
    #[error("Invalid signature or call fragment")]
    InvalidSignature,
    /// The capsule has been opened before
    #[error("Capsule has already been opened")]
    AlreadyOpened,
    /// The caller does not hold the capsule
    #[error("Caller is not the holder of capsule {0}")]
    NotOwner(CapsuleId),
    /// No capsule exists with this id
    #[error("Capsule {0} does not exist")]
    NotFound(CapsuleId),
    /// The gateway has no signing account to send a transaction from
    #[error("No signer is available for this transaction")]
    NoSigner,
    /// RPC, network or other transport failures
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl GatewayError {
    /// Classify a contract revert reason into a known variant, falling back
    /// to a transport error that carries the raw reason
    pub fn from_revert_reason(reason: &str) -> Self {
        let lower = reason.to_lowercase();

        if lower.contains("trigger") || lower.contains("not yet unlockable") {
            GatewayError::TriggerNotMet
        } else if lower.contains("already opened") || lower.contains("already unlocked") {
            GatewayError::AlreadyOpened
        } else if lower.contains("signature") || lower.contains("fragment") {
            GatewayError::InvalidSignature
        } else {
            GatewayError::Transport(anyhow::anyhow!("Contract reverted: {reason}"))
        }
    }
}

/// Failures of a wallet-bound session
#[derive(Error, Debug)]
pub enum SessionError {
    /// The content or arguments were rejected before reaching the chain
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The gateway call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The content could not be serialized for minting
    #[error("Could not encode capsule content: {0}")]
    Encoding(anyhow::Error),
    /// The wallet connector failed
    #[error("Wallet error: {0}")]
    Wallet(anyhow::Error),
    /// The wallet is connected to a different chain than the configured one
    #[error("Wallet is on chain {actual}, expected {expected}")]
    WrongChain {
        /// Chain id from the configuration
        expected: u64,
        /// Chain id reported by the wallet
        actual: u64,
    },
}

/// Configuration loading and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for [`crate::config::NetworkConfig`]
    #[error("Could not parse network config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configured contract address is not well formed
    #[error("Contract address is malformed: {0}")]
    ContractAddress(String),
    /// An explorer link could not be formed
    #[error("Could not build explorer URL: {0}")]
    Url(#[from] url::ParseError),
}
