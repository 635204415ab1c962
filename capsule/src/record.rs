use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::{codec, content::CapsuleContent, error::ValidationError, unlock::UnlockStatus};

pub type CapsuleId = u64;

/// A `0x`-prefixed account address as reported by the chain or the wallet.
/// Hex casing is not significant when comparing.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Address(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `0x` followed by exactly 40 hex digits
    pub fn is_well_formed(&self) -> bool {
        match self.0.strip_prefix("0x").or_else(|| self.0.strip_prefix("0X")) {
            Some(digits) => digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit()),
            None => false,
        }
    }

    /// Abbreviated `0x12...cdef` form for display
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return self.0.clone();
        }

        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let address = Address::new(address.trim());
        match address.is_well_formed() {
            true => Ok(address),
            false => Err(ValidationError::MalformedAddress(address.0)),
        }
    }
}

impl From<&str> for Address {
    fn from(address: &str) -> Self {
        Address::new(address)
    }
}

/// How the contract decides that a capsule may be opened. Encoded on chain
/// as a small integer.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, AsRefStr)]
#[serde(try_from = "u8", into = "u8")]
pub enum LockType {
    #[strum(serialize = "time-locked")]
    TimeBased,
    #[strum(serialize = "block-locked")]
    BlockBased,
}

impl TryFrom<u8> for LockType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LockType::TimeBased),
            1 => Ok(LockType::BlockBased),
            other => Err(format!("Unknown lock type {other}")),
        }
    }
}

impl From<LockType> for u8 {
    fn from(lock_type: LockType) -> Self {
        match lock_type {
            LockType::TimeBased => 0,
            LockType::BlockBased => 1,
        }
    }
}

/// Display flag for feeds and listings; it has no bearing on who can read
/// the content on chain
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Display, AsRefStr)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
}

impl TryFrom<u8> for Visibility {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Visibility::Private),
            1 => Ok(Visibility::Public),
            other => Err(format!("Unknown visibility {other}")),
        }
    }
}

impl From<Visibility> for u8 {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Private => 0,
            Visibility::Public => 1,
        }
    }
}

/// A capsule as stored by the registry contract
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CapsuleRecord {
    pub id: CapsuleId,
    pub creator: Address,
    pub recipient: Address,
    /// Unix seconds for time-based locks, a block height for block-based
    pub unlock_time: u64,
    #[serde(rename = "encryptedURI")]
    pub encrypted_uri: String,
    pub lock_type: LockType,
    pub visibility: Visibility,
    pub is_opened: bool,
}

impl CapsuleRecord {
    /// Returns true if the capsule is held by someone other than its creator
    pub fn is_gift(&self) -> bool {
        self.creator != self.recipient
    }

    /// Best-effort decoding of the stored content URI
    pub fn content(&self) -> CapsuleContent {
        codec::decode(&self.encrypted_uri)
    }

    pub fn unlock_status(&self, now: u64) -> UnlockStatus {
        UnlockStatus::evaluate(self, now)
    }
}
