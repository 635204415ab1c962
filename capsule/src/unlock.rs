use serde::{Deserialize, Serialize};

use crate::record::{CapsuleRecord, LockType};

/// Where a capsule stands with respect to its unlock condition.
///
/// Only time-based locks are judged locally. Block-based locks are left to
/// the contract: the client offers the unlock and the contract rejects it
/// if the block height has not been reached.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum UnlockStatus {
    /// Already opened; nothing left to unlock
    Opened,
    /// The unlock time has passed
    Ready,
    /// The unlock time is still `remaining` seconds away
    Locked { remaining: u64 },
    /// A block-based lock that only the contract can judge
    ContractGoverned,
}

impl UnlockStatus {
    pub fn evaluate(record: &CapsuleRecord, now: u64) -> Self {
        if record.is_opened {
            return UnlockStatus::Opened;
        }

        match record.lock_type {
            LockType::BlockBased => UnlockStatus::ContractGoverned,
            LockType::TimeBased if record.unlock_time <= now => UnlockStatus::Ready,
            LockType::TimeBased => UnlockStatus::Locked {
                remaining: record.unlock_time - now,
            },
        }
    }

    /// Returns true if an unlock may be submitted
    pub fn is_unlockable(&self) -> bool {
        matches!(self, UnlockStatus::Ready | UnlockStatus::ContractGoverned)
    }

    /// Returns true once the capsule is opened or its unlock time has passed
    pub fn is_due(&self) -> bool {
        matches!(self, UnlockStatus::Opened | UnlockStatus::Ready)
    }

    /// Seconds until the capsule may be unlocked; zero unless locked by time
    pub fn remaining_seconds(&self) -> u64 {
        match self {
            UnlockStatus::Locked { remaining } => *remaining,
            _ => 0,
        }
    }
}

pub fn is_unlockable(record: &CapsuleRecord, now: u64) -> bool {
    UnlockStatus::evaluate(record, now).is_unlockable()
}

pub fn time_until_unlock(record: &CapsuleRecord, now: u64) -> u64 {
    UnlockStatus::evaluate(record, now).remaining_seconds()
}
