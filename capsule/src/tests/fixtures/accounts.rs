use crate::{
    codec,
    content::CapsuleContent,
    record::{Address, CapsuleId, CapsuleRecord, LockType, Visibility},
};

pub const ALICE: &str = "0xA11cE00000000000000000000000000000000a11";
pub const BOB: &str = "0xb0b0000000000000000000000000000000000B0b";
pub const MALLORY: &str = "0x3a11040000000000000000000000000000000bad";

pub const NOW: u64 = 1_700_000_000;

pub struct Accounts {
    pub alice: Address,
    pub bob: Address,
    pub mallory: Address,
}

impl Accounts {
    pub fn new() -> Self {
        Accounts {
            alice: Address::new(ALICE),
            bob: Address::new(BOB),
            mallory: Address::new(MALLORY),
        }
    }
}

/// A time-locked public capsule created and held by `owner`
pub fn time_locked(id: CapsuleId, owner: &Address, unlock_time: u64) -> CapsuleRecord {
    let content = CapsuleContent {
        title: Some(format!("Capsule {id}")),
        message: Some("See you in the future".into()),
        ..Default::default()
    };

    CapsuleRecord {
        id,
        creator: owner.clone(),
        recipient: owner.clone(),
        unlock_time,
        encrypted_uri: codec::encode(&content).unwrap(),
        lock_type: LockType::TimeBased,
        visibility: Visibility::Public,
        is_opened: false,
    }
}
