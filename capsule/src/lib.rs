//! Client-side plumbing for on-chain time capsules.
//!
//! A capsule pairs an encoded content payload with an unlock rule that an
//! external contract enforces. This crate owns the shape of that payload
//! (see [`codec`]), decides locally when a capsule may be unlocked (see
//! [`unlock`]), and drives the contract and wallet through the
//! [`gateway::ChainGateway`] and [`session::WalletConnector`] seams.

pub mod builder;
pub mod codec;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod gateway;
pub mod guard;
pub mod manager;
pub mod record;
pub mod serde;
pub mod session;
pub mod time;
pub mod unlock;

pub use builder::CapsuleContentBuilder;
pub use codec::{decode, encode, ContentCodec};
pub use content::CapsuleContent;
pub use record::{Address, CapsuleId, CapsuleRecord};
pub use unlock::UnlockStatus;

#[cfg(test)]
mod tests;
