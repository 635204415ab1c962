#[macro_use]
extern crate log;

pub mod memory;
pub mod wallet;
