mod accounts;
mod gateway;
mod transport;
mod wallet;

pub use accounts::*;
pub use gateway::*;
pub use transport::*;
pub use wallet::*;
