use serde::{Deserialize, Serialize};
use url::Url;

use crate::{content::CONTENT_VERSION, error::ConfigError, gateway::TxHash, record::Address};

pub const MONAD_TESTNET: &str = "monad-testnet";
pub const MONAD_TESTNET_CHAIN_ID: u64 = 10143;
const MONAD_TESTNET_RPC: &str = "https://testnet-rpc.monad.xyz/";
const MONAD_TESTNET_EXPLORER: &str = "https://testnet.monadexplorer.com/";

/// Which chain and contract a client talks to
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Free-text network name recorded in minted content
    pub network: String,
    pub chain_id: u64,
    pub rpc_url: Url,
    pub explorer_url: Url,
    pub contract_address: Address,
    #[serde(default = "default_content_version")]
    pub content_version: String,
}

fn default_content_version() -> String {
    CONTENT_VERSION.into()
}

impl NetworkConfig {
    pub fn monad_testnet(contract_address: Address) -> Result<Self, ConfigError> {
        let config = NetworkConfig {
            network: MONAD_TESTNET.into(),
            chain_id: MONAD_TESTNET_CHAIN_ID,
            rpc_url: Url::parse(MONAD_TESTNET_RPC)?,
            explorer_url: Url::parse(MONAD_TESTNET_EXPLORER)?,
            contract_address,
            content_version: default_content_version(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.contract_address.is_well_formed() {
            true => Ok(()),
            false => Err(ConfigError::ContractAddress(
                self.contract_address.to_string(),
            )),
        }
    }

    /// Block explorer page for a transaction
    pub fn tx_url(&self, tx: &TxHash) -> Result<Url, ConfigError> {
        Ok(self.explorer_url.join(&format!("tx/{tx}"))?)
    }
}
