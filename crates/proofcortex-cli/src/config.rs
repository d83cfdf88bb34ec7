use std::time::Duration;

use url::Url;

use crate::{cli::RpcArgs, error::ConfigError, Address};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Connection settings, resolved once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rpc_url: String,
    pub contract_addr: Address,
    pub poll_interval: Duration,
}

impl Config {
    /// Resolve the flags (which already carry their env fallbacks) into a config.
    /// Fails without touching the network.
    pub fn from_args(args: &RpcArgs) -> Result<Self, ConfigError> {
        let rpc_url = args
            .rpc_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingRpcUrl)?
            .to_owned();
        check_rpc_url(&rpc_url)?;
        let contract_addr = args
            .contract_addr
            .as_deref()
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .ok_or(ConfigError::MissingContractAddr)?;
        let contract_addr = contract_addr
            .parse()
            .map_err(|e| ConfigError::InvalidContractAddr(format!("{contract_addr}: {e}")))?;
        Ok(Self {
            rpc_url,
            contract_addr,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(self, poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..self
        }
    }
}

fn check_rpc_url(rpc_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(rpc_url).map_err(|e| ConfigError::InvalidRpcUrl(format!("{rpc_url}: {e}")))?;
    match url.scheme() {
        "http" | "https" | "ws" | "wss" => Ok(()),
        scheme => Err(ConfigError::InvalidRpcUrl(format!(
            "{rpc_url}: unsupported scheme {scheme:?}"
        ))),
    }
}
