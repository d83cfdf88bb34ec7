use ethers::{
    abi::{ParamType, Token},
    contract::ContractError,
    prelude::Middleware,
};

/// Selector of Solidity's `Error(string)` revert payload.
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BLOCKDAG_RPC not set in .env or CLI. Set BLOCKDAG_RPC env var or pass --rpc.")]
    MissingRpcUrl,
    #[error("VERIFIER_ADDRESS not set in .env or CLI. Set VERIFIER_ADDRESS env var or pass --contract.")]
    MissingContractAddr,
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),
    #[error("Invalid contract address: {0}")]
    InvalidContractAddr(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid RPC URL: {0:?}")]
    InvalidRpcUrl(#[from] url::ParseError),
    #[error("Websocket client error: {0}")]
    WsClient(#[from] ethers::providers::WsClientError),
    #[error("Contract error: {0}")]
    Contract(String),
    #[error("RPC provider error: {0}")]
    Provider(#[from] ethers::providers::ProviderError),
    #[error("ABI decoding error: {0}")]
    Abi(#[from] ethers::abi::Error),
    #[error("Unsupported RPC protocol")]
    InvalidProtocol,
}

impl<M: Middleware> From<ContractError<M>> for ClientError {
    fn from(err: ContractError<M>) -> Self {
        let decoded = match err {
            ContractError::Revert(ref bs) => {
                revert_reason(bs).map_or_else(|| err.to_string(), |msg| format!("reverted: {msg}"))
            }
            _ => err.to_string(),
        };
        Self::Contract(decoded)
    }
}

/// Extract the message of an `Error(string)` revert, if that is what the payload is.
fn revert_reason(data: &[u8]) -> Option<String> {
    let body = data.strip_prefix(&ERROR_STRING_SELECTOR)?;
    match ethers::abi::decode(&[ParamType::String], body).ok()?.pop()? {
        Token::String(msg) => Some(msg),
        _ => None,
    }
}
