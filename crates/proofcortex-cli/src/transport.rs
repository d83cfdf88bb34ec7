use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use ethers::{
    prelude::{Http, JsonRpcClient, JsonRpcError, Provider, ProviderError, RpcError, Ws},
    utils::__serde_json::Error,
};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::ClientError;

/// JSON-RPC transport picked from the endpoint URL scheme.
#[derive(Debug, Clone)]
pub enum Transport {
    Http(Http),
    Ws(Ws),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] ethers::providers::HttpClientError),
    #[error(transparent)]
    Ws(#[from] ethers::providers::WsClientError),
}

impl TransportError {
    fn inner(&self) -> &dyn RpcError {
        match self {
            Self::Http(e) => e,
            Self::Ws(e) => e,
        }
    }
}

// Node error responses must survive the wrapping: revert data travels in them.
impl RpcError for TransportError {
    fn as_error_response(&self) -> Option<&JsonRpcError> {
        self.inner().as_error_response()
    }

    fn as_serde_error(&self) -> Option<&Error> {
        self.inner().as_serde_error()
    }
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Http(e) => e.into(),
            TransportError::Ws(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Http,
    Ws,
}

fn scheme_of(rpc_url: &Url) -> Result<Scheme, ClientError> {
    match rpc_url.scheme() {
        "http" | "https" => Ok(Scheme::Http),
        "ws" | "wss" => Ok(Scheme::Ws),
        _ => Err(ClientError::InvalidProtocol),
    }
}

impl Transport {
    /// Open a provider for `rpc_url`. WebSocket endpoints connect eagerly,
    /// HTTP endpoints on the first request.
    pub async fn connect(rpc_url: &str) -> Result<Arc<Provider<Self>>, ClientError> {
        let url = Url::parse(rpc_url)?;
        let transport = match scheme_of(&url)? {
            Scheme::Http => Self::Http(Http::new(url)),
            Scheme::Ws => Self::Ws(Ws::connect(rpc_url).await?),
        };
        log::debug!("Connected transport: {transport:?}");
        Ok(Arc::new(Provider::new(transport)))
    }
}

#[async_trait]
impl JsonRpcClient for Transport {
    type Error = TransportError;

    async fn request<T, R>(&self, method: &str, params: T) -> Result<R, Self::Error>
    where
        T: Debug + Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        match self {
            Self::Http(provider) => Ok(provider.request(method, params).await?),
            Self::Ws(provider) => Ok(provider.request(method, params).await?),
        }
    }
}
