use std::sync::Arc;

use async_trait::async_trait;
use ethers::{
    abi::RawLog,
    contract::EthEvent,
    prelude::{JsonRpcClient, Middleware, Provider},
    providers::FilterKind,
    types::{BlockNumber, Filter, Log, H256},
};

use crate::{
    config::Config,
    contracts::{self, VeriCortexVerifier},
    transport::Transport,
    Address, ClientError, ProofId, U256,
};

/// Snapshot of a proof as stored by the verifier contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofRecord {
    pub model_id: String,
    pub proof_hash: H256,
    pub submitter: Address,
    pub valid: bool,
    /// Seconds since the Unix epoch
    pub timestamp: U256,
}

impl From<contracts::ProofRecord> for ProofRecord {
    fn from(record: contracts::ProofRecord) -> Self {
        Self {
            model_id: record.model_id,
            proof_hash: H256(record.proof_hash),
            submitter: record.submitter,
            valid: record.valid,
            timestamp: record.timestamp,
        }
    }
}

/// A decoded `ProofSubmitted` log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofSubmitted {
    pub proof_id: ProofId,
    pub submitter: Address,
    pub model_id: String,
    pub valid: bool,
}

impl From<contracts::ProofSubmittedFilter> for ProofSubmitted {
    fn from(event: contracts::ProofSubmittedFilter) -> Self {
        Self {
            proof_id: event.proof_id.into(),
            submitter: event.submitter,
            model_id: event.model_id,
            valid: event.valid,
        }
    }
}

/// Server-side log filter id, used as a forward-only event cursor.
pub type FilterId = U256;

#[async_trait]
pub trait ProofClient: Send + Sync {
    /// Call `getProof`; reverts if the proof is unknown
    async fn get_proof(&self, proof_id: ProofId) -> Result<ProofRecord, ClientError>;

    /// Call `isProofValid`
    async fn is_proof_valid(&self, proof_id: ProofId) -> Result<bool, ClientError>;

    /// Install a `ProofSubmitted` filter starting at the latest block
    async fn new_proof_filter(&self) -> Result<FilterId, ClientError>;

    /// Events that appeared since the previous poll of `filter`, in log order
    async fn proof_events_since(&self, filter: FilterId) -> Result<Vec<ProofSubmitted>, ClientError>;
}

pub async fn get_client(config: &Config) -> Result<Box<dyn ProofClient>, ClientError> {
    log::info!(
        "Initializing proof client. rpc_url={} contract={:?}",
        config.rpc_url,
        config.contract_addr
    );
    let provider = Transport::connect(&config.rpc_url).await?;
    Ok(Box::new(EthersClient::new(provider, config.contract_addr)))
}

pub struct EthersClient<P: JsonRpcClient> {
    provider: Arc<Provider<P>>,
    verifier: VeriCortexVerifier<Provider<P>>,
}

impl<P: JsonRpcClient + 'static> EthersClient<P> {
    pub fn new(provider: Arc<Provider<P>>, contract_addr: Address) -> Self {
        let verifier = VeriCortexVerifier::new(contract_addr, provider.clone());
        Self { provider, verifier }
    }

    fn proof_filter(&self) -> Filter {
        Filter::new()
            .address(self.verifier.address())
            .event(&contracts::ProofSubmittedFilter::abi_signature())
            .from_block(BlockNumber::Latest)
    }
}

pub fn decode_proof_event(log: Log) -> Result<ProofSubmitted, ClientError> {
    let raw = RawLog {
        topics: log.topics,
        data: log.data.to_vec(),
    };
    let event = <contracts::ProofSubmittedFilter as EthEvent>::decode_log(&raw)?;
    Ok(event.into())
}

#[async_trait]
impl<P: JsonRpcClient + 'static> ProofClient for EthersClient<P> {
    async fn get_proof(&self, proof_id: ProofId) -> Result<ProofRecord, ClientError> {
        let record = self.verifier.get_proof(*proof_id.as_bytes()).call().await?;
        Ok(record.into())
    }

    async fn is_proof_valid(&self, proof_id: ProofId) -> Result<bool, ClientError> {
        Ok(self.verifier.is_proof_valid(*proof_id.as_bytes()).call().await?)
    }

    async fn new_proof_filter(&self) -> Result<FilterId, ClientError> {
        let filter = self.proof_filter();
        let id = self.provider.new_filter(FilterKind::Logs(&filter)).await?;
        log::debug!("Installed ProofSubmitted filter {id:#x}");
        Ok(id)
    }

    async fn proof_events_since(&self, filter: FilterId) -> Result<Vec<ProofSubmitted>, ClientError> {
        let logs: Vec<Log> = self.provider.get_filter_changes(filter).await?;
        log::debug!("Filter {filter:#x} returned {} logs", logs.len());
        logs.into_iter().map(decode_proof_event).collect()
    }
}
