#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use proofcortex_cli::{
    Address, ClientError, FilterId, ProofClient, ProofId, ProofRecord, ProofSubmitted, H256, U256,
};
use tokio::sync::oneshot;

/// In-memory `ProofClient` with canned answers.
#[derive(Default)]
pub struct StubClient {
    pub record: Option<ProofRecord>,
    pub valid: Option<bool>,
    pub filter_fails: bool,
    pub batches: Mutex<VecDeque<Result<Vec<ProofSubmitted>, String>>>,
    pub requested: Mutex<Vec<ProofId>>,
    pub polls: AtomicUsize,
    pub interrupt: Mutex<Option<(usize, oneshot::Sender<()>)>>,
}

impl StubClient {
    pub fn with_record(record: ProofRecord, valid: bool) -> Self {
        Self {
            record: Some(record),
            valid: Some(valid),
            ..Default::default()
        }
    }

    /// Queue the answer of the next poll. Once the queue is drained every
    /// poll returns no events.
    pub fn push_batch(&self, batch: Result<Vec<ProofSubmitted>, &str>) {
        self.batches.lock().unwrap().push_back(batch.map_err(ToOwned::to_owned));
    }

    /// Returns a future resolving once `after_polls` polls have completed.
    pub fn interrupt_after(&self, after_polls: usize) -> impl std::future::Future<Output = ()> {
        let (tx, rx) = oneshot::channel();
        *self.interrupt.lock().unwrap() = Some((after_polls, tx));
        async move {
            rx.await.ok();
        }
    }

    pub fn requested(&self) -> Vec<ProofId> {
        self.requested.lock().unwrap().clone()
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProofClient for StubClient {
    async fn get_proof(&self, proof_id: ProofId) -> Result<ProofRecord, ClientError> {
        self.requested.lock().unwrap().push(proof_id);
        self.record
            .clone()
            .ok_or_else(|| ClientError::Contract("reverted: Proof not found".to_owned()))
    }

    async fn is_proof_valid(&self, proof_id: ProofId) -> Result<bool, ClientError> {
        self.requested.lock().unwrap().push(proof_id);
        self.valid.ok_or_else(|| ClientError::Contract("execution timeout".to_owned()))
    }

    async fn new_proof_filter(&self) -> Result<FilterId, ClientError> {
        if self.filter_fails {
            return Err(ClientError::Contract("eth_newFilter not supported".to_owned()));
        }
        Ok(FilterId::from(0x1d_u64))
    }

    async fn proof_events_since(&self, filter: FilterId) -> Result<Vec<ProofSubmitted>, ClientError> {
        assert_eq!(filter, FilterId::from(0x1d_u64));
        let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        let mut interrupt = self.interrupt.lock().unwrap();
        if interrupt.as_ref().is_some_and(|(after, _)| polls >= *after) {
            if let Some((_, tx)) = interrupt.take() {
                tx.send(()).ok();
            }
        }
        drop(interrupt);
        match self.batches.lock().unwrap().pop_front() {
            Some(batch) => batch.map_err(ClientError::Contract),
            None => Ok(vec![]),
        }
    }
}

pub fn sample_record() -> ProofRecord {
    ProofRecord {
        model_id: "resnet-50".to_owned(),
        proof_hash: H256::repeat_byte(0x07),
        submitter: Address::repeat_byte(0x33),
        valid: true,
        timestamp: U256::from(1_717_171_717u64),
    }
}

pub fn sample_event(seed: u8, model_id: &str, valid: bool) -> ProofSubmitted {
    ProofSubmitted {
        proof_id: ProofId::from([seed; 32]),
        submitter: Address::repeat_byte(seed),
        model_id: model_id.to_owned(),
        valid,
    }
}
