use std::{future::Future, io::Write, time::Duration};

use ethers::{types::H256, utils::to_checksum};
use tokio::time::MissedTickBehavior;

use crate::{
    client::{ProofClient, ProofRecord, ProofSubmitted},
    proof_id::parse_bytes32,
    Address, ClientError, ProofId,
};

/// Terminal transition of the listen loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupted,
    Failed,
}

/// Print the proof record for `proof_id` and the secondary validity check.
///
/// Failures of the remote calls are printed, not returned: only errors
/// writing to `out` are propagated.
pub async fn read<C, W>(client: &C, proof_id: &str, out: &mut W) -> std::io::Result<()>
where
    C: ProofClient + ?Sized,
    W: Write + Send,
{
    let proof_id: ProofId = match proof_id.parse() {
        Ok(id) => id,
        Err(e) => return writeln!(out, "Error fetching proof: invalid proof id {proof_id:?}: {e}"),
    };
    log::debug!("Reading proof {proof_id}");

    let record = match client.get_proof(proof_id).await {
        Ok(record) => record,
        Err(e) => return writeln!(out, "Error fetching proof: {e}"),
    };
    print_record(out, proof_id, &record)?;

    match client.is_proof_valid(proof_id).await {
        Ok(status) => writeln!(out, "onchain valid?: {status}"),
        Err(e) => writeln!(out, "Error checking validity: {e}"),
    }
}

fn print_record<W: Write>(out: &mut W, proof_id: ProofId, record: &ProofRecord) -> std::io::Result<()> {
    writeln!(out, "=== Proof Record ===")?;
    writeln!(out, "proofId     : {proof_id}")?;
    writeln!(out, "modelId     : {}", record.model_id)?;
    writeln!(out, "proofHash   : {:#x}", record.proof_hash)?;
    writeln!(out, "submitter   : {}", to_checksum(&record.submitter, None))?;
    writeln!(out, "valid       : {}", record.valid)?;
    writeln!(out, "timestamp   : {}", record.timestamp)
}

/// Wait for `connect` and then [`listen`] on the client it yields.
///
/// `shutdown` is already armed while the connection is being set up, so an
/// interrupt during a slow connect stops cleanly instead of killing the process.
pub async fn connect_and_listen<C, F, W, S>(
    connect: F,
    poll_interval: Duration,
    shutdown: S,
    out: &mut W,
) -> std::io::Result<StopReason>
where
    C: ProofClient + ?Sized,
    F: Future<Output = Result<Box<C>, ClientError>>,
    W: Write + Send,
    S: Future<Output = ()> + Send,
{
    tokio::pin!(shutdown);
    let connected = tokio::select! {
        biased;
        _ = &mut shutdown => None,
        res = connect => Some(res),
    };
    match connected {
        None => stopped(out),
        Some(Ok(client)) => listen(client.as_ref(), poll_interval, shutdown, out).await,
        Some(Err(e)) => failed(out, &e),
    }
}

/// Poll for `ProofSubmitted` events until `shutdown` resolves or a poll fails.
///
/// Events are printed in the order the node returns them. There is no retry:
/// the first failure ends the loop.
pub async fn listen<C, W, S>(
    client: &C,
    poll_interval: Duration,
    shutdown: S,
    out: &mut W,
) -> std::io::Result<StopReason>
where
    C: ProofClient + ?Sized,
    W: Write + Send,
    S: Future<Output = ()> + Send,
{
    tokio::pin!(shutdown);
    writeln!(out, "Listening for ProofSubmitted events. CTRL+C to exit.")?;
    out.flush()?;

    let created = tokio::select! {
        biased;
        _ = &mut shutdown => None,
        res = client.new_proof_filter() => Some(res),
    };
    let filter = match created {
        None => return stopped(out),
        Some(Ok(filter)) => filter,
        Some(Err(e)) => return failed(out, &e),
    };
    log::info!("Polling ProofSubmitted filter {filter:#x} every {poll_interval:?}");

    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => return stopped(out),
            _ = ticker.tick() => {}
        }
        let polled = tokio::select! {
            biased;
            _ = &mut shutdown => None,
            res = client.proof_events_since(filter) => Some(res),
        };
        match polled {
            None => return stopped(out),
            Some(Ok(events)) => {
                for event in &events {
                    print_event(out, event)?;
                }
                out.flush()?;
            }
            Some(Err(e)) => return failed(out, &e),
        }
    }
}

fn print_event<W: Write>(out: &mut W, event: &ProofSubmitted) -> std::io::Result<()> {
    writeln!(out, "---- ProofSubmitted ----")?;
    writeln!(out, "proofId: {}", event.proof_id)?;
    writeln!(out, "submitter: {}", to_checksum(&event.submitter, None))?;
    writeln!(out, "modelId: {}", event.model_id)?;
    writeln!(out, "valid: {}", event.valid)
}

fn stopped<W: Write>(out: &mut W) -> std::io::Result<StopReason> {
    writeln!(out, "Stopped listening.")?;
    Ok(StopReason::Interrupted)
}

fn failed<W: Write>(out: &mut W, err: &ClientError) -> std::io::Result<StopReason> {
    log::warn!("Listen loop stopped: {err:?}");
    writeln!(out, "Error while listening: {err}")?;
    Ok(StopReason::Failed)
}

/// Print the proof id the contract would assign to this submission.
pub fn proof_id<W: Write>(
    out: &mut W,
    model_id: &str,
    input_hash: &str,
    output_hash: &str,
    submitter: &str,
) -> std::io::Result<()> {
    match derive_proof_id(model_id, input_hash, output_hash, submitter) {
        Ok(id) => writeln!(out, "{id}"),
        Err(e) => writeln!(out, "Error computing proof id: {e}"),
    }
}

fn derive_proof_id(
    model_id: &str,
    input_hash: &str,
    output_hash: &str,
    submitter: &str,
) -> Result<ProofId, String> {
    let input = parse_bytes32(input_hash).map_err(|e| format!("input hash: {e}"))?;
    let output = parse_bytes32(output_hash).map_err(|e| format!("output hash: {e}"))?;
    let submitter: Address =
        submitter.trim().parse().map_err(|e| format!("submitter {submitter:?}: {e}"))?;
    Ok(ProofId::derive(model_id, H256(input), H256(output), submitter))
}
