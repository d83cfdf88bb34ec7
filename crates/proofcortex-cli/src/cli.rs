use clap::{Args, Parser, Subcommand};

/// Read proofs from the VeriCortexVerifier contract on BlockDAG.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a proof record by proofId (hex bytes32)
    Read {
        /// Proof identifier, with or without the 0x prefix
        proof_id: String,

        #[command(flatten)]
        rpc: RpcArgs,
    },

    /// Listen for ProofSubmitted events (long-running)
    Listen {
        #[command(flatten)]
        rpc: RpcArgs,

        /// Delay between two polls of the event filter, in milliseconds
        #[arg(
            long,
            env = "POLL_INTERVAL_MS",
            default_value_t = 2000,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        poll_interval: u64,
    },

    /// Compute the proofId the verifier assigns to a submission
    ProofId {
        model_id: String,
        /// bytes32 hash of the model input
        input_hash: String,
        /// bytes32 hash of the model output
        output_hash: String,
        /// Address of the submitting account
        submitter: String,
    },
}

#[derive(Args, Clone, Debug, Default)]
pub struct RpcArgs {
    /// RPC URL override
    #[arg(long = "rpc", env = "BLOCKDAG_RPC")]
    pub rpc_url: Option<String>,

    /// Verifier contract address override
    #[arg(long = "contract", env = "VERIFIER_ADDRESS")]
    pub contract_addr: Option<String>,
}
