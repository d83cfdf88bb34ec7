// proofcortex-cli, reader for proof records of the ProofCortex verifier contract.
// Copyright (C) 2024 ProofCortex contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

pub mod cli;
mod client;
pub mod commands;
mod config;
mod contracts;
mod error;
mod proof_id;
mod transport;

pub use ethers::types::{Address, H256, U256};

pub use client::{
    decode_proof_event, get_client, EthersClient, FilterId, ProofClient, ProofRecord,
    ProofSubmitted,
};
pub use commands::StopReason;
pub use config::{Config, DEFAULT_POLL_INTERVAL};
pub use error::{ClientError, ConfigError};
pub use proof_id::{ProofId, ProofIdError};
pub use transport::Transport;
