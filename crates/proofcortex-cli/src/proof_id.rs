use std::{fmt, str::FromStr};

use ethers::{types::H256, utils::keccak256};

use crate::Address;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProofIdError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Expected 32 bytes (64 hex digits), got {0} hex digits")]
    InvalidLength(usize),
}

/// 32-byte on-chain proof identifier.
///
/// Parses from hex with or without a `0x` prefix and always displays
/// in the canonical lowercase `0x`-prefixed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProofId([u8; 32]);

impl ProofId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Identifier the verifier contract assigns on submission:
    /// `keccak256(abi.encodePacked(modelId, inputHash, outputHash, submitter))`.
    pub fn derive(model_id: &str, input_hash: H256, output_hash: H256, submitter: Address) -> Self {
        let mut packed = Vec::with_capacity(model_id.len() + 32 + 32 + 20);
        packed.extend_from_slice(model_id.as_bytes());
        packed.extend_from_slice(input_hash.as_bytes());
        packed.extend_from_slice(output_hash.as_bytes());
        packed.extend_from_slice(submitter.as_bytes());
        Self(keccak256(packed))
    }
}

impl From<[u8; 32]> for ProofId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<ProofId> for H256 {
    fn from(id: ProofId) -> Self {
        Self(id.0)
    }
}

impl FromStr for ProofId {
    type Err = ProofIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bytes32(s).map(Self)
    }
}

impl fmt::Display for ProofId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Parse a `bytes32` hex value, prefix optional.
pub fn parse_bytes32(s: &str) -> Result<[u8; 32], ProofIdError> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() != 64 {
        return Err(ProofIdError::InvalidLength(digits.len()));
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(bytes)
}
