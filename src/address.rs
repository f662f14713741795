//! Base58Check P2PKH addresses
//!
//! Address(pkh, net) = Base58(v ‖ pkh ‖ SHA256d(v ‖ pkh)[0..4]) where v is the
//! network's version byte.

use crate::base58;
use crate::constants::*;
use crate::error::{CodecError, Result};
use crate::hashes::{hash160, sha256d};
use crate::opcodes::Opcode;
use crate::types::*;
use std::fmt;
use tracing::trace;

impl PubKeyHash {
    /// Build from a byte slice that must be exactly 20 bytes long
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let hash: [u8; PUBKEY_HASH_LEN] = bytes
            .try_into()
            .map_err(|_| CodecError::InvalidHashLength(bytes.len()))?;
        Ok(PubKeyHash(hash))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(s)?)
    }

    /// Hash a serialized public key: RIPEMD160(SHA256(pubkey))
    pub fn from_public_key(pubkey: &[u8]) -> Self {
        PubKeyHash(hash160(pubkey))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Encode as an address for `network`
    pub fn to_address(&self, network: Network) -> Address {
        let mut payload = Vec::with_capacity(ADDRESS_PAYLOAD_LEN);
        payload.push(network.address_version());
        payload.extend_from_slice(&self.0);
        let checksum = sha256d(&payload);
        payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
        Address(base58::encode(&payload))
    }

    /// Canonical P2PKH locking script for this hash, addressed on `network`
    pub fn to_script_pubkey(&self, network: Network) -> Script {
        let mut bytes = Vec::with_capacity(PUBKEY_HASH_LEN + 5);
        bytes.push(Opcode::OpDup.to_byte());
        bytes.push(Opcode::OpHash160.to_byte());
        bytes.push(PUBKEY_HASH_LEN as u8);
        bytes.extend_from_slice(&self.0);
        bytes.push(Opcode::OpEqualVerify.to_byte());
        bytes.push(Opcode::OpCheckSig.to_byte());
        Script {
            bytes,
            tokens: vec![
                ScriptToken::Opcode(Opcode::OpDup),
                ScriptToken::Opcode(Opcode::OpHash160),
                ScriptToken::Push(self.0.to_vec()),
                ScriptToken::Opcode(Opcode::OpEqualVerify),
                ScriptToken::Opcode(Opcode::OpCheckSig),
            ],
            addresses: vec![self.to_address(network)],
        }
    }
}

impl fmt::Display for PubKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Encode a raw public key hash, rejecting anything that is not 20 bytes
pub fn pubkey_hash_to_address(pkh: &[u8], network: Network) -> Result<Address> {
    let address = PubKeyHash::from_slice(pkh)?.to_address(network);
    trace!(%network, address = %address, "encoded address");
    Ok(address)
}

impl Address {
    pub fn new(s: impl Into<String>) -> Self {
        Address(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode to the embedded public key hash
    ///
    /// Checks, in order: base58 alphabet, payload length, version byte for
    /// `network`, and checksum.
    pub fn to_pubkey_hash(&self, network: Network) -> Result<PubKeyHash> {
        let payload = base58::decode(&self.0)?;
        if payload.len() != ADDRESS_PAYLOAD_LEN {
            return Err(CodecError::InvalidAddressLength(payload.len()));
        }

        let (versioned, checksum) = payload.split_at(payload.len() - CHECKSUM_LEN);
        let expected = network.address_version();
        if versioned[0] != expected {
            return Err(CodecError::InvalidAddressVersion {
                expected,
                found: versioned[0],
            });
        }

        if sha256d(versioned)[..CHECKSUM_LEN] != *checksum {
            return Err(CodecError::InvalidChecksum);
        }

        PubKeyHash::from_slice(&versioned[1..])
    }

    /// Whether the address decodes cleanly for `network`
    pub fn is_valid(&self, network: Network) -> bool {
        self.to_pubkey_hash(network).is_ok()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
