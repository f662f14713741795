//! Hash primitives used by the wire codecs

use crate::types::Hash;
use bitcoin_hashes::{sha256d, Hash as BitcoinHash};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA256(SHA256(x))
pub fn sha256d(data: &[u8]) -> Hash {
    sha256d::Hash::hash(data).into_inner()
}

/// RIPEMD160(SHA256(x))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha256_hash = Sha256::digest(data);
    Ripemd160::digest(sha256_hash).into()
}

/// Double SHA-256 reversed into display order (txid, block hash)
pub fn sha256d_reversed(data: &[u8]) -> Hash {
    let mut hash = sha256d(data);
    hash.reverse();
    hash
}
