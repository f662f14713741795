//! Bitcoin wire-format constants

use crate::types::Hash;

/// Satoshis per BTC
pub const SATOSHIS_PER_BTC: i64 = 100_000_000;

/// Default transaction version for newly built transactions
pub const TX_VERSION: i32 = 1;

/// Default lock time for newly built transactions
pub const TX_LOCK_TIME: u32 = 0;

/// Sequence number for final transaction input
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Previous-txid sentinel referenced by a coinbase input
pub const COINBASE_TXID: Hash = [0u8; 32];

/// Length of a public key hash (RIPEMD160(SHA256(pubkey)))
pub const PUBKEY_HASH_LEN: usize = 20;

/// Length of the Base58Check checksum
pub const CHECKSUM_LEN: usize = 4;

/// Length of a decoded P2PKH address: version + hash + checksum
pub const ADDRESS_PAYLOAD_LEN: usize = 1 + PUBKEY_HASH_LEN + CHECKSUM_LEN;

/// P2PKH address version byte on main network
pub const ADDRESS_VERSION_MAIN: u8 = 0x00;

/// P2PKH address version byte on test network
pub const ADDRESS_VERSION_TEST: u8 = 0x6f;

/// Serialized block header size (without the transaction count)
pub const BLOCK_HEADER_SIZE: usize = 80;

/// Environment variable consulted by `Network::from_env`
pub const NETWORK_ENV_KEY: &str = "BTC_NETWORK_TYPE";

/// Bitcoin base58 alphabet: no 0, O, I or l
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
