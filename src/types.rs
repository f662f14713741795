//! Core Bitcoin wire types

use crate::constants::*;
use crate::error::{CodecError, Result};
use crate::opcodes::Opcode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash type: 256-bit hash, held in display (reversed wire) byte order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Satoshi: signed count of the smallest currency unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Satoshi(pub i64);

impl Satoshi {
    /// Convert a whole-coin amount at scale 10^8, rounding to the nearest satoshi
    pub fn from_btc(btc: f64) -> Self {
        Satoshi((btc * SATOSHIS_PER_BTC as f64).round() as i64)
    }

    pub fn to_btc(self) -> f64 {
        self.0 as f64 / SATOSHIS_PER_BTC as f64
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for Satoshi {
    fn from(value: i64) -> Self {
        Satoshi(value)
    }
}

impl fmt::Display for Satoshi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sat", self.0)
    }
}

/// Network selecting the P2PKH address version byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
}

impl Network {
    pub fn address_version(self) -> u8 {
        match self {
            Network::Main => ADDRESS_VERSION_MAIN,
            Network::Test => ADDRESS_VERSION_TEST,
        }
    }

    /// Read `BTC_NETWORK_TYPE`; `testnet` selects the test network, anything else main
    pub fn from_env() -> Self {
        match std::env::var(NETWORK_ENV_KEY) {
            Ok(value) if value == "testnet" => Network::Test,
            _ => Network::Main,
        }
    }
}

impl FromStr for Network {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Test),
            other => Err(CodecError::UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => f.write_str("mainnet"),
            Network::Test => f.write_str("testnet"),
        }
    }
}

/// Codec configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub network: Network,
}

/// Public key hash: RIPEMD160(SHA256(pubkey))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PubKeyHash(pub [u8; PUBKEY_HASH_LEN]);

/// Base58Check P2PKH address string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

/// One element of a script disassembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptToken {
    Opcode(Opcode),
    Push(ByteString),
}

/// Script: raw bytes plus the disassembly derived from them
///
/// `tokens` and `addresses` are empty for scripts stored raw (coinbase data).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub bytes: ByteString,
    pub tokens: Vec<ScriptToken>,
    pub addresses: Vec<Address>,
}

/// Transaction Input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub prev_txid: Hash,
    pub index: u32,
    pub script_sig: Script,
    pub sequence: u32,
}

/// Transaction Output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub amount: Satoshi,
    pub script_pubkey: Script,
}

/// Transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

/// Block Header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub version: i32,
    pub prev_block_hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

/// Block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

/// Hex-encode a hash held in display order
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

/// Parse a 64-character display-order hash
pub fn hash_from_hex(s: &str) -> Result<Hash> {
    let mut hash = [0u8; 32];
    hex::decode_to_slice(s, &mut hash)?;
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satoshi_btc_conversion() {
        assert_eq!(Satoshi::from_btc(50.0), Satoshi(5_000_000_000));
        assert_eq!(Satoshi::from_btc(0.29), Satoshi(29_000_000));
        assert_eq!(Satoshi(124_999_929_280).to_btc(), 1249.9992928);
        assert_eq!(Satoshi(-1).to_btc(), -0.00000001);
    }

    #[test]
    fn test_network_address_version() {
        assert_eq!(Network::Main.address_version(), 0x00);
        assert_eq!(Network::Test.address_version(), 0x6f);
        assert_eq!(Network::default(), Network::Main);
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("test".parse::<Network>().unwrap(), Network::Test);
        assert_eq!(
            "regtest".parse::<Network>(),
            Err(CodecError::UnknownNetwork("regtest".to_string()))
        );
        assert_eq!(Network::Test.to_string(), "testnet");
    }

    #[test]
    fn test_codec_config_default() {
        let config = CodecConfig::default();
        assert_eq!(config.network, Network::Main);
    }

    #[test]
    fn test_hash_hex_helpers() {
        let s = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
        let hash = hash_from_hex(s).unwrap();
        assert_eq!(hash[0], 0x4a);
        assert_eq!(hash_to_hex(&hash), s);
    }

    #[test]
    fn test_hash_from_hex_wrong_length() {
        assert!(matches!(
            hash_from_hex("abcd"),
            Err(CodecError::InvalidHexEncoding(_))
        ));
        assert!(matches!(
            hash_from_hex(&"zz".repeat(32)),
            Err(CodecError::InvalidHexEncoding(_))
        ));
    }
}
