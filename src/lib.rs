//! # btc-wire
//!
//! Codec for the Bitcoin peer-to-peer wire format.
//!
//! This crate converts between raw bytes and structured transactions, blocks,
//! scripts and P2PKH addresses, and derives the two canonical identifiers
//! (txid and block hash). It performs no I/O and no semantic validation:
//! only structural (de)serialization.
//!
//! ## Layers
//!
//! - Hash primitives (`hashes`) and base58 (`base58`)
//! - Byte stream primitives (`stream`): LE integers, reversed hashes, varints
//! - Addresses (`address`): Base58Check over a 20-byte public key hash
//! - Scripts (`script`): disassembly and P2PKH recognition
//! - Transactions (`transaction`) and blocks (`block`)
//!
//! ## Design Principles
//!
//! 1. **Exact Round-Trip**: `encode(decode(b)) == b` for every decodable buffer
//! 2. **Explicit Network**: the address version byte comes from a `Network`
//!    argument, never from process-wide state
//! 3. **Pure Functions**: every call is synchronous and side-effect-free
//!
//! ## Usage
//!
//! ```rust
//! use btc_wire::WireCodec;
//! use btc_wire::types::*;
//!
//! let codec = WireCodec::new(Network::Test);
//! let script = codec
//!     .decode_script_hex("76a914cbc222711a230ecdd9a5aa65b61ed39c24db2b3488ac")
//!     .unwrap();
//! assert_eq!(script.addresses[0].as_str(), "mz6L2hYM8jPR5nhH6kEsc3DQFiSDA1Jqpa");
//! ```

pub mod types;
pub mod constants;
pub mod hashes;
pub mod base58;
pub mod stream;
pub mod opcodes;
pub mod address;
pub mod script;
pub mod transaction;
pub mod block;
pub mod error;

// Re-export commonly used types
pub use types::*;
pub use constants::*;
pub use error::{CodecError, Result};

/// Wire codec bound to a network
///
/// # Examples
///
/// ```
/// use btc_wire::WireCodec;
/// use btc_wire::types::*;
///
/// let codec = WireCodec::new(Network::Main);
/// let address = codec
///     .address_from_pubkey_hash(&[
///         0x01, 0x09, 0x66, 0x77, 0x60, 0x06, 0x95, 0x3d, 0x55, 0x67,
///         0x43, 0x9e, 0x5e, 0x39, 0xf8, 0x6a, 0x0d, 0x27, 0x3b, 0xee,
///     ])
///     .unwrap();
/// assert_eq!(address.as_str(), "16UwLL9Risc3QfPqBUvKofHmBQ7wMtjvM");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WireCodec {
    config: CodecConfig,
}

impl WireCodec {
    /// Create a codec for `network`
    ///
    /// # Examples
    ///
    /// ```
    /// use btc_wire::{Network, WireCodec};
    ///
    /// let codec = WireCodec::new(Network::Test);
    /// assert_eq!(codec.network(), Network::Test);
    /// ```
    pub fn new(network: Network) -> Self {
        Self::with_config(CodecConfig { network })
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    pub fn network(&self) -> Network {
        self.config.network
    }

    /// Decode a transaction
    ///
    /// # Examples
    ///
    /// ```
    /// use btc_wire::{Network, WireCodec};
    ///
    /// let codec = WireCodec::new(Network::Main);
    /// let tx = codec.decode_transaction_hex(
    ///     "01000000010000000000000000000000000000000000000000000000000000000000000000\
    ///      ffffffff03510101ffffffff010040075af07507001976a914267773999b776b6207750a90\
    ///      ba333b83850fffe288ac00000000",
    /// ).unwrap();
    /// assert!(tx.is_coinbase());
    /// assert_eq!(
    ///     codec.txid(&tx),
    ///     "a681519ea2d301638827ad779abcb925f3b2f34aff85d55b08aff7551c152a29"
    /// );
    /// ```
    pub fn decode_transaction(&self, bytes: &[u8]) -> Result<Transaction> {
        transaction::decode_transaction(bytes, self.network())
    }

    pub fn decode_transaction_hex(&self, s: &str) -> Result<Transaction> {
        Transaction::from_hex(s, self.network())
    }

    pub fn encode_transaction(&self, tx: &Transaction) -> ByteString {
        transaction::encode_transaction(tx)
    }

    pub fn encode_transaction_hex(&self, tx: &Transaction) -> String {
        tx.to_hex()
    }

    /// Transaction id in display hex
    pub fn txid(&self, tx: &Transaction) -> String {
        tx.txid_hex()
    }

    pub fn decode_block(&self, bytes: &[u8]) -> Result<Block> {
        block::decode_block(bytes, self.network())
    }

    pub fn decode_block_hex(&self, s: &str) -> Result<Block> {
        Block::from_hex(s, self.network())
    }

    pub fn encode_block(&self, block: &Block) -> ByteString {
        block::encode_block(block)
    }

    /// Block hash in display hex
    pub fn block_hash(&self, header: &BlockHeader) -> String {
        header.hash_hex()
    }

    pub fn decode_block_header(&self, bytes: &[u8]) -> Result<BlockHeader> {
        block::decode_block_header(bytes)
    }

    pub fn decode_block_header_hex(&self, s: &str) -> Result<BlockHeader> {
        BlockHeader::from_hex(s)
    }

    pub fn encode_block_header(&self, header: &BlockHeader) -> ByteString {
        block::encode_block_header(header)
    }

    pub fn decode_script(&self, bytes: &[u8]) -> Result<Script> {
        script::decode_script(bytes, self.network())
    }

    pub fn decode_script_hex(&self, s: &str) -> Result<Script> {
        Script::from_hex(s, self.network())
    }

    pub fn address_from_pubkey_hash(&self, pkh: &[u8]) -> Result<Address> {
        address::pubkey_hash_to_address(pkh, self.network())
    }

    pub fn pubkey_hash_from_address(&self, address: &str) -> Result<PubKeyHash> {
        Address::new(address).to_pubkey_hash(self.network())
    }

    pub fn validate_address(&self, address: &str) -> bool {
        Address::new(address).is_valid(self.network())
    }
}
