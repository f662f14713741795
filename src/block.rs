//! Block and block header wire codec
//!
//! Header = version:i32 ‖ prev_block_hash:32 (reversed) ‖ merkle_root:32 (reversed)
//!          ‖ timestamp:u32 ‖ bits:u32 ‖ nonce:u32
//! Block  = Header ‖ varint(|txs|) ‖ txs
//!
//! The header hash fields are copied through as-is; they are not checked
//! against the transactions.

use crate::constants::BLOCK_HEADER_SIZE;
use crate::error::Result;
use crate::hashes::sha256d_reversed;
use crate::stream::{Reader, Writer};
use crate::transaction::{read_transaction, write_transaction};
use crate::types::*;
use tracing::debug;

/// Read the 80 header bytes from the cursor
pub fn read_block_header(reader: &mut Reader<'_>) -> Result<BlockHeader> {
    Ok(BlockHeader {
        version: reader.read_i32()?,
        prev_block_hash: reader.read_hash()?,
        merkle_root: reader.read_hash()?,
        timestamp: reader.read_u32()?,
        bits: reader.read_u32()?,
        nonce: reader.read_u32()?,
    })
}

/// Append the 80 header bytes
pub fn write_block_header(writer: &mut Writer, header: &BlockHeader) {
    writer.write_i32(header.version);
    writer.write_hash(&header.prev_block_hash);
    writer.write_hash(&header.merkle_root);
    writer.write_u32(header.timestamp);
    writer.write_u32(header.bits);
    writer.write_u32(header.nonce);
}

/// Serialized header fields only, as hashed for the block hash
pub fn block_header_bytes(header: &BlockHeader) -> ByteString {
    let mut writer = Writer::new();
    write_block_header(&mut writer, header);
    writer.into_bytes()
}

/// Decode a standalone header record
///
/// Only the first 80 bytes are read; the trailing count and anything after
/// it are ignored.
pub fn decode_block_header(bytes: &[u8]) -> Result<BlockHeader> {
    let mut reader = Reader::new(bytes);
    let header = read_block_header(&mut reader)?;
    debug!(hash = %header.hash_hex(), "decoded block header");
    Ok(header)
}

/// Encode a standalone header record: 80 header bytes plus a zero tx count
pub fn encode_block_header(header: &BlockHeader) -> ByteString {
    let mut writer = Writer::new();
    write_block_header(&mut writer, header);
    writer.write_varint(0);
    writer.into_bytes()
}

/// Decode a block; bytes after the last transaction are ignored
pub fn decode_block(bytes: &[u8], network: Network) -> Result<Block> {
    let mut reader = Reader::new(bytes);
    let header = read_block_header(&mut reader)?;

    let tx_count = reader.read_varint()?;
    let mut transactions = Vec::new();
    for _ in 0..tx_count {
        transactions.push(read_transaction(&mut reader, network)?);
    }

    let block = Block {
        header,
        transactions,
    };
    debug!(
        hash = %hash_to_hex(&block.hash()),
        transactions = block.transactions.len(),
        size = reader.position(),
        "decoded block"
    );
    Ok(block)
}

pub fn encode_block(block: &Block) -> ByteString {
    let mut writer = Writer::new();
    write_block_header(&mut writer, &block.header);
    writer.write_varint(block.transactions.len() as u64);
    for tx in &block.transactions {
        write_transaction(&mut writer, tx);
    }
    writer.into_bytes()
}

/// CalculateBlockHash: reverse(SHA256d(serialize(header)))
pub fn calculate_block_hash(header: &BlockHeader) -> Hash {
    let bytes = block_header_bytes(header);
    debug_assert_eq!(bytes.len(), BLOCK_HEADER_SIZE);
    sha256d_reversed(&bytes)
}

impl BlockHeader {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        decode_block_header(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        decode_block_header(&hex::decode(s)?)
    }

    pub fn to_bytes(&self) -> ByteString {
        encode_block_header(self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn hash(&self) -> Hash {
        calculate_block_hash(self)
    }

    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash())
    }
}

impl Block {
    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self> {
        decode_block(bytes, network)
    }

    pub fn from_hex(s: &str, network: Network) -> Result<Self> {
        decode_block(&hex::decode(s)?, network)
    }

    pub fn to_bytes(&self) -> ByteString {
        encode_block(self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn hash_hex(&self) -> String {
        self.header.hash_hex()
    }

    /// The coinbase transaction, if the block starts with one
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.transactions.first().filter(|tx| tx.is_coinbase())
    }
}
