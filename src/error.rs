//! Error types for wire-format decoding and encoding

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Invalid hex encoding: {0}")]
    InvalidHexEncoding(String),

    #[error("Unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    #[error("Invalid public key hash length: {0} bytes (expected 20)")]
    InvalidHashLength(usize),

    #[error("Invalid address version: expected 0x{expected:02x}, found 0x{found:02x}")]
    InvalidAddressVersion { expected: u8, found: u8 },

    #[error("Invalid address checksum")]
    InvalidChecksum,

    #[error("Invalid base58 character: {0:?}")]
    InvalidCharacter(char),

    #[error("Invalid address payload length: {0} bytes (expected 25)")]
    InvalidAddressLength(usize),

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

impl From<hex::FromHexError> for CodecError {
    fn from(err: hex::FromHexError) -> Self {
        CodecError::InvalidHexEncoding(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
