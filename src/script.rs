//! Script disassembly and pattern recognition
//!
//! A script is kept as its exact input bytes; the token list is derived from
//! them and never re-encoded, so `encode(decode(b)) == b` holds trivially.

use crate::address::pubkey_hash_to_address;
use crate::constants::PUBKEY_HASH_LEN;
use crate::error::{CodecError, Result};
use crate::opcodes::*;
use crate::stream::Reader;
use crate::types::*;
use tracing::trace;

/// Disassemble a script into opcode and push tokens
///
/// For each byte op read until the buffer is exhausted:
/// - 0x01 ≤ op ≤ 0x4b: push the next op bytes
/// - OP_PUSHDATA{1,2,4}: read a {1,2,4}-byte LE length, push that many bytes
/// - otherwise op must be a named opcode, else `UnknownOpcode`
pub fn disassemble(bytes: &[u8]) -> Result<Vec<ScriptToken>> {
    let mut reader = Reader::new(bytes);
    let mut tokens = Vec::new();

    while !reader.is_empty() {
        tokens.push(read_token(&mut reader)?);
    }

    Ok(tokens)
}

fn read_token(reader: &mut Reader<'_>) -> Result<ScriptToken> {
    let op = reader.read_u8()?;
    let len = match op {
        0x01..=MAX_DIRECT_PUSH => op as usize,
        OP_PUSHDATA1 => reader.read_u8()? as usize,
        OP_PUSHDATA2 => reader.read_u16()? as usize,
        OP_PUSHDATA4 => reader.read_u32()? as usize,
        _ => {
            return Opcode::from_byte(op)
                .map(ScriptToken::Opcode)
                .ok_or(CodecError::UnknownOpcode(op));
        }
    };
    Ok(ScriptToken::Push(reader.read_bytes(len)?))
}

/// Extract the public key hash if the tokens start with the P2PKH template
///
/// OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG
pub fn match_p2pkh(tokens: &[ScriptToken]) -> Option<&[u8]> {
    match tokens {
        [ScriptToken::Opcode(Opcode::OpDup), ScriptToken::Opcode(Opcode::OpHash160), ScriptToken::Push(hash), ScriptToken::Opcode(Opcode::OpEqualVerify), ScriptToken::Opcode(Opcode::OpCheckSig), ..]
            if hash.len() == PUBKEY_HASH_LEN =>
        {
            Some(hash.as_slice())
        }
        _ => None,
    }
}

/// Decode a script, extracting a P2PKH address for `network` when present
pub fn decode_script(bytes: &[u8], network: Network) -> Result<Script> {
    let tokens = disassemble(bytes)?;

    let addresses = match match_p2pkh(&tokens) {
        Some(hash) => vec![pubkey_hash_to_address(hash, network)?],
        None => Vec::new(),
    };

    trace!(
        len = bytes.len(),
        tokens = tokens.len(),
        addresses = addresses.len(),
        "decoded script"
    );

    Ok(Script {
        bytes: bytes.to_vec(),
        tokens,
        addresses,
    })
}

/// Encode a script: the exact bytes it was built from
pub fn encode_script(script: &Script) -> ByteString {
    script.bytes.clone()
}

impl Script {
    /// Keep bytes verbatim without disassembly (coinbase data)
    pub fn raw(bytes: impl Into<ByteString>) -> Self {
        Script {
            bytes: bytes.into(),
            tokens: Vec::new(),
            addresses: Vec::new(),
        }
    }

    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self> {
        decode_script(bytes, network)
    }

    pub fn from_hex(s: &str, network: Network) -> Result<Self> {
        decode_script(&hex::decode(s)?, network)
    }

    pub fn to_bytes(&self) -> ByteString {
        encode_script(self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Space-joined disassembly: mnemonics and lowercase hex pushes
    pub fn asm(&self) -> String {
        self.tokens
            .iter()
            .map(|token| match token {
                ScriptToken::Opcode(op) => op.name().to_string(),
                ScriptToken::Push(data) => hex::encode(data),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pushed data items, in script order
    pub fn data(&self) -> Vec<&[u8]> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                ScriptToken::Push(data) => Some(data.as_slice()),
                ScriptToken::Opcode(_) => None,
            })
            .collect()
    }

    pub fn is_p2pkh(&self) -> bool {
        match_p2pkh(&self.tokens).is_some()
    }

    pub fn pubkey_hash(&self) -> Option<PubKeyHash> {
        match_p2pkh(&self.tokens).and_then(|hash| PubKeyHash::from_slice(hash).ok())
    }

    pub fn is_op_return(&self) -> bool {
        matches!(self.tokens.first(), Some(ScriptToken::Opcode(Opcode::OpReturn)))
    }
}
