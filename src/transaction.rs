//! Transaction wire codec
//!
//! Tx = version:i32 ‖ varint(|ins|) ‖ ins ‖ varint(|outs|) ‖ outs ‖ lock_time:u32
//! In = prev_txid:32 (reversed) ‖ index:u32 ‖ varint(|script|) ‖ script ‖ sequence:u32
//! Out = amount:i64 ‖ varint(|script|) ‖ script

use crate::constants::*;
use crate::error::Result;
use crate::hashes::sha256d_reversed;
use crate::script::decode_script;
use crate::stream::{Reader, Writer};
use crate::types::*;
use tracing::debug;

/// Read one transaction from the cursor
pub fn read_transaction(reader: &mut Reader<'_>, network: Network) -> Result<Transaction> {
    let version = reader.read_i32()?;

    let input_count = reader.read_varint()?;
    let mut inputs = Vec::new();
    for _ in 0..input_count {
        inputs.push(read_input(reader, network)?);
    }

    let output_count = reader.read_varint()?;
    let mut outputs = Vec::new();
    for _ in 0..output_count {
        outputs.push(read_output(reader, network)?);
    }

    let lock_time = reader.read_u32()?;

    Ok(Transaction {
        version,
        inputs,
        outputs,
        lock_time,
    })
}

/// Read one input
///
/// A coinbase input's script is miner data rather than a program, so it is
/// kept raw instead of being disassembled.
fn read_input(reader: &mut Reader<'_>, network: Network) -> Result<TxInput> {
    let prev_txid = reader.read_hash()?;
    let index = reader.read_u32()?;
    let script_bytes = reader.read_var_bytes()?;
    let script_sig = if prev_txid == COINBASE_TXID {
        Script::raw(script_bytes)
    } else {
        decode_script(&script_bytes, network)?
    };
    let sequence = reader.read_u32()?;

    Ok(TxInput {
        prev_txid,
        index,
        script_sig,
        sequence,
    })
}

fn read_output(reader: &mut Reader<'_>, network: Network) -> Result<TxOutput> {
    let amount = Satoshi(reader.read_i64()?);
    let script_bytes = reader.read_var_bytes()?;
    let script_pubkey = decode_script(&script_bytes, network)?;

    Ok(TxOutput {
        amount,
        script_pubkey,
    })
}

/// Append the wire encoding of `tx`
pub fn write_transaction(writer: &mut Writer, tx: &Transaction) {
    writer.write_i32(tx.version);

    writer.write_varint(tx.inputs.len() as u64);
    for input in &tx.inputs {
        writer.write_hash(&input.prev_txid);
        writer.write_u32(input.index);
        writer.write_var_bytes(&input.script_sig.bytes);
        writer.write_u32(input.sequence);
    }

    writer.write_varint(tx.outputs.len() as u64);
    for output in &tx.outputs {
        writer.write_i64(output.amount.0);
        writer.write_var_bytes(&output.script_pubkey.bytes);
    }

    writer.write_u32(tx.lock_time);
}

/// Decode a transaction; bytes after the lock time are ignored
pub fn decode_transaction(bytes: &[u8], network: Network) -> Result<Transaction> {
    let mut reader = Reader::new(bytes);
    let tx = read_transaction(&mut reader, network)?;
    debug!(
        inputs = tx.inputs.len(),
        outputs = tx.outputs.len(),
        size = reader.position(),
        "decoded transaction"
    );
    Ok(tx)
}

pub fn encode_transaction(tx: &Transaction) -> ByteString {
    let mut writer = Writer::new();
    write_transaction(&mut writer, tx);
    writer.into_bytes()
}

/// CalculateTxId: reverse(SHA256d(serialize(tx)))
pub fn calculate_tx_id(tx: &Transaction) -> Hash {
    sha256d_reversed(&encode_transaction(tx))
}

/// Check if transaction is coinbase
pub fn is_coinbase(tx: &Transaction) -> bool {
    tx.inputs.len() == 1 && tx.inputs[0].is_coinbase()
}

impl TxInput {
    /// New input with the final sequence number
    pub fn new(prev_txid: Hash, index: u32, script_sig: Script) -> Self {
        TxInput {
            prev_txid,
            index,
            script_sig,
            sequence: SEQUENCE_FINAL,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.prev_txid == COINBASE_TXID
    }
}

impl TxOutput {
    pub fn new(amount: Satoshi, script_pubkey: Script) -> Self {
        TxOutput {
            amount,
            script_pubkey,
        }
    }

    pub fn addresses(&self) -> &[Address] {
        &self.script_pubkey.addresses
    }
}

impl Transaction {
    /// Empty transaction with default version and lock time
    pub fn new() -> Self {
        Transaction {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: TX_LOCK_TIME,
        }
    }

    pub fn add_input(&mut self, input: TxInput) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TxOutput) {
        self.outputs.push(output);
    }

    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self> {
        decode_transaction(bytes, network)
    }

    pub fn from_hex(s: &str, network: Network) -> Result<Self> {
        decode_transaction(&hex::decode(s)?, network)
    }

    pub fn to_bytes(&self) -> ByteString {
        encode_transaction(self)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn txid(&self) -> Hash {
        calculate_tx_id(self)
    }

    /// Txid as 64 lowercase hex characters in display order
    pub fn txid_hex(&self) -> String {
        hash_to_hex(&self.txid())
    }

    pub fn is_coinbase(&self) -> bool {
        is_coinbase(self)
    }

    /// Sum of output amounts
    pub fn total_output(&self) -> Satoshi {
        Satoshi(self.outputs.iter().map(|o| o.amount.0).sum())
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use hex_literal::hex;

    const COINBASE_TX_HEX: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff03510101ffffffff010040075af07507001976a914267773999b776b6207750a90ba333b83850fffe288ac00000000";

    fn p2pkh_output(amount: i64) -> TxOutput {
        TxOutput::new(
            Satoshi(amount),
            PubKeyHash(hex!("cbc222711a230ecdd9a5aa65b61ed39c24db2b34")).to_script_pubkey(Network::Test),
        )
    }

    #[test]
    fn test_decode_coinbase_transaction() {
        let tx = Transaction::from_hex(COINBASE_TX_HEX, Network::Test).unwrap();
        assert_eq!(tx.version, 1);
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(tx.outputs.len(), 1);
        assert_eq!(tx.lock_time, 0);

        let input = &tx.inputs[0];
        assert!(input.is_coinbase());
        assert_eq!(input.index, 0xffffffff);
        assert_eq!(input.script_sig.bytes, vec![0x51, 0x01, 0x01]);
        assert!(input.script_sig.tokens.is_empty());
        assert_eq!(input.sequence, 0xffffffff);

        assert_eq!(tx.outputs[0].amount, Satoshi(2_100_000_000_000_000));
        assert!(tx.outputs[0].script_pubkey.is_p2pkh());

        assert_eq!(
            tx.txid_hex(),
            "a681519ea2d301638827ad779abcb925f3b2f34aff85d55b08aff7551c152a29"
        );
        assert_eq!(tx.to_hex(), COINBASE_TX_HEX);
    }

    #[test]
    fn test_coinbase_script_not_disassembled() {
        // 0xff is not a valid opcode, but coinbase data is never parsed
        let mut tx = Transaction::new();
        tx.add_input(TxInput::new(COINBASE_TXID, 0xffffffff, Script::raw(vec![0xff, 0xba])));
        tx.add_output(p2pkh_output(50));

        let decoded = decode_transaction(&tx.to_bytes(), Network::Main).unwrap();
        assert_eq!(decoded.inputs[0].script_sig.bytes, vec![0xff, 0xba]);
        assert!(decoded.is_coinbase());
    }

    #[test]
    fn test_non_coinbase_script_is_validated() {
        let mut tx = Transaction::new();
        tx.add_input(TxInput::new([1u8; 32], 0, Script::raw(vec![0xff])));
        tx.add_output(p2pkh_output(50));

        assert_eq!(
            decode_transaction(&tx.to_bytes(), Network::Main),
            Err(CodecError::UnknownOpcode(0xff))
        );
    }

    #[test]
    fn test_prev_txid_reversed_on_wire() {
        let mut prev_txid = [0u8; 32];
        prev_txid[0] = 0x56;
        prev_txid[31] = 0xce;

        let mut tx = Transaction::new();
        tx.add_input(TxInput::new(prev_txid, 1, Script::default()));
        let bytes = tx.to_bytes();

        // version(4) + count(1), then the hash in wire order
        assert_eq!(bytes[5], 0xce);
        assert_eq!(bytes[36], 0x56);

        let decoded = decode_transaction(&bytes, Network::Main).unwrap();
        assert_eq!(decoded.inputs[0].prev_txid, prev_txid);
    }

    #[test]
    fn test_empty_transaction_round_trip() {
        let tx = Transaction::new();
        let bytes = tx.to_bytes();
        assert_eq!(bytes, hex!("01000000000000000000").to_vec());
        assert_eq!(decode_transaction(&bytes, Network::Main).unwrap(), tx);
    }

    #[test]
    fn test_negative_amount_round_trip() {
        let mut tx = Transaction::new();
        tx.add_output(p2pkh_output(-1));
        let decoded = decode_transaction(&tx.to_bytes(), Network::Main).unwrap();
        assert_eq!(decoded.outputs[0].amount, Satoshi(-1));
    }

    #[test]
    fn test_truncated_transaction() {
        let bytes = hex::decode(COINBASE_TX_HEX).unwrap();
        for cut in [0, 3, 4, 40, bytes.len() - 1] {
            assert!(
                matches!(
                    decode_transaction(&bytes[..cut], Network::Main),
                    Err(CodecError::UnexpectedEof { .. })
                ),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(
            Transaction::from_hex("0100zz", Network::Main),
            Err(CodecError::InvalidHexEncoding(_))
        ));
    }

    #[test]
    fn test_txid_changes_with_lock_time() {
        let mut tx = Transaction::new();
        tx.add_output(p2pkh_output(1000));
        let txid = tx.txid();
        tx.lock_time = 1;
        assert_ne!(tx.txid(), txid);
    }

    #[test]
    fn test_total_output() {
        let mut tx = Transaction::new();
        tx.add_output(p2pkh_output(1000));
        tx.add_output(p2pkh_output(2500));
        assert_eq!(tx.total_output(), Satoshi(3500));
        assert_eq!(
            tx.outputs[0].addresses(),
            &[Address::new("mz6L2hYM8jPR5nhH6kEsc3DQFiSDA1Jqpa")]
        );
    }

    #[test]
    fn test_built_transaction_matches_decoded() {
        let mut tx = Transaction::new();
        tx.add_input(TxInput::new([7u8; 32], 0, Script::default()));
        tx.add_output(p2pkh_output(5_000_000_000));

        let decoded = decode_transaction(&tx.to_bytes(), Network::Test).unwrap();
        assert!(decoded.outputs[0].script_pubkey.is_p2pkh());
        assert_eq!(decoded, tx);
    }
}
