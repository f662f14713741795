//! Script disassembly through the public API

use btc_wire::*;
use btc_wire::opcodes::Opcode;
use btc_wire::script::{disassemble, match_p2pkh};

#[test]
fn test_p2sh_has_no_address() {
    let script = Script::from_hex(
        "a914748284390f9e263a4b766a75d0633c50426eb87587",
        Network::Main,
    )
    .unwrap();
    assert_eq!(
        script.asm(),
        "OP_HASH160 748284390f9e263a4b766a75d0633c50426eb875 OP_EQUAL"
    );
    assert!(script.addresses.is_empty());
    assert!(script.pubkey_hash().is_none());
}

#[test]
fn test_multisig_disassembly() {
    let mut bytes = vec![0x51, 0x21];
    bytes.extend_from_slice(&[0x02; 33]);
    bytes.extend_from_slice(&[0x51, 0xae]);

    let tokens = disassemble(&bytes).unwrap();
    assert_eq!(
        tokens,
        vec![
            ScriptToken::Opcode(Opcode::Op1),
            ScriptToken::Push(vec![0x02; 33]),
            ScriptToken::Opcode(Opcode::Op1),
            ScriptToken::Opcode(Opcode::OpCheckMultiSig),
        ]
    );
    assert!(match_p2pkh(&tokens).is_none());
}

#[test]
fn test_every_named_opcode_decodes_alone() {
    for byte in 0u8..=0xb9 {
        if opcodes::is_push_opcode(byte) {
            continue;
        }
        let tokens = disassemble(&[byte]).unwrap();
        assert_eq!(tokens.len(), 1, "0x{byte:02x}");
        assert!(matches!(tokens[0], ScriptToken::Opcode(op) if op.to_byte() == byte));
    }
}

#[test]
fn test_every_undefined_byte_fails() {
    for byte in 0xbau8..=0xff {
        assert_eq!(disassemble(&[byte]), Err(CodecError::UnknownOpcode(byte)));
    }
}

#[test]
fn test_pushdata_lengths_read_little_endian() {
    let mut bytes = vec![0x4d, 0x00, 0x01];
    bytes.extend_from_slice(&[0xab; 256]);
    let script = Script::from_bytes(&bytes, Network::Main).unwrap();
    assert_eq!(script.data(), vec![&[0xab; 256][..]]);
    assert_eq!(script.to_bytes(), bytes);
}

#[test]
fn test_p2pkh_round_trip_through_address() {
    let codec = WireCodec::new(Network::Test);
    let script = codec
        .decode_script_hex("76a914426c1ad9fa94f9ea3e6f9248b8bff6768e3ac8c488ac")
        .unwrap();
    let address = &script.addresses[0];
    let pkh = codec.pubkey_hash_from_address(address.as_str()).unwrap();
    assert_eq!(Some(pkh), script.pubkey_hash());
    assert_eq!(pkh.to_script_pubkey(Network::Test), script);
}
