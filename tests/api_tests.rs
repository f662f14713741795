//! Public API surface: facade, serialization and logging

use btc_wire::*;
use btc_wire::stream::{Reader, Writer};

const COINBASE_TX_HEX: &str = "01000000010000000000000000000000000000000000000000000000000000000000000000ffffffff03510101ffffffff010040075af07507001976a914267773999b776b6207750a90ba333b83850fffe288ac00000000";

#[test]
fn test_codec_config_from_json() {
    let config: CodecConfig = serde_json::from_str(r#"{"network":"test"}"#).unwrap();
    assert_eq!(config.network, Network::Test);

    let config: CodecConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, CodecConfig::default());

    let codec = WireCodec::with_config(config);
    assert_eq!(codec.network(), Network::Main);
}

#[test]
fn test_transaction_to_json() {
    let codec = WireCodec::new(Network::Main);
    let tx = codec.decode_transaction_hex(COINBASE_TX_HEX).unwrap();

    let value = serde_json::to_value(&tx).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["lock_time"], 0);
    assert_eq!(value["outputs"][0]["amount"], 2_100_000_000_000_000i64);
    assert_eq!(
        value["outputs"][0]["script_pubkey"]["addresses"][0],
        "14WPmvvGhno9DvPa7fUeqH5nGHJxVZRdag"
    );

    let back: Transaction = serde_json::from_value(value).unwrap();
    assert_eq!(back, tx);
}

#[test]
fn test_network_serde_names() {
    assert_eq!(serde_json::to_string(&Network::Main).unwrap(), r#""main""#);
    assert_eq!(serde_json::to_string(&Network::Test).unwrap(), r#""test""#);
}

#[test]
fn test_network_from_env() {
    std::env::set_var(NETWORK_ENV_KEY, "testnet");
    assert_eq!(Network::from_env(), Network::Test);
    std::env::set_var(NETWORK_ENV_KEY, "mainnet");
    assert_eq!(Network::from_env(), Network::Main);
    std::env::remove_var(NETWORK_ENV_KEY);
    assert_eq!(Network::from_env(), Network::Main);
}

#[test]
fn test_decode_with_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("btc_wire=trace"))
        .with_test_writer()
        .try_init();

    let codec = WireCodec::default();
    let tx = codec.decode_transaction_hex(COINBASE_TX_HEX).unwrap();
    assert!(tx.is_coinbase());
}

#[test]
fn test_stream_primitives_compose() {
    let mut writer = Writer::new();
    writer.write_i32(-2);
    writer.write_varint(300);
    writer.write_var_bytes(b"abc");
    writer.write_hash(&[0x11; 32]);
    assert_eq!(writer.len(), 4 + 3 + 4 + 32);

    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_i32().unwrap(), -2);
    assert_eq!(reader.read_varint().unwrap(), 300);
    assert_eq!(reader.read_var_bytes().unwrap(), b"abc".to_vec());
    assert_eq!(reader.read_hash().unwrap(), [0x11; 32]);
    assert!(reader.is_empty());
}

#[test]
fn test_satoshi_display() {
    assert_eq!(Satoshi(5_000_000_000).to_string(), "5000000000 sat");
    assert_eq!(Satoshi::from(21).as_i64(), 21);
    assert_eq!(Satoshi::from_btc(1.5).to_btc(), 1.5);
}
