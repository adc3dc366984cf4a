//! Serializer contract tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use wampgate_core::{JsonSerializer, Message, MsgpackSerializer, Serializer, Value};

fn publish() -> Message {
    Message::new(vec![
        json!(16),
        json!(239714735),
        json!({ "acknowledge": true }),
        json!("com.myapp.mytopic1"),
        json!(["Hello, world!", -3, 2.5]),
        json!({ "color": "orange", "sizes": [23, 42, 7], "nothing": null }),
    ])
}

#[test]
fn json_decodes_what_it_encodes() {
    let codec = JsonSerializer::new();
    let msg = publish();
    let bytes = codec.serialize(&msg).unwrap();
    assert_eq!(codec.deserialize(&bytes).unwrap(), msg);
}

#[test]
fn json_wire_form_is_a_plain_array() {
    let bytes = JsonSerializer
        .serialize(&Message::new(vec![json!(1), json!("realm1"), json!({})]))
        .unwrap();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), r#"[1,"realm1",{}]"#);
}

#[test]
fn msgpack_decodes_what_it_encodes() {
    let codec = MsgpackSerializer::new();
    let msg = publish();
    let bytes = codec.serialize(&msg).unwrap();
    // fixarray with six elements
    assert_eq!(bytes[0], 0x96);
    assert_eq!(codec.deserialize(&bytes).unwrap(), msg);
}

#[test]
fn codecs_agree_on_the_message() {
    let msg = publish();
    let via_json = JsonSerializer
        .deserialize(&JsonSerializer.serialize(&msg).unwrap())
        .unwrap();
    let via_msgpack = MsgpackSerializer
        .deserialize(&MsgpackSerializer.serialize(&via_json).unwrap())
        .unwrap();
    assert_eq!(via_msgpack, msg);
}

#[test]
fn malformed_payloads_are_decode_failures() {
    let err = JsonSerializer.deserialize(b"[1, \"realm1\"").unwrap_err();
    assert_eq!(err.code().as_str(), "DECODE_FAILURE");

    let err = JsonSerializer.deserialize(br#"{"not":"an array"}"#).unwrap_err();
    assert_eq!(err.code().as_str(), "DECODE_FAILURE");

    // 0xc1 is never used in MessagePack
    let err = MsgpackSerializer.deserialize(&[0xc1]).unwrap_err();
    assert_eq!(err.code().as_str(), "DECODE_FAILURE");
}

#[test]
fn type_code_reads_the_leading_integer() {
    assert_eq!(publish().type_code(), Some(16));
    assert_eq!(Message::new(vec![json!("x")]).type_code(), None);
    assert_eq!(Message::default().type_code(), None);
}

#[test]
fn msgpack_bin_values_decode_as_bytes() {
    // [16, bin8 "abc"]
    let wire: [u8; 7] = [0x92, 0x10, 0xc4, 0x03, b'a', b'b', b'c'];
    let msg = MsgpackSerializer.deserialize(&wire).unwrap();
    assert_eq!(msg.type_code(), Some(16));
    assert_eq!(msg.elements()[1].as_bytes(), Some(&b"abc"[..]));
    assert_eq!(MsgpackSerializer.serialize(&msg).unwrap(), wire);
}

#[test]
fn msgpack_integer_map_keys_are_kept() {
    // [16, {1: 2}]
    let wire: [u8; 5] = [0x92, 0x10, 0x81, 0x01, 0x02];
    let msg = MsgpackSerializer.deserialize(&wire).unwrap();
    assert_eq!(
        msg.elements()[1],
        Value::Map(vec![(Value::UInt(1), Value::UInt(2))])
    );
    assert_eq!(MsgpackSerializer.serialize(&msg).unwrap(), wire);
}

#[test]
fn json_carries_bytes_as_prefixed_base64() {
    let msg = Message::new(vec![Value::UInt(16), Value::Bytes(b"abc".to_vec())]);

    let bytes = JsonSerializer.serialize(&msg).unwrap();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), r#"[16,"\u0000YWJj"]"#);
    assert_eq!(JsonSerializer.deserialize(&bytes).unwrap(), msg);

    // the same message survives a trip through both codecs
    let via_msgpack = MsgpackSerializer
        .deserialize(&MsgpackSerializer.serialize(&msg).unwrap())
        .unwrap();
    assert_eq!(via_msgpack, msg);

    let err = JsonSerializer.deserialize(b"[16,\"\\u0000!!not base64\"]").unwrap_err();
    assert_eq!(err.code().as_str(), "DECODE_FAILURE");
}
