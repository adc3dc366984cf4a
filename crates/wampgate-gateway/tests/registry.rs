//! Protocol registry invariants and post-upgrade resolution.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use serde_json::json;

use wampgate_core::{FrameKind, JsonSerializer, Message, MsgpackSerializer, Serializer};
use wampgate_gateway::registry::{builtin_entry, ProtocolRegistry};
use wampgate_gateway::transport::ws::resolve_protocol;
use wampgate_gateway::{BasicRouter, WebsocketServer};

#[test]
fn builtins_are_registered_in_order() {
    let reg = ProtocolRegistry::with_builtins();
    assert_eq!(reg.tokens(), ["wamp.2.json", "wamp.2.msgpack"]);

    let json = reg.resolve("wamp.2.json").unwrap();
    assert_eq!(json.frame_kind, FrameKind::Text);
    assert_eq!(json.serializer.name(), "json");

    let mp = reg.resolve("wamp.2.msgpack").unwrap();
    assert_eq!(mp.frame_kind, FrameKind::Binary);
    assert_eq!(mp.serializer.name(), "msgpack");
}

#[test]
fn duplicate_token_is_rejected_and_first_entry_kept() {
    let mut reg = ProtocolRegistry::new();
    reg.register("wamp.2.json", FrameKind::Text, Arc::new(JsonSerializer::new()))
        .unwrap();

    let err = reg
        .register("wamp.2.json", FrameKind::Binary, Arc::new(MsgpackSerializer::new()))
        .unwrap_err();
    assert_eq!(err.code().as_str(), "PROTOCOL_ALREADY_REGISTERED");

    let entry = reg.resolve("wamp.2.json").unwrap();
    assert_eq!(entry.frame_kind, FrameKind::Text);
    assert_eq!(entry.serializer.name(), "json");
    assert_eq!(reg.tokens(), ["wamp.2.json"]);
}

#[test]
fn invalid_frame_kind_leaves_registry_untouched() {
    let mut reg = ProtocolRegistry::with_builtins();
    for opcode in [0u8, 8, 9, 10, 42] {
        let err = reg
            .register_opcode("wamp.2.cbor", opcode, Arc::new(JsonSerializer::new()))
            .unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_FRAME_KIND", "opcode={opcode}");
    }
    assert!(reg.resolve("wamp.2.cbor").is_none());
    assert_eq!(reg.len(), 2);
    assert_eq!(reg.tokens().len(), 2);

    reg.register_opcode("wamp.2.cbor", 2, Arc::new(MsgpackSerializer::new()))
        .unwrap();
    assert_eq!(reg.resolve("wamp.2.cbor").unwrap().frame_kind, FrameKind::Binary);
}

#[test]
fn registered_json_protocol_round_trips() {
    let mut reg = ProtocolRegistry::new();
    reg.register("wamp.2.json", FrameKind::Text, Arc::new(JsonSerializer::new()))
        .unwrap();

    let entry = resolve_protocol(&reg, Some("wamp.2.json")).unwrap();
    assert_eq!(entry.frame_kind, FrameKind::Text);

    let msg = Message::new(vec![json!(48), json!(7814135), json!({}), json!("com.myapp.echo"), json!(["Hello, world!"])]);
    let bytes = entry.serializer.serialize(&msg).unwrap();
    assert_eq!(entry.serializer.deserialize(&bytes).unwrap(), msg);
}

#[test]
fn resolution_falls_back_to_builtins() {
    // negotiation and registry out of sync: nothing registered at all
    let reg = ProtocolRegistry::new();

    let entry = resolve_protocol(&reg, Some("wamp.2.msgpack")).unwrap();
    assert_eq!(entry.frame_kind, FrameKind::Binary);
    assert_eq!(entry.serializer.name(), "msgpack");

    let entry = resolve_protocol(&reg, Some("wamp.2.json")).unwrap();
    assert_eq!(entry.frame_kind, FrameKind::Text);
}

#[test]
fn unknown_or_missing_token_is_unrecognized() {
    let reg = ProtocolRegistry::with_builtins();
    for token in [Some("wamp.2.cbor"), Some(""), None] {
        let err = resolve_protocol(&reg, token).unwrap_err();
        assert_eq!(err.code().as_str(), "UNRECOGNIZED_PROTOCOL", "token={token:?}");
    }
    assert!(builtin_entry("wamp.2.cbor").is_none());
}

#[test]
fn server_builder_registers_before_serving() {
    let mut builder = WebsocketServer::builder(Arc::new(BasicRouter::new()));
    builder
        .register_protocol("wamp.2.json.alt", FrameKind::Text, Arc::new(JsonSerializer::new()))
        .unwrap();

    let err = builder
        .register_protocol("wamp.2.msgpack", FrameKind::Binary, Arc::new(MsgpackSerializer::new()))
        .unwrap_err();
    assert_eq!(err.code().as_str(), "PROTOCOL_ALREADY_REGISTERED");

    let err = builder
        .register_protocol_opcode("wamp.2.odd", 9, Arc::new(JsonSerializer::new()))
        .unwrap_err();
    assert_eq!(err.code().as_str(), "INVALID_FRAME_KIND");

    let server = builder.build();
    assert_eq!(server.protocols(), ["wamp.2.json", "wamp.2.msgpack", "wamp.2.json.alt"]);
}
