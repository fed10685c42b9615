//! Template Tests
//!
//! Covers loading caller templates from JSON and the committed save payload.

#![cfg(feature = "json")]

use proxyprofile::{
    Edit, Field, FieldValue, ProfileEditor, ProfileRouter, Protocol, ProtocolChoice, ProxyProfile,
    Scheme,
};
use serde_json::json;

const TEMPLATE: &str = r#"{
    "default": {"protocol": "socks5", "server": "gw.local", "port": 1080, "user": ""},
    "http": {"useDefault": true, "server": "left over"},
    "https": {"useDefault": false, "protocol": "https", "server": " edge.local ", "port": "8443"},
    "bypassList": ["localhost", "  ", " *.corp "]
}"#;

#[test]
fn test_load_template() {
    let profile = ProxyProfile::from_json(TEMPLATE).unwrap();
    assert_eq!(profile.default.protocol, Protocol::Socks5);
    assert!(profile.http.use_default);
    assert!(profile.http.server.is_empty());
    assert_eq!(profile.https.port, Some(8443));
    assert!(profile.ftp.use_default);
    assert_eq!(profile.bypass_list.len(), 3);
}

#[test]
fn test_committed_payload_shape() {
    let template = ProxyProfile::from_json(TEMPLATE).unwrap();
    let mut editor = ProfileEditor::load(&template);
    editor.set_field(Scheme::Ftp, Edit::Protocol(Protocol::Direct));

    let mut saved = None;
    editor.save(|p| saved = Some(p)).unwrap();
    let payload = serde_json::to_value(saved.unwrap()).unwrap();

    assert_eq!(
        payload,
        json!({
            "default": {
                "useDefault": false,
                "protocol": "socks5",
                "server": "gw.local",
                "port": 1080,
                "user": "",
                "password": ""
            },
            "http": { "useDefault": true },
            "https": {
                "useDefault": false,
                "protocol": "https",
                "server": "edge.local",
                "port": 8443,
                "user": "",
                "password": ""
            },
            "ftp": {
                "useDefault": false,
                "protocol": "direct",
                "server": "",
                "user": "",
                "password": ""
            },
            "bypassList": ["localhost", "*.corp"]
        })
    );
}

#[test]
fn test_json_round_trip_of_committed_profile() {
    let template = ProxyProfile::from_json(TEMPLATE).unwrap();
    let committed = ProfileEditor::load(&template).commit();
    let json = committed.to_json().unwrap();
    let reloaded = ProxyProfile::from_json(&json).unwrap();
    assert_eq!(reloaded, committed);
}

#[test]
fn test_default_without_protocol_proxies() {
    let template = ProxyProfile::from_json(r#"{"default":{"server":"proxy.local","port":8080}}"#)
        .unwrap();
    let editor = ProfileEditor::load(&template);

    assert_eq!(
        editor.selected_choice(Scheme::Default),
        ProtocolChoice::Protocol(Protocol::Http)
    );
    assert_eq!(
        editor.resolve(Scheme::Http, Field::Protocol),
        FieldValue::Protocol(Protocol::Http)
    );
    assert!(editor.is_valid(Scheme::Default));

    let router = ProfileRouter::new(template);
    let route = router.route_str("http://example.com/").unwrap();
    let proxy = route.endpoint().unwrap();
    assert_eq!(proxy.host_port(), ("proxy.local", 8080));
}

#[test]
fn test_blank_default_without_protocol_needs_server() {
    let editor = ProfileEditor::load(&ProxyProfile::from_json(r#"{"default": {}}"#).unwrap());
    assert!(!editor.is_valid(Scheme::Default));
}

#[test]
fn test_inheriting_default_keeps_its_values() {
    let json = r#"{
        "default": {"useDefault": true, "protocol": "socks5", "server": "gw", "port": 1080}
    }"#;
    let profile = ProxyProfile::from_json(json).unwrap();

    assert!(!profile.default.use_default);
    assert_eq!(profile.default.protocol, Protocol::Socks5);
    assert_eq!(profile.default.server, "gw");
    assert_eq!(profile.default.port, Some(1080));
}

#[test]
fn test_malformed_template() {
    let bad_port = ProxyProfile::from_json(r#"{"https": {"port": 70000}}"#);
    assert!(bad_port.is_err());
    assert!(ProxyProfile::from_json(r#"{"default": 42}"#).is_err());
}
