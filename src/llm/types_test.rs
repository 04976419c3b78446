// ABOUTME: Tests for LLM types - serialization, parsing, helpers.
// ABOUTME: Verifies role tags and provider-kind names match settings keys.

use super::*;
use crate::error::LlmError;

#[test]
fn test_role_serialization() {
    assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        "\"assistant\""
    );
}

#[test]
fn test_role_as_str_matches_serde() {
    for role in [Role::System, Role::User, Role::Assistant] {
        let json = serde_json::to_value(role).unwrap();
        assert_eq!(json, role.as_str());
    }
}

#[test]
fn test_message_helpers() {
    let msg = Message::user("Hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.content, "Hello");

    assert_eq!(Message::system("s").role, Role::System);
    assert_eq!(Message::assistant("a").role, Role::Assistant);
}

#[test]
fn test_message_json_shape() {
    let json = serde_json::to_value(Message::assistant("Hi there!")).unwrap();
    assert_eq!(json, serde_json::json!({"role": "assistant", "content": "Hi there!"}));
}

#[test]
fn test_provider_kind_parse() {
    for kind in ProviderKind::ALL {
        assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
}

#[test]
fn test_provider_kind_parse_unknown() {
    match "mistral".parse::<ProviderKind>() {
        Err(LlmError::UnknownProvider(name)) => assert_eq!(name, "mistral"),
        other => panic!("Expected UnknownProvider, got {:?}", other),
    }
}

#[test]
fn test_provider_kind_serde_matches_name() {
    for kind in ProviderKind::ALL {
        assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
    }
}

#[test]
fn test_protocol_default_is_https() {
    assert_eq!(Protocol::default(), Protocol::Https);
    assert_eq!(
        serde_json::from_str::<Protocol>("\"http\"").unwrap().scheme(),
        "http"
    );
}
