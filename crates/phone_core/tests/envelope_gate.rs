use phone_core::parse_envelope;
use serde_json::json;

#[test]
fn missing_type_is_dropped() {
    assert_eq!(parse_envelope(&json!({"file": "data:image/png;base64,AA=="})), None);
}

#[test]
fn unrecognized_type_is_dropped() {
    assert_eq!(parse_envelope(&json!({"type": "reboot_phone"})), None);
    assert_eq!(parse_envelope(&json!({"type": 42})), None);
}

#[test]
fn non_objects_are_dropped() {
    assert_eq!(parse_envelope(&json!(null)), None);
    assert_eq!(parse_envelope(&json!("request_init")), None);
    assert_eq!(parse_envelope(&json!(["request_init"])), None);
}
