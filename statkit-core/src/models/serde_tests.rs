//! Serde tests for core types.
//!
//! These cover the JSON shapes used by batch files and configuration:
//! parameter bags keep their key order and pending calls default their
//! parameters when omitted.

use crate::{ParamValue, Params, Period, PendingCall, ResponseFormat};

// ============================================================================
// Params Serde Tests
// ============================================================================

#[test]
fn test_params_deserialize_preserves_order() {
    let json = r#"{"zeta": 1, "alpha": "a", "mid": [1, 2]}"#;
    let params: Params = serde_json::from_str(json).unwrap();

    let keys: Vec<_> = params.keys().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_params_serialize_as_object() {
    let params = Params::new()
        .with("idSite", 1)
        .with("flat", true)
        .with("segment", None::<String>);

    let json = serde_json::to_string(&params).unwrap();
    assert_eq!(json, r#"{"idSite":1,"flat":true,"segment":null}"#);
}

#[test]
fn test_param_value_untagged_variants() {
    let params: Params =
        serde_json::from_str(r#"{"a": null, "b": false, "c": 3, "d": 1.25, "e": "x", "f": {"g": 1}}"#)
            .unwrap();

    assert_eq!(params.get("a"), Some(&ParamValue::Null));
    assert_eq!(params.get("b"), Some(&ParamValue::Bool(false)));
    assert_eq!(params.get("c"), Some(&ParamValue::Int(3)));
    assert_eq!(params.get("d"), Some(&ParamValue::Float(1.25)));
    assert_eq!(params.get("e"), Some(&ParamValue::Str("x".into())));
    assert_eq!(
        params.get("f"),
        Some(&ParamValue::Map(Params::new().with("g", 1)))
    );
}

#[test]
fn test_params_reject_non_object() {
    let result: Result<Params, _> = serde_json::from_str("[1, 2]");
    assert!(result.is_err());
}

// ============================================================================
// PendingCall Serde Tests
// ============================================================================

#[test]
fn test_pending_call_params_default_to_empty() {
    let call: PendingCall = serde_json::from_str(r#"{"method": "API.getMatomoVersion"}"#).unwrap();

    assert_eq!(call.method(), "API.getMatomoVersion");
    assert!(call.params().is_empty());
}

#[test]
fn test_pending_call_serialize_shape() {
    let call = PendingCall::bare("Goals.getGoals");
    let json = serde_json::to_value(&call).unwrap();

    assert_eq!(json, serde_json::json!({"method": "Goals.getGoals", "params": {}}));
}

// ============================================================================
// Enum Serde Tests
// ============================================================================

#[test]
fn test_format_and_period_lowercase() {
    assert_eq!(serde_json::to_string(&ResponseFormat::Original).unwrap(), r#""original""#);
    assert_eq!(serde_json::to_string(&Period::Range).unwrap(), r#""range""#);

    let format: ResponseFormat = serde_json::from_str(r#""csv""#).unwrap();
    assert_eq!(format, ResponseFormat::Csv);
}
