//! Wire encoding.
//!
//! Two encodings exist:
//!
//! - **Top-level calls** are flattened to `key=value` pairs. Arrays become
//!   comma-joined strings, nested maps expand to `key[sub]`, and `Null`
//!   values are dropped.
//! - **Batch sub-requests** are encoded as a single query string
//!   (`method=<name>&...`) that keeps arrays structural
//!   (`key[0]=a&key[1]=b`).

use statkit_core::{ParamValue, Params, PendingCall, ResponseFormat};
use url::form_urlencoded;

use crate::config::ClientConfig;

/// Remote method that executes a list of encoded sub-requests.
pub const BULK_METHOD: &str = "API.getBulkRequest";

/// Module parameter every call carries.
const API_MODULE: &str = "API";

// ============================================================================
// Parameter Merging
// ============================================================================

/// Builds the full parameter set for one call.
///
/// Order: protocol parameters, credential, default site, default language,
/// then caller parameters. Caller values win, except for `module` and
/// `method`, which always name the call being made. A caller `Null` counts
/// as not supplied and is dropped.
pub fn merge_params(config: &ClientConfig, method: &str, caller: &Params) -> Params {
    let mut merged = protocol_params(config, method);
    merged.extend(
        apply_defaults(config, caller)
            .into_iter()
            .filter(|(key, _)| key != "module" && key != "method"),
    );
    merged
}

/// Parameters every outgoing request carries: module, method, format and
/// the credential.
pub fn protocol_params(config: &ClientConfig, method: &str) -> Params {
    Params::new()
        .with("module", API_MODULE)
        .with("method", method)
        .with("format", config.format.as_str())
        .with_opt("token_auth", config.token_auth.as_deref())
}

/// Fills in the configured default site and language where the caller left
/// them unset, and drops caller `Null`s.
///
/// Applied to top-level calls and to every batch sub-request, so a call
/// behaves the same whether it is dispatched directly or queued.
pub fn apply_defaults(config: &ClientConfig, caller: &Params) -> Params {
    let mut params = Params::new();

    if let Some(site) = config.default_site.filter(|_| !caller.is_set("idSite")) {
        params.insert("idSite", site);
    }
    if let Some(language) = config.language.as_deref().filter(|_| !caller.is_set("language")) {
        params.insert("language", language);
    }

    for (key, value) in caller.iter().filter(|(_, v)| !v.is_null()) {
        params.insert(key, value.clone());
    }

    params
}

/// The format a merged parameter set asks for, falling back to `default`
/// when the caller's override is not a known format.
pub fn effective_format(merged: &Params, default: ResponseFormat) -> ResponseFormat {
    merged
        .get("format")
        .and_then(ParamValue::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

// ============================================================================
// Top-level Flattening
// ============================================================================

/// Flattens a parameter set into wire pairs for a single call.
pub fn flatten(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params.iter() {
        flatten_value(key.to_string(), value, &mut pairs);
    }
    pairs
}

fn flatten_value(key: String, value: &ParamValue, out: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Null => {}
        ParamValue::List(items) => out.push((key, join_list(items))),
        ParamValue::Map(inner) => {
            for (sub, v) in inner.iter() {
                flatten_value(format!("{key}[{sub}]"), v, out);
            }
        }
        scalar => {
            if let Some(rendered) = scalar.render_scalar() {
                out.push((key, rendered));
            }
        }
    }
}

/// Comma-joins list items. Nested lists are joined in place; maps are
/// embedded as JSON since a delimited string cannot carry them.
fn join_list(items: &[ParamValue]) -> String {
    items
        .iter()
        .filter_map(|item| match item {
            ParamValue::Null => None,
            ParamValue::List(inner) => Some(join_list(inner)),
            ParamValue::Map(map) => serde_json::to_string(map).ok(),
            scalar => scalar.render_scalar(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Batch Sub-requests
// ============================================================================

/// Encodes a queued call as the query string of one bulk sub-request.
///
/// A `method` key inside the parameters is ignored; the call's own method
/// name always comes first.
pub fn encode_sub_request(call: &PendingCall) -> String {
    let mut pairs = vec![("method".to_string(), call.method().to_string())];
    for (key, value) in call.params().iter().filter(|(k, _)| *k != "method") {
        structural_pairs(key.to_string(), value, &mut pairs);
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn structural_pairs(key: String, value: &ParamValue, out: &mut Vec<(String, String)>) {
    match value {
        ParamValue::Null => {}
        ParamValue::List(items) => {
            for (index, item) in items.iter().enumerate() {
                structural_pairs(format!("{key}[{index}]"), item, out);
            }
        }
        ParamValue::Map(inner) => {
            for (sub, v) in inner.iter() {
                structural_pairs(format!("{key}[{sub}]"), v, out);
            }
        }
        scalar => {
            if let Some(rendered) = scalar.render_scalar() {
                out.push((key, rendered));
            }
        }
    }
}

/// Builds the outer parameter bag of a bulk request.
///
/// Each call gets the configured defaults before encoding. The bulk
/// response is always requested as JSON so it can be split back into one
/// value per call.
pub fn bulk_params(config: &ClientConfig, calls: &[PendingCall]) -> Params {
    let mut params = protocol_params(config, BULK_METHOD);
    params.insert("format", ResponseFormat::Json.as_str());

    for (index, call) in calls.iter().enumerate() {
        let prepared = PendingCall::new(call.method(), apply_defaults(config, call.params()));
        params.insert(format!("urls[{index}]"), encode_sub_request(&prepared));
    }
    params
}

// ============================================================================
// Tests
// ============================================================================
