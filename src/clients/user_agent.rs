//! User agent strings sent with every request.

use serde_json::{Map, Value};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the `User-Agent` header value.
#[must_use]
pub fn user_agent() -> String {
    format!("Workamajig/v1 RustBindings/{SDK_VERSION}")
}

/// The fields reported in the `X-Workamajig-Client-User-Agent` header.
///
/// `lang_min_version` is the minimum supported Rust version declared by the
/// crate, not the version of the compiler that built it.
#[must_use]
pub fn default_seed() -> Vec<(&'static str, Option<String>)> {
    vec![
        ("bindings_version", Some(SDK_VERSION.to_string())),
        ("lang", Some("rust".to_string())),
        ("lang_min_version", Some(env!("CARGO_PKG_RUST_VERSION").to_string())),
        ("platform", Some(std::env::consts::OS.to_string())),
        ("publisher", Some("workamajig".to_string())),
        ("uname", None),
    ]
}

/// Serializes a seed to the JSON carried by `X-Workamajig-Client-User-Agent`.
///
/// Every present value is percent-encoded so unusual characters survive
/// being placed in a header; absent values become `null`.
///
/// # Example
///
/// ```rust
/// use workamajig_api::clients::client_user_agent_seeded;
///
/// let json = client_user_agent_seeded(&[("lang", Some("ï".to_string()))]);
/// assert_eq!(json, r#"{"lang":"%C3%AF"}"#);
/// ```
#[must_use]
pub fn client_user_agent_seeded(seed: &[(&str, Option<String>)]) -> String {
    let fields: Map<String, Value> = seed
        .iter()
        .map(|(key, value)| {
            let value = value
                .as_deref()
                .map_or(Value::Null, |v| Value::String(urlencoding::encode(v).into_owned()));
            ((*key).to_string(), value)
        })
        .collect();

    Value::Object(fields).to_string()
}
