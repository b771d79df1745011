//! Config-key derivation for rule payloads.

/// Suffix appended to an application name to form its flow-rule key.
pub const FLOW_RULE_SUFFIX: &str = "-flow-rules";

/// Derive the config key holding an application's flow rules.
///
/// Pure and deterministic: same app name, same key, no I/O.
pub fn flow_rule_key(app_name: &str) -> String {
    format!("{}{}", app_name, FLOW_RULE_SUFFIX)
}
