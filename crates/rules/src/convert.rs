//! Payload-to-rule-set conversion.
//!
//! The remote store hands us an opaque string. `convert` turns it into a
//! typed rule set, treating "no value yet" as an empty set rather than an
//! error, and tagging every failure with enough of the payload to debug
//! it from logs alone.

use thiserror::Error;

use crate::schema::FlowRule;

/// How much of a bad payload to carry in the error for diagnostics.
const ERROR_PREFIX_CHARS: usize = 48;

/// Errors produced while decoding a rule payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload is not valid JSON of the expected shape.
    #[error("malformed rule payload ({len} bytes, starts {prefix:?}): {source}")]
    Malformed {
        len: usize,
        prefix: String,
        #[source]
        source: serde_json::Error,
    },
    /// Payload parsed but a record violates an invariant.
    #[error("invalid rule payload ({len} bytes, starts {prefix:?}): {reason}")]
    Invalid {
        len: usize,
        prefix: String,
        reason: String,
    },
}

fn payload_prefix(raw: &str) -> String {
    raw.chars().take(ERROR_PREFIX_CHARS).collect()
}

/// Decode a serialized rule payload into an ordered rule set.
///
/// An empty or whitespace-only payload is the "not configured yet" steady
/// state and decodes to an empty set. Anything else must be a JSON array
/// of rule objects; array order is preserved because downstream
/// evaluation may treat it as precedence.
///
/// Never returns a partially-populated set: any malformed record or
/// invariant violation fails the whole payload.
pub fn convert(raw: &str) -> Result<Vec<FlowRule>, DecodeError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rules: Vec<FlowRule> = serde_json::from_str(raw).map_err(|source| DecodeError::Malformed {
        len: raw.len(),
        prefix: payload_prefix(raw),
        source,
    })?;

    for (idx, rule) in rules.iter().enumerate() {
        if let Err(reason) = rule.validate() {
            return Err(DecodeError::Invalid {
                len: raw.len(),
                prefix: payload_prefix(raw),
                reason: format!("rule {}: {}", idx, reason),
            });
        }
    }

    Ok(rules)
}

/// Encode a rule set back into its wire form.
pub fn encode(rules: &[FlowRule]) -> Result<String, serde_json::Error> {
    serde_json::to_string(rules)
}
