//! Flow-rule record and its enumerations.

use serde::{Deserialize, Serialize};

/// One admission-control rule for a named resource.
///
/// Field names and enum codes follow the JSON shape stored in the remote
/// config store, so a payload round-trips byte-for-byte semantically:
/// decode then encode then decode yields an equal rule set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowRule {
    /// Resource identifier the rule applies to. Must be non-empty.
    pub resource: String,
    /// Origin application the limit applies to.
    #[serde(default = "default_limit_app")]
    pub limit_app: String,
    /// What the threshold counts: concurrent threads or QPS.
    #[serde(default)]
    pub grade: ThresholdGrade,
    /// Threshold value. Must be finite and non-negative.
    pub count: f64,
    /// How the rule relates to other resources.
    #[serde(default)]
    pub strategy: RelationStrategy,
    /// What happens when the threshold is exceeded.
    #[serde(default)]
    pub control_behavior: ControlBehavior,
    /// Warm-up period in seconds (only meaningful for `WarmUp` behavior).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warm_up_period_sec: Option<u32>,
    /// Max queueing time in ms (only meaningful for `RateLimiter` behavior).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_queueing_time_ms: Option<u32>,
    /// Whether the rule is enforced cluster-wide.
    #[serde(default)]
    pub cluster_mode: bool,
    /// Referenced resource for `Relate`/`Chain` strategies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_resource: Option<String>,
}

fn default_limit_app() -> String {
    "default".to_string()
}

impl FlowRule {
    /// Check record-level invariants the wire format cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.resource.is_empty() {
            return Err("resource must not be empty".to_string());
        }
        if !self.count.is_finite() || self.count < 0.0 {
            return Err(format!("count must be non-negative, got {}", self.count));
        }
        Ok(())
    }
}

// ── Enumerations (integer-coded on the wire) ─────────────────────────

/// Threshold type: code 0 = concurrent threads, 1 = QPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ThresholdGrade {
    Thread,
    #[default]
    Qps,
}

impl TryFrom<u8> for ThresholdGrade {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Thread),
            1 => Ok(Self::Qps),
            other => Err(format!("unknown threshold grade code {}", other)),
        }
    }
}

impl From<ThresholdGrade> for u8 {
    fn from(grade: ThresholdGrade) -> u8 {
        match grade {
            ThresholdGrade::Thread => 0,
            ThresholdGrade::Qps => 1,
        }
    }
}

/// Relation strategy: code 0 = direct, 1 = related resource, 2 = chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RelationStrategy {
    #[default]
    Direct,
    Relate,
    Chain,
}

impl TryFrom<u8> for RelationStrategy {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Direct),
            1 => Ok(Self::Relate),
            2 => Ok(Self::Chain),
            other => Err(format!("unknown relation strategy code {}", other)),
        }
    }
}

impl From<RelationStrategy> for u8 {
    fn from(strategy: RelationStrategy) -> u8 {
        match strategy {
            RelationStrategy::Direct => 0,
            RelationStrategy::Relate => 1,
            RelationStrategy::Chain => 2,
        }
    }
}

/// Overflow behavior: code 0 = reject, 1 = warm up, 2 = rate limiter queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ControlBehavior {
    #[default]
    Default,
    WarmUp,
    RateLimiter,
}

impl TryFrom<u8> for ControlBehavior {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Default),
            1 => Ok(Self::WarmUp),
            2 => Ok(Self::RateLimiter),
            other => Err(format!("unknown control behavior code {}", other)),
        }
    }
}

impl From<ControlBehavior> for u8 {
    fn from(behavior: ControlBehavior) -> u8 {
        match behavior {
            ControlBehavior::Default => 0,
            ControlBehavior::WarmUp => 1,
            ControlBehavior::RateLimiter => 2,
        }
    }
}
