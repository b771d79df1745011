//! Pull-based rule access: fetch-and-convert on demand.

mod core;
mod error;


pub use self::core::FlowRuleProvider;
pub use self::error::{ProviderError, Result};
