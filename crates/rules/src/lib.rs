//! Dynamic flow-rule synchronization against a remote config store.
//!
//! This crate provides:
//! - JSON flow-rule schema with serde deserialization
//! - `convert`: payload-to-rule-set decoding with diagnostics
//! - `FlowRuleProvider`: on-demand fetch-and-convert for one application
//! - `PropertyBridge`: standing watch that keeps a local registry in sync
//! - `LocalRuleRegistry`: atomically swapped current rule set

pub mod bridge;
pub mod convert;
pub mod keys;
pub mod provider;
pub mod registry;
pub mod remote;
pub mod schema;
