//! Flow-rule schema types with serde deserialization.
//!
//! The wire payload is a JSON array of rule objects with camelCase
//! field names and integer-coded enums, matching what admission-control
//! clients already publish into the config store.

mod flow;

pub use flow::*;
