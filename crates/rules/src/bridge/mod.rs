//! Push-based rule synchronization: standing watch into the registry.

mod core;


pub use self::core::{BridgeError, PropertyBridge};
