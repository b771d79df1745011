pub mod config;

pub use config::RemoteConfig;
