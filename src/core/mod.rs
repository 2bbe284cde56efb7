//! Core bridge components
//!
//! Configuration, library loading and the typed call surface over `quilt_rs`.

pub mod operation;
pub mod config;
pub mod error;
pub mod bridge;
pub mod globals;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use operation::Operation;
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use bridge::NativeBridge;
pub use globals::{LoadOnce, shared_bridge};
