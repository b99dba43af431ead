//! Binder configuration.
//!
//! All types derive Serde traits so the struct can be embedded in a host
//! application's own configuration file.

use serde::{Deserialize, Serialize};

/// Configuration for the binding and dispatch layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Maximum number of body bytes buffered per request.
    ///
    /// The body is buffered once so that every parameter resolution sees
    /// the complete bytes; requests above this bound are rejected with a
    /// client error before any handler runs.
    pub max_body_bytes: usize,

    /// Emit a debug log line for every dispatched request.
    pub log_requests: bool,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 8 * 1024 * 1024,
            log_requests: true,
        }
    }
}
