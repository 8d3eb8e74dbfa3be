//! Lifecycle events
//!
//! Events are explicit and typed so every log line about process lifecycle
//! uses the same name.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded (file or defaults)
    ConfigLoaded,
    /// Connection pool created; connections open on first use
    PoolConfigured,
    /// Database answered a ping
    PoolReachable,
    /// Listener bound, serving requests
    ServerStart,
    /// Shutdown signal received
    ShutdownStart,
    /// Server drained and pool closed
    ShutdownComplete,
    /// Boot aborted
    BootFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::PoolConfigured => "POOL_CONFIGURED",
            Event::PoolReachable => "POOL_REACHABLE",
            Event::ServerStart => "SERVER_START",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "BOOT_FAILED",
        }
    }

    /// Whether the event ends the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
