//! Logging utilities.
//!
//! This module centralizes logger initialization. Library code only talks to
//! the `log` facade; the binary picks the backend through `init_logging`.

mod init;

pub use init::{init_logging, LoggingConfig};
