//! Structured logging for Hairscope.
//!
//! Console output, optional rolling NDJSON files, and secret scrubbing for
//! strings that leave the process.

pub mod logger;
pub mod redact;

pub use logger::{init_logger, LogSettings};
pub use redact::redact_sensitive_data;
