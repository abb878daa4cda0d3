//! Frame sinks.
//!
//! Sinks consume rendered frames in sequence order.

/// Generic frame sink trait and built-in sinks.
pub mod sink;
