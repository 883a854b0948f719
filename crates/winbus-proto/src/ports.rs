//! Core port definitions for winbus adapters.
//!
//! This module exposes the public window-management port contract used by
//! host applications to query and control windows without linking directly
//! against the bus backend.

pub mod window;
