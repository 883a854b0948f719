//! D-Bus backend for the winbus window-management contract.
//!
//! Every port operation maps to exactly one method call on the remote
//! window service; the event bridge turns the service's signals into local
//! observer notifications. All state lives on the remote side.

pub mod adapters;
pub mod callbacks;
pub mod event_bridge;
pub mod platform;

#[cfg(test)]
pub(crate) mod test_support;
