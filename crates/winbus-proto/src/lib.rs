//! Host-facing contract for the winbus window-management backend.
//!
//! Everything a host application needs to talk about windows lives here:
//! the data model, the notification model, and the port traits implemented
//! by the bus-backed adapters in `winbus-core`. This crate performs no I/O.

pub mod ports;
