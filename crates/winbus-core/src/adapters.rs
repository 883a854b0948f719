//! Bus-backed implementations of the window-management ports.

pub mod dbus;
pub mod icon;
pub mod window_info;
pub mod window_system;
