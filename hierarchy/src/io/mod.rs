//! I/O helpers for hierarchy commands.

pub mod config;
pub mod records;
