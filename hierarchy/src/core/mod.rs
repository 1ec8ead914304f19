//! Deterministic, pure hierarchy logic.
//!
//! Core modules must be free of I/O side effects. They borrow the caller's
//! collection and return freshly allocated records, never mutating the input.

pub mod build;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod index;
pub mod lineage;
pub mod options;
pub mod path;
pub mod record;
