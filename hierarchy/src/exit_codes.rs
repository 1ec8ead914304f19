//! Stable exit codes for `hierarchy` CLI commands.

/// Command succeeded and produced a non-empty result.
pub const OK: i32 = 0;
/// Invalid input document, configuration, or other I/O errors.
pub const INVALID: i32 = 1;
/// A query command ran but found nothing (unknown id, leaf, or top-level record).
pub const EMPTY: i32 = 2;
/// A traversal hit a parent cycle while the cycle guard was enabled.
pub const CYCLE: i32 = 3;
