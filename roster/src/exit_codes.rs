//! Stable exit codes for roster CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid arguments, config, or other errors.
pub const INVALID: i32 = 1;
/// The recipient source could not be read.
pub const FETCH_FAILED: i32 = 2;
/// `roster remind` ended with nobody selected.
pub const NOTHING_SELECTED: i32 = 3;
