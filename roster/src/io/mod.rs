//! I/O seams for the recipient tables.

pub mod config;
pub mod source;
pub mod status;
