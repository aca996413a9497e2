//! Presentation-state engine for reminder recipient tables.
//!
//! A flat recipient list is split into students and instructors, each with
//! its own toggling sort and checkbox state, and the checked rows are
//! collated into a remind request. The architecture keeps a strict split:
//!
//! - **[`core`]**: Pure, deterministic logic (partitioning, ordering,
//!   selection, collation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting seams (config file, recipient sources, status
//!   reporting). Isolated to enable scripted collaborators in tests.
//!
//! [`table`] owns the rows and their load lifecycle; [`loader`] connects a
//! source to a table.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod loader;
pub mod logging;
pub mod render;
pub mod table;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
