//! Deterministic, pure logic for the recipient tables.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! rows and return deterministic outputs suitable for tests.

pub mod collate;
pub mod partition;
pub mod selection;
pub mod sort;
pub mod text_order;
pub mod types;
