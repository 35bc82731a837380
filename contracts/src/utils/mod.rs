//! Common contract utilities.
pub mod commitment;
