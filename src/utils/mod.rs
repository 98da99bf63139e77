//! Utility functions and helpers.

pub mod exec;
pub mod spinner;
