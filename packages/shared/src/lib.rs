//! Utilities shared by the Tegami binaries.

pub mod logger;
