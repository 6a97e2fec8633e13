//! Tool table, parameter validation and the discovery manifest
//!
//! Provides the domain half of the server: which methods exist, what they
//! accept, and how a validated call reaches the capability registry.

pub mod manifest;
pub mod tools;
pub mod utils;
