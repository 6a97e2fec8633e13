//! HTTP transport layer for the Model Context Protocol
//!
//! Provides the external API routing: the JSON-RPC listener under the base
//! path and the read-only endpoints next to it.

pub mod handlers;
