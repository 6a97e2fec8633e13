//! JSON-RPC 2.0 protocol handling for the Model Context Protocol endpoint
//!
//! Provides the wire types, the error taxonomy and the request dispatcher.

pub mod dispatcher;
pub mod rpc;
