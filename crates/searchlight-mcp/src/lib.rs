//! `searchlight` crate (library surface).
//!
//! The primary entrypoint is the `searchlight` binary (MCP stdio server). The library
//! exposes the same pieces for embedding: the tool catalogue, the argument normalizer and
//! the dispatcher, plus the backend-agnostic types from `searchlight-core`.

pub use searchlight_core as core;

pub mod args;
pub mod descriptor;
pub mod dispatch;
pub mod mcp;
