//! Wayfind Kernel: canonical bytes and content hashes.
//!
//! The kernel knows nothing about search. It provides the two primitives every
//! auditable artifact in the workspace is built on:
//!
//! - [`canon::canonical_json_bytes`] -- deterministic JSON rendering
//! - [`hash::canonical_hash`] -- domain-separated SHA-256 content hashes

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod hash;
