//! Wayfind Harness: concrete worlds and a runner for the search engine.
//!
//! Worlds provide domain data only (a start state and the
//! [`SearchState`](wayfind_search::contract::SearchState) capability). The
//! runner owns orchestration: it drives the search, records a transcript
//! and packages the result as a [`runner::RunReportV1`].
//!
//! The harness does NOT implement search logic. It delegates to
//! `wayfind_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod runner;
pub mod worlds;
