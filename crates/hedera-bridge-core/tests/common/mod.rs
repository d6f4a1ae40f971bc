#![allow(dead_code)]
//! Shared test utilities for the core integration tests.
//!
//! - `mocks`: in-memory mirror, recording submitter and the client factory wiring them
//! - `fixtures`: mirror documents shaped like real responses

pub mod fixtures;
pub mod mocks;

pub use mocks::{context, operator_config, MockMirror, MockSubmitter, StubFactory};
