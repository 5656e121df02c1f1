//! Testing infrastructure for tplmarket integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: isolated data-dir environment with a CLI runner
//! - `fixtures`: catalog and template generation
//! - `stores`: in-memory and failure-injecting store fakes

pub mod fixtures;
pub mod stores;
pub mod world;

pub use stores::{MemoryStore, StubStorage};
pub use world::TestWorld;
