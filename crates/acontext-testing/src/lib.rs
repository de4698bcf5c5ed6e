//! Testing infrastructure for acontext integration tests.
//!
//! - `transports`: in-process `Transport` doubles (recording, failing, stalling, blocking, panicking)
//! - `collector`: a throwaway HTTP collector on localhost
//! - `fixtures`: command definitions and argv helpers
//! - `world`: isolated environment for running the `acontext` binary

pub mod collector;
pub mod fixtures;
pub mod transports;
pub mod world;

pub use collector::LocalCollector;
pub use transports::{
    BlockingTransport, FailingTransport, PanickingTransport, RecordingTransport, StallingTransport,
};
pub use world::TestWorld;
