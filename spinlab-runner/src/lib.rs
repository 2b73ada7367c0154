//! SpinLab Runner — deterministic session replay and batch backtests.
//!
//! This crate builds on `spinlab-core` to provide:
//! - Session replay over a caller-supplied spin sequence
//! - Affordability enforcement from the outside (`Overdrawn` faults)
//! - Observer hooks (null, recording, tracing)
//! - Parallel batches seeded through the RNG hierarchy
//! - TOML session configuration

pub mod batch;
pub mod config;
pub mod observer;
pub mod session;

pub use batch::{run_batch, run_batch_sequential, BatchResult, BatchRun, FailedInstance};
pub use config::{SessionConfig, SessionConfigError};
pub use observer::{NullObserver, RecordingObserver, SessionObserver, SpinEvent, SpinLog, TracingObserver};
pub use session::{RunnerError, Session, SessionReport};
