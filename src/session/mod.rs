//! Session control: simulate, train at checkpoints, adapt, continue
//!
//! A session is single-threaded and synchronous. Each checkpoint runs to
//! completion before the next tick, so the first draw after a checkpoint
//! already sees the rewritten weights. Batches run many sessions in
//! parallel, each with its own weights, timeline and RNG.

pub mod batch;
pub mod controller;
pub mod report;

pub use batch::{run_batch, BatchSummary};
pub use controller::{SessionController, SessionPhase};
pub use report::{CheckpointOutcome, CheckpointReport, SessionReport};
