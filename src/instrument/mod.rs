//! Instrumentation Module
//!
//! Call counting, input/output history and replay for tracked operations.
//!
//! # Key Layout
//! - `<identity>` - call counter (integer)
//! - `<identity>:inputs` - list of rendered argument tuples
//! - `<identity>:outputs` - list of rendered results

mod args;
mod recorder;
mod replay_log;


pub use args::{format_args_tuple, CallArgs, Repr};
pub use recorder::{HistoryKeys, Instrumented, TrackedOperation};
pub use replay_log::{replay, Replay, ReplayEntry};
