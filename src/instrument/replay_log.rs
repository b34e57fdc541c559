//! Replay Log
//!
//! Reconstructs the recorded call sequence of a tracked operation.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::instrument::HistoryKeys;
use crate::store::KeyValueStore;

// == Replay ==
/// Recorded history of one tracked operation.
///
/// Renders as a header line followed by one `op(*input) -> output` line per
/// recorded call:
///
/// ```text
/// StoredCache::store was called 2 times:
/// StoredCache::store(*(1,)) -> 6f1c...
/// StoredCache::store(*(2,)) -> 0b9e...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    operation: String,
    calls: u64,
    entries: Vec<ReplayEntry>,
}

/// One recorded call: serialized arguments and serialized result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayEntry {
    pub input: String,
    pub output: String,
}

impl Replay {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Value of the call counter, which may exceed `entries().len()` when a
    /// call failed or was interrupted before its output was recorded.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn entries(&self) -> &[ReplayEntry] {
        &self.entries
    }

    /// Writes the replay to stdout.
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.operation, self.calls)?;
        for entry in &self.entries {
            write!(
                f,
                "\n{}(*{}) -> {}",
                self.operation, entry.input, entry.output
            )?;
        }
        Ok(())
    }
}

// == Replay Reader ==
/// Reads the counter and history lists recorded for `operation`.
///
/// A missing counter reads as zero. Inputs and outputs are paired by index
/// up to the shorter list. A counter that is not an integer is a decode
/// failure rather than a silent zero.
pub async fn replay(store: &dyn KeyValueStore, operation: &str) -> Result<Replay> {
    let keys = HistoryKeys::new(operation);

    let calls = match store.get(&keys.calls).await? {
        Some(raw) => String::from_utf8(raw)?.trim().parse::<u64>()?,
        None => 0,
    };

    let inputs = store.lrange(&keys.inputs, 0, -1).await?;
    let outputs = store.lrange(&keys.outputs, 0, -1).await?;

    let entries = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| -> Result<ReplayEntry> {
            Ok(ReplayEntry {
                input: String::from_utf8(input)?,
                output: String::from_utf8(output)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Replay {
        operation: operation.to_string(),
        calls,
        entries,
    })
}
