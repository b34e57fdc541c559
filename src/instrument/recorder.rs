//! Instrumented Recorder
//!
//! Wraps a tracked operation so every call bumps its counter and appends its
//! input and output to the operation's history lists.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::instrument::{replay, CallArgs, Replay};
use crate::store::SharedStore;

// == Tracked Operation ==
/// Base operation whose invocations are counted and recorded.
///
/// `name()` is the tracking identity. It must be stable across calls and
/// unique among all operations sharing a store; the convention is
/// `Type::method`.
#[async_trait]
pub trait TrackedOperation: Send + Sync {
    type Input: CallArgs + Send + 'static;
    type Output: fmt::Display + Send + 'static;

    fn name(&self) -> &str;

    async fn invoke(&self, input: Self::Input) -> Result<Self::Output>;
}

// == History Keys ==
/// Store keys holding an operation's counter and history lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryKeys {
    pub calls: String,
    pub inputs: String,
    pub outputs: String,
}

impl HistoryKeys {
    pub fn new(identity: &str) -> Self {
        Self {
            calls: identity.to_string(),
            inputs: format!("{}:inputs", identity),
            outputs: format!("{}:outputs", identity),
        }
    }
}

// == Instrumented ==
/// A tracked operation bound to the store its records are written to.
pub struct Instrumented<O> {
    store: SharedStore,
    operation: O,
    keys: HistoryKeys,
}

impl<O: TrackedOperation> Instrumented<O> {
    pub fn new(store: SharedStore, operation: O) -> Self {
        let keys = HistoryKeys::new(operation.name());
        Self {
            store,
            operation,
            keys,
        }
    }

    pub fn name(&self) -> &str {
        self.operation.name()
    }

    pub fn keys(&self) -> &HistoryKeys {
        &self.keys
    }

    pub fn operation(&self) -> &O {
        &self.operation
    }

    // == Call ==
    /// Invokes the wrapped operation and records it.
    ///
    /// Order: counter increment, input append, invocation, output append.
    /// The writes are not atomic as a unit; a failed invocation leaves its
    /// input recorded with no matching output, and the error is returned.
    pub async fn call(&self, input: O::Input) -> Result<O::Output> {
        let call_number = self.store.incr(&self.keys.calls).await?;
        self.store
            .rpush(&self.keys.inputs, input.render().into_bytes())
            .await?;

        debug!(operation = self.name(), call = call_number, "Recording call");

        let output = self.operation.invoke(input).await?;
        self.store
            .rpush(&self.keys.outputs, output.to_string().into_bytes())
            .await?;

        Ok(output)
    }

    /// Reads this operation's recorded history back out of the store.
    pub async fn replay(&self) -> Result<Replay> {
        replay(self.store.as_ref(), self.name()).await
    }
}

impl<O: TrackedOperation> fmt::Debug for Instrumented<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrumented")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
