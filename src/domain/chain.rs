//! Chain - ordered intents from one compound input, with pause/resume state.
//!
//! A chain is created once by the splitter+cascade, mutated only by the chain
//! runner, and carries a monotonically non-decreasing `next_index`. When a
//! step needs disambiguation the runner snapshots the whole chain into a
//! [`PausedChain`]; the snapshot is serializable so the surrounding session
//! layer can park it across stateless request/response boundaries.

use serde::{Deserialize, Serialize};

use super::intent::{ArgValue, Intent};
use super::outcome::ConfirmationRequest;

/// Ordered sequence of intents executed sequentially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    intents: Vec<Intent>,
    next_index: usize,
}

impl Chain {
    /// Creates a chain positioned at its first intent.
    pub fn new(intents: Vec<Intent>) -> Self {
        Self {
            intents,
            next_index: 0,
        }
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Index of the next intent to execute.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// The intent at `next_index`, if any remain.
    pub fn current(&self) -> Option<&Intent> {
        self.intents.get(self.next_index)
    }

    /// Advances past the current intent. `next_index` never decreases.
    pub fn advance(&mut self) {
        if self.next_index < self.intents.len() {
            self.next_index += 1;
        }
    }

    /// True once every intent has been executed.
    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.intents.len()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Sets an argument on the current intent. Used by the runner to inject a
    /// confirmed resolution before re-executing the paused step. No-op for
    /// non-tool intents.
    pub fn resolve_current_arg(&mut self, name: &str, value: ArgValue) {
        if let Some(Intent::Tool { args, .. }) = self.intents.get_mut(self.next_index) {
            args.set(name, value);
        }
    }
}

/// Serializable snapshot of a chain halted on disambiguation.
///
/// Created exactly once at first pause, consumed exactly once by `resume` or
/// `abandon`. The snapshot owns everything needed to continue: the chain with
/// its position, and the confirmation request that caused the halt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PausedChain {
    chain: Chain,
    request: ConfirmationRequest,
}

impl PausedChain {
    pub fn new(chain: Chain, request: ConfirmationRequest) -> Self {
        Self { chain, request }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Index the chain paused at.
    pub fn paused_index(&self) -> usize {
        self.chain.next_index
    }

    pub fn request(&self) -> &ConfirmationRequest {
        &self.request
    }

    /// Consumes the snapshot, yielding the chain and the pending request.
    pub fn into_parts(self) -> (Chain, ConfirmationRequest) {
        (self.chain, self.request)
    }
}
