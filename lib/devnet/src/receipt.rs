//! Receipts for committed transactions.

use alloy_primitives::Log;
use alloy_sol_types::SolEvent;

/// The logs a single successful transaction committed to the chain.
#[derive(Clone, Debug)]
pub struct Receipt {
    logs: Vec<Log>,
}

impl Receipt {
    pub(crate) fn new(logs: Vec<Log>) -> Self {
        Self { logs }
    }

    /// Returns the logs this transaction emitted, in emission order.
    #[must_use]
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    /// Checks that this transaction emitted the `expected` event.
    #[must_use]
    pub fn emits<E: SolEvent>(&self, expected: E) -> bool {
        let expected = expected.encode_log_data();
        self.logs.iter().any(|log| log.data == expected)
    }
}
