//! Execution environment interface for contract code.
//!
//! Every piece of ambient state a contract function needs (message sender,
//! attached value, account balances) and every side effect it produces
//! (native transfers, token movements, event logs) goes through the
//! [`Host`] trait. The devnet provides the production implementation; unit
//! tests substitute a mock.

use alloy_primitives::{Address, Log, U256};
use alloy_sol_types::SolEvent;

/// A low-level call made through the host failed.
///
/// Carries the ABI-encoded revert payload of the callee. The payload is
/// empty when the failure had no callee to speak of, eg. a plain balance
/// underflow in the ledger itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFailed {
    /// ABI-encoded revert payload returned by the callee.
    pub revert_data: Vec<u8>,
}

impl CallFailed {
    /// Wraps the callee's raw revert payload.
    #[must_use]
    pub fn new(revert_data: Vec<u8>) -> Self {
        Self { revert_data }
    }
}

/// Ambient ledger state and side effects available to a contract while it
/// executes a single message call.
pub trait Host {
    /// Returns the address that sent the message being processed.
    fn msg_sender(&self) -> Address;

    /// Returns the native value attached to the message being processed.
    ///
    /// The value has already been credited to the executing contract's
    /// balance when execution starts, matching EVM semantics.
    fn msg_value(&self) -> U256;

    /// Returns the address of the executing contract.
    fn contract_address(&self) -> Address;

    /// Returns the native balance of `account`.
    fn balance(&self, account: Address) -> U256;

    /// Moves `amount` of native currency from the executing contract to
    /// `to`.
    ///
    /// # Errors
    ///
    /// * [`CallFailed`] - If the executing contract's balance cannot cover
    ///   `amount`, or the ledger rejects the transfer.
    fn transfer_eth(&mut self, to: Address, amount: U256)
        -> Result<(), CallFailed>;

    /// Calls `transfer(to, amount)` on the token contract deployed at
    /// `token`, with the executing contract as the message sender.
    ///
    /// # Errors
    ///
    /// * [`CallFailed`] - If no token is deployed at `token`, or the token
    ///   reverts. The token's revert payload is carried through untouched.
    fn erc20_transfer(
        &mut self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), CallFailed>;

    /// Appends a raw log record to the ledger.
    fn raw_log(&mut self, log: Log);
}

/// Emits `event` from the executing contract.
pub fn log(host: &mut impl Host, event: impl SolEvent) {
    let log = Log {
        address: host.contract_address(),
        data: event.encode_log_data(),
    };
    host.raw_log(log);
}
