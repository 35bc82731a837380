//! Unit-testing utilities for the contracts in this crate.
use std::collections::HashMap;

use alloy_primitives::{address, Address, Log, U256};
use alloy_sol_types::SolEvent;

use crate::host::{CallFailed, Host};

pub(crate) const ALICE: Address =
    address!("00000000000000000000000000000000000a11ce");
pub(crate) const BOB: Address =
    address!("0000000000000000000000000000000000000b0b");
pub(crate) const GAME_ADDRESS: Address =
    address!("00000000000000000000000000000000deadbeef");
pub(crate) const TOKEN_ADDRESS: Address =
    address!("00000000000000000000000000000000cafebabe");

/// In-memory [`Host`] for exercising contract logic in isolation.
///
/// Tracks balances and emitted logs, records outgoing token calls instead
/// of dispatching them, and can be programmed to fail transfers so tests
/// can drive the fail-closed paths.
pub(crate) struct MockHost {
    sender: Address,
    value: U256,
    address: Address,
    balances: HashMap<Address, U256>,
    logs: Vec<Log>,
    erc20_transfers: Vec<(Address, Address, U256)>,
    fail_eth_transfers: bool,
    fail_erc20_transfers: bool,
}

impl MockHost {
    /// Creates a host executing on behalf of [`GAME_ADDRESS`], with
    /// messages sent by `sender` and no attached value.
    pub(crate) fn new(sender: Address) -> Self {
        Self {
            sender,
            value: U256::ZERO,
            address: GAME_ADDRESS,
            balances: HashMap::new(),
            logs: Vec::new(),
            erc20_transfers: Vec::new(),
            fail_eth_transfers: false,
            fail_erc20_transfers: false,
        }
    }

    /// Changes the sender of subsequent messages.
    pub(crate) fn set_sender(&mut self, sender: Address) {
        self.sender = sender;
    }

    /// Attaches `value` to subsequent messages and credits it to the
    /// executing contract, the way a ledger does before dispatching.
    pub(crate) fn set_msg_value(&mut self, value: U256) {
        self.value = value;
        let balance = self.balance(self.address);
        self.balances.insert(self.address, balance + value);
    }

    /// Overwrites the balance of `account`.
    pub(crate) fn set_balance(&mut self, account: Address, amount: U256) {
        self.balances.insert(account, amount);
    }

    /// Makes every subsequent native transfer fail.
    pub(crate) fn fail_eth_transfers(&mut self) {
        self.fail_eth_transfers = true;
    }

    /// Makes every subsequent token call fail.
    pub(crate) fn fail_erc20_transfers(&mut self) {
        self.fail_erc20_transfers = true;
    }

    /// Returns the outgoing token calls recorded so far, as
    /// `(token, to, amount)` triples.
    pub(crate) fn erc20_transfers(&self) -> &[(Address, Address, U256)] {
        &self.erc20_transfers
    }

    /// Asserts that `event` was emitted at some point.
    pub(crate) fn assert_emitted<E: SolEvent>(&self, event: &E) {
        let expected = event.encode_log_data();
        assert!(
            self.logs.iter().any(|log| log.data == expected),
            "event {expected:?} was not emitted, logs: {:?}",
            self.logs,
        );
    }
}

impl Host for MockHost {
    fn msg_sender(&self) -> Address {
        self.sender
    }

    fn msg_value(&self) -> U256 {
        self.value
    }

    fn contract_address(&self) -> Address {
        self.address
    }

    fn balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn transfer_eth(
        &mut self,
        to: Address,
        amount: U256,
    ) -> Result<(), CallFailed> {
        if self.fail_eth_transfers {
            return Err(CallFailed::new(Vec::new()));
        }
        let from_balance = self.balance(self.address);
        if from_balance < amount {
            return Err(CallFailed::new(Vec::new()));
        }
        self.balances.insert(self.address, from_balance - amount);
        let to_balance = self.balance(to);
        self.balances.insert(to, to_balance + amount);
        Ok(())
    }

    fn erc20_transfer(
        &mut self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), CallFailed> {
        if self.fail_erc20_transfers {
            return Err(CallFailed::new(Vec::new()));
        }
        self.erc20_transfers.push((token, to, amount));
        Ok(())
    }

    fn raw_log(&mut self, log: Log) {
        self.logs.push(log);
    }
}
