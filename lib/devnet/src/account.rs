//! Funded accounts on a devnet.

use alloy_primitives::{uint, Address, U256};

use crate::{chain::Devnet, deploy::Deployer, error::CallError};

/// Native funding a fresh account starts with: 100 ether.
pub const DEFAULT_FUNDING: U256 = uint!(100_000_000_000_000_000_000_U256);

/// Type that corresponds to a test account.
///
/// Create one with [`Devnet::create_account`]. Cloning an account yields
/// another handle to the same address on the same chain.
#[derive(Clone, Debug)]
pub struct Account {
    devnet: Devnet,
    address: Address,
}

impl Account {
    pub(crate) fn new(devnet: Devnet, address: Address) -> Self {
        Self { devnet, address }
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get native token balance.
    pub async fn balance(&self) -> U256 {
        self.devnet.balance(self.address).await
    }

    /// Send native token to an address.
    ///
    /// Plain transfers run no contract code, so contracts accept them like
    /// any other recipient.
    ///
    /// # Errors
    ///
    /// * [`CallError::InsufficientFunds`] - If this account cannot cover
    ///   `value`.
    pub async fn send_value(
        &self,
        to: Address,
        value: U256,
    ) -> Result<(), CallError> {
        self.devnet.transfer(self.address, to, value).await
    }

    /// Create a smart contract deployer on behalf of this account.
    #[must_use]
    pub fn as_deployer(&self) -> Deployer {
        Deployer::new(self.devnet.clone(), self.address)
    }
}
