//! Contract module which provides a basic access control mechanism, where
//! there is an account (an owner) that can be granted exclusive access to
//! specific functions.
//!
//! The initial owner is set to the address provided at construction. This
//! can later be changed with [`Ownable::transfer_ownership`].
//!
//! This module is used through composition. It makes available the
//! [`Ownable::only_owner`] function, which can be called to restrict
//! operations to the owner.
use alloy_primitives::Address;
use alloy_sol_types::SolError;
pub use sol::*;

use crate::host::{self, Host};

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when ownership gets transferred between accounts.
        ///
        /// * `previous_owner` - Address of the previous owner.
        /// * `new_owner` - Address of the new owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
    }

    sol! {
        /// The caller account is not authorized to perform an operation.
        ///
        /// * `account` - Account that was found to not be authorized.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableUnauthorizedAccount(address account);
        /// The owner is not a valid owner account. (eg. `Address::ZERO`)
        ///
        /// * `owner` - Account that's not allowed to become the owner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error OwnableInvalidOwner(address owner);
    }
}

/// An error that occurred in the implementation of an [`Ownable`] contract.
#[derive(Debug)]
pub enum Error {
    /// The caller account is not authorized to perform an operation.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. `Address::ZERO`)
    InvalidOwner(OwnableInvalidOwner),
}

impl From<Error> for Vec<u8> {
    fn from(error: Error) -> Self {
        match error {
            Error::UnauthorizedAccount(e) => e.abi_encode(),
            Error::InvalidOwner(e) => e.abi_encode(),
        }
    }
}

/// State of an [`Ownable`] contract.
#[derive(Debug, Clone)]
pub struct Ownable {
    /// The current owner of this contract.
    pub(crate) owner: Address,
}

impl Ownable {
    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `initial_owner` - The initial owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If initial owner is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn new(
        host: &mut impl Host,
        initial_owner: Address,
    ) -> Result<Self, Error> {
        if initial_owner.is_zero() {
            return Err(Error::InvalidOwner(OwnableInvalidOwner {
                owner: Address::ZERO,
            }));
        }

        let mut ownable = Self { owner: Address::ZERO };
        ownable._transfer_ownership(host, initial_owner);
        Ok(ownable)
    }

    /// Returns the address of the current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Can only be called by the current owner.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `new_owner` - The next owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any account other
    ///   than the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn transfer_ownership(
        &mut self,
        host: &mut impl Host,
        new_owner: Address,
    ) -> Result<(), Error> {
        self.only_owner(host)?;

        if new_owner.is_zero() {
            return Err(Error::InvalidOwner(OwnableInvalidOwner {
                owner: Address::ZERO,
            }));
        }

        self._transfer_ownership(host, new_owner);

        Ok(())
    }

    /// Leaves the contract without owner. It will not be possible to call
    /// functions that require `only_owner`. Can only be called by the
    /// current owner.
    ///
    /// NOTE: Renouncing ownership will leave the contract without an owner,
    /// thereby disabling any functionality that is only available to the
    /// owner.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn renounce_ownership(
        &mut self,
        host: &mut impl Host,
    ) -> Result<(), Error> {
        self.only_owner(host)?;
        self._transfer_ownership(host, Address::ZERO);
        Ok(())
    }

    /// Checks if the message sender is set as the owner.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any account other
    ///   than the owner.
    pub fn only_owner(&self, host: &impl Host) -> Result<(), Error> {
        let account = host.msg_sender();
        if self.owner() != account {
            return Err(Error::UnauthorizedAccount(
                OwnableUnauthorizedAccount { account },
            ));
        }

        Ok(())
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Internal function without access restriction.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `new_owner` - Account that is going to be the next owner.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn _transfer_ownership(
        &mut self,
        host: &mut impl Host,
        new_owner: Address,
    ) {
        let previous_owner = self.owner;
        self.owner = new_owner;
        host::log(host, OwnershipTransferred { previous_owner, new_owner });
    }
}
