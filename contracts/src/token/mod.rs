//! Implementation of the game's reward token.
//!
//! [`GuessingToken`] is a fixed-supply ERC-20: the full supply is minted to
//! a single recipient when the contract is constructed, and no further
//! minting is possible. Functions revert instead of returning `false` on
//! failure.
use std::collections::BTreeMap;

use alloy_primitives::{uint, Address, U256};
use alloy_sol_types::SolError;
pub use sol::*;

use crate::host::{self, Host};

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when `value` tokens are moved from one account (`from`)
        /// to another (`to`).
        ///
        /// Note that `value` may be zero.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event Transfer(address indexed from, address indexed to, uint256 value);
    }

    sol! {
        /// Indicates an error related to the current `balance` of `sender`.
        /// Used in transfers.
        ///
        /// * `sender` - Address whose tokens are being transferred.
        /// * `balance` - Current balance for the interacting account.
        /// * `needed` - Minimum amount required to perform a transfer.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);
        /// Indicates a failure with the token `sender`. Used in transfers.
        ///
        /// * `sender` - Address whose tokens are being transferred.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InvalidSender(address sender);
        /// Indicates a failure with the token `receiver`. Used in transfers.
        ///
        /// * `receiver` - Address to which the tokens are being transferred.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC20InvalidReceiver(address receiver);
    }
}

/// A [`GuessingToken`] error defined as described in [ERC-6093].
///
/// [ERC-6093]: https://eips.ethereum.org/EIPS/eip-6093
#[derive(Debug)]
pub enum Error {
    /// Indicates an error related to the current balance of `sender`. Used
    /// in transfers.
    InsufficientBalance(ERC20InsufficientBalance),
    /// Indicates a failure with the token `sender`. Used in transfers.
    InvalidSender(ERC20InvalidSender),
    /// Indicates a failure with the token `receiver`. Used in transfers.
    InvalidReceiver(ERC20InvalidReceiver),
}

impl From<Error> for Vec<u8> {
    fn from(error: Error) -> Self {
        match error {
            Error::InsufficientBalance(e) => e.abi_encode(),
            Error::InvalidSender(e) => e.abi_encode(),
            Error::InvalidReceiver(e) => e.abi_encode(),
        }
    }
}

/// State of a [`GuessingToken`] contract.
#[derive(Debug, Clone)]
pub struct GuessingToken {
    /// Maps users to balances.
    balances: BTreeMap<Address, U256>,
    /// The total supply of the token.
    total_supply: U256,
}

impl GuessingToken {
    /// Name of the token.
    pub const NAME: &'static str = "GuessingToken";
    /// Symbol of the token, a shorter version of the name.
    pub const SYMBOL: &'static str = "GUESS";
    /// Number of decimals used for user representation.
    pub const DECIMALS: u8 = 18;
    /// Total supply minted at construction: 100,000 whole tokens.
    pub const INITIAL_SUPPLY: U256 =
        uint!(100_000_000_000_000_000_000_000_U256);

    /// Constructor. Mints [`GuessingToken::INITIAL_SUPPLY`] to `recipient`.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `recipient` - Account the full supply is minted to.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If `recipient` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn new(
        host: &mut impl Host,
        recipient: Address,
    ) -> Result<Self, Error> {
        let mut token =
            Self { balances: BTreeMap::new(), total_supply: U256::ZERO };
        token._mint(host, recipient, Self::INITIAL_SUPPLY)?;
        Ok(token)
    }

    /// Returns the name of the token.
    #[must_use]
    pub fn name(&self) -> String {
        Self::NAME.into()
    }

    /// Returns the symbol of the token.
    #[must_use]
    pub fn symbol(&self) -> String {
        Self::SYMBOL.into()
    }

    /// Returns the number of decimals used to get the token's user
    /// representation.
    #[must_use]
    pub fn decimals(&self) -> u8 {
        Self::DECIMALS
    }

    /// Returns the number of tokens in existence.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Returns the number of tokens owned by `account`.
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Moves a `value` amount of tokens from the caller's account to `to`.
    ///
    /// Returns a boolean value indicating whether the operation succeeded.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `to` - Account to transfer tokens to.
    /// * `value` - Number of tokens to transfer.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If the `to` address is
    ///   `Address::ZERO`.
    /// * [`Error::InsufficientBalance`] - If the caller doesn't have a
    ///   balance of at least `value`.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    pub fn transfer(
        &mut self,
        host: &mut impl Host,
        to: Address,
        value: U256,
    ) -> Result<bool, Error> {
        let from = host.msg_sender();
        self._transfer(host, from, to, value)?;
        Ok(true)
    }

    /// Internal implementation of transferring tokens between two accounts.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidSender`] - If the `from` address is
    ///   `Address::ZERO`.
    /// * [`Error::InvalidReceiver`] - If the `to` address is
    ///   `Address::ZERO`.
    /// * [`Error::InsufficientBalance`] - If the `from` address doesn't
    ///   have enough tokens.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    fn _transfer(
        &mut self,
        host: &mut impl Host,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            return Err(Error::InvalidSender(ERC20InvalidSender {
                sender: Address::ZERO,
            }));
        }
        if to.is_zero() {
            return Err(Error::InvalidReceiver(ERC20InvalidReceiver {
                receiver: Address::ZERO,
            }));
        }

        self._update(host, from, to, value)?;

        Ok(())
    }

    /// Creates a `value` amount of tokens and assigns them to `account`, by
    /// transferring it from `Address::ZERO`. Relies on the `_update`
    /// mechanism.
    ///
    /// # Panics
    ///
    /// If `total_supply` exceeds `U256::MAX`.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidReceiver`] - If the `account` address is
    ///   `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    fn _mint(
        &mut self,
        host: &mut impl Host,
        account: Address,
        value: U256,
    ) -> Result<(), Error> {
        if account.is_zero() {
            return Err(Error::InvalidReceiver(ERC20InvalidReceiver {
                receiver: Address::ZERO,
            }));
        }
        self._update(host, Address::ZERO, account, value)
    }

    /// Transfers a `value` amount of tokens from `from` to `to`, or
    /// alternatively mints if `from` is the zero address.
    ///
    /// All customizations to transfers and mints should be done by using
    /// this function.
    ///
    /// # Panics
    ///
    /// If `total_supply` exceeds `U256::MAX`. It may happen during the
    /// `mint` operation.
    ///
    /// # Errors
    ///
    /// * [`Error::InsufficientBalance`] - If the `from` address doesn't
    ///   have enough tokens.
    ///
    /// # Events
    ///
    /// * [`Transfer`].
    fn _update(
        &mut self,
        host: &mut impl Host,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), Error> {
        if from.is_zero() {
            // Mint operation. Overflow check required: the rest of the code
            // assumes that `total_supply` never overflows.
            self.total_supply = self
                .total_supply
                .checked_add(value)
                .expect("should not exceed `U256::MAX` for `total_supply`");
        } else {
            let from_balance = self.balance_of(from);
            if from_balance < value {
                return Err(Error::InsufficientBalance(
                    ERC20InsufficientBalance {
                        sender: from,
                        balance: from_balance,
                        needed: value,
                    },
                ));
            }
            // Overflow not possible:
            // `value` <= `from_balance` <= `total_supply`.
            self.balances.insert(from, from_balance - value);
        }

        let balance_to = self.balance_of(to);
        // Overflow not possible:
        // `balance_to` + `value` is at most `total_supply`,
        // which fits into a `U256`.
        self.balances.insert(to, balance_to + value);

        host::log(host, Transfer { from, to, value });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address};

    use super::*;
    use crate::test_utils::{MockHost, ALICE, BOB};

    #[test]
    fn mints_initial_supply_to_recipient() {
        let mut host = MockHost::new(ALICE);
        let token = GuessingToken::new(&mut host, ALICE).unwrap();

        assert_eq!(token.total_supply(), GuessingToken::INITIAL_SUPPLY);
        assert_eq!(token.balance_of(ALICE), GuessingToken::INITIAL_SUPPLY);
        assert_eq!(token.balance_of(BOB), U256::ZERO);

        host.assert_emitted(&Transfer {
            from: Address::ZERO,
            to: ALICE,
            value: GuessingToken::INITIAL_SUPPLY,
        });
    }

    #[test]
    fn constructor_reverts_when_recipient_is_zero() {
        let mut host = MockHost::new(ALICE);
        let err = GuessingToken::new(&mut host, Address::ZERO)
            .expect_err("should revert");

        assert!(matches!(
            err,
            Error::InvalidReceiver(ERC20InvalidReceiver { receiver })
                if receiver.is_zero()
        ));
    }

    #[test]
    fn reports_fixed_metadata() {
        let mut host = MockHost::new(ALICE);
        let token = GuessingToken::new(&mut host, ALICE).unwrap();

        assert_eq!(token.name(), "GuessingToken");
        assert_eq!(token.symbol(), "GUESS");
        assert_eq!(token.decimals(), 18);
    }

    #[test]
    fn transfers() {
        let mut host = MockHost::new(ALICE);
        let mut token = GuessingToken::new(&mut host, ALICE).unwrap();

        let value = uint!(50_000_000_000_000_000_000_U256);
        token.transfer(&mut host, BOB, value).expect("should transfer");

        assert_eq!(token.balance_of(BOB), value);
        assert_eq!(
            token.balance_of(ALICE),
            GuessingToken::INITIAL_SUPPLY - value
        );
        assert_eq!(token.total_supply(), GuessingToken::INITIAL_SUPPLY);

        host.assert_emitted(&Transfer { from: ALICE, to: BOB, value });
    }

    #[test]
    fn transfers_zero_tokens() {
        let mut host = MockHost::new(BOB);
        let mut token = GuessingToken::new(&mut host, ALICE).unwrap();

        token.transfer(&mut host, ALICE, U256::ZERO).expect("should allow");

        host.assert_emitted(&Transfer {
            from: BOB,
            to: ALICE,
            value: U256::ZERO,
        });
    }

    #[test]
    fn transfer_reverts_when_insufficient_balance() {
        let mut host = MockHost::new(BOB);
        let mut token = GuessingToken::new(&mut host, ALICE).unwrap();

        let err = token
            .transfer(&mut host, ALICE, U256::from(1))
            .expect_err("should revert");

        assert!(matches!(
            err,
            Error::InsufficientBalance(ERC20InsufficientBalance {
                sender,
                balance,
                needed,
            }) if sender == BOB
                && balance == U256::ZERO
                && needed == U256::from(1)
        ));
    }

    #[test]
    fn transfer_reverts_when_receiver_is_zero() {
        let mut host = MockHost::new(ALICE);
        let mut token = GuessingToken::new(&mut host, ALICE).unwrap();

        let err = token
            .transfer(&mut host, Address::ZERO, U256::from(1))
            .expect_err("should revert");

        assert!(matches!(
            err,
            Error::InvalidReceiver(ERC20InvalidReceiver { receiver })
                if receiver.is_zero()
        ));
    }
}
