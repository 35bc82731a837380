//! Typed handles to deployed contracts.
//!
//! A handle pairs a contract address with the account its calls are sent
//! from. Handles are cheap to clone and [`connect`] rebinds one to a
//! different caller, so a single deployment can be driven from several
//! accounts in the same test.
//!
//! [`connect`]: GuessingGameContract::connect

use alloy_primitives::{Address, B256, U256};

use crate::{
    account::Account, chain::Devnet, error::CallError, receipt::Receipt,
};

/// A deployed guessing game, bound to a calling account.
#[derive(Clone, Debug)]
pub struct GuessingGameContract {
    devnet: Devnet,
    caller: Address,
    address: Address,
    token: Address,
}

impl GuessingGameContract {
    pub(crate) fn new(
        devnet: Devnet,
        caller: Address,
        address: Address,
        token: Address,
    ) -> Self {
        Self { devnet, caller, address, token }
    }

    /// Returns the game's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns a handle to the same game that sends calls from `account`.
    #[must_use]
    pub fn connect(&self, account: &Account) -> Self {
        Self { caller: account.address(), ..self.clone() }
    }

    /// Returns a handle to the game's reward token, bound to the same
    /// caller as this handle.
    #[must_use]
    pub fn token(&self) -> GuessingTokenContract {
        GuessingTokenContract::new(self.devnet.clone(), self.caller, self.token)
    }

    /// Returns the game's native balance, the escrow currently in play.
    pub async fn balance(&self) -> U256 {
        self.devnet.balance(self.address).await
    }

    /// Returns the commitment to the current secret number.
    ///
    /// # Errors
    ///
    /// * [`CallError::UnknownContract`] - If no game is deployed at this
    ///   handle's address.
    pub async fn secret_number_hash(&self) -> Result<B256, CallError> {
        self.devnet
            .read_game(self.address, |game| game.secret_number_hash())
            .await
    }

    /// Returns the address of the game's owner.
    ///
    /// # Errors
    ///
    /// * [`CallError::UnknownContract`] - If no game is deployed at this
    ///   handle's address.
    pub async fn owner(&self) -> Result<Address, CallError> {
        self.devnet.read_game(self.address, |game| game.owner()).await
    }

    /// Submits a guess for the secret number, attaching `value` of native
    /// currency.
    ///
    /// # Errors
    ///
    /// * [`CallError::Revert`] - If the game rejects the guess.
    /// * [`CallError::InsufficientFunds`] - If the calling account cannot
    ///   cover `value`.
    pub async fn guess(
        &self,
        number: U256,
        value: U256,
    ) -> Result<Receipt, CallError> {
        let ((), receipt) = self
            .devnet
            .call_game(self.caller, self.address, value, |game, env| {
                game.guess(env, number)
            })
            .await?;
        Ok(receipt)
    }

    /// Replaces the commitment to the secret number.
    ///
    /// # Errors
    ///
    /// * [`CallError::Revert`] - If the caller is not the game's owner.
    pub async fn set_secret_number_hash(
        &self,
        secret_number_hash: B256,
    ) -> Result<Receipt, CallError> {
        let ((), receipt) = self
            .devnet
            .call_game(self.caller, self.address, U256::ZERO, |game, env| {
                game.set_secret_number_hash(env, secret_number_hash)
            })
            .await?;
        Ok(receipt)
    }

    /// Transfers ownership of the game to `new_owner`.
    ///
    /// # Errors
    ///
    /// * [`CallError::Revert`] - If the caller is not the game's owner, or
    ///   `new_owner` is the zero address.
    pub async fn transfer_ownership(
        &self,
        new_owner: Address,
    ) -> Result<Receipt, CallError> {
        let ((), receipt) = self
            .devnet
            .call_game(self.caller, self.address, U256::ZERO, |game, env| {
                game.transfer_ownership(env, new_owner)
            })
            .await?;
        Ok(receipt)
    }

    /// Leaves the game without an owner, freezing the commitment forever.
    ///
    /// # Errors
    ///
    /// * [`CallError::Revert`] - If the caller is not the game's owner.
    pub async fn renounce_ownership(&self) -> Result<Receipt, CallError> {
        let ((), receipt) = self
            .devnet
            .call_game(self.caller, self.address, U256::ZERO, |game, env| {
                game.renounce_ownership(env)
            })
            .await?;
        Ok(receipt)
    }
}

/// A deployed reward token, bound to a calling account.
#[derive(Clone, Debug)]
pub struct GuessingTokenContract {
    devnet: Devnet,
    caller: Address,
    address: Address,
}

impl GuessingTokenContract {
    pub(crate) fn new(
        devnet: Devnet,
        caller: Address,
        address: Address,
    ) -> Self {
        Self { devnet, caller, address }
    }

    /// Returns the token's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns a handle to the same token that sends calls from `account`.
    #[must_use]
    pub fn connect(&self, account: &Account) -> Self {
        Self { caller: account.address(), ..self.clone() }
    }

    /// Returns the name of the token.
    ///
    /// # Errors
    ///
    /// * [`CallError::UnknownContract`] - If no token is deployed at this
    ///   handle's address.
    pub async fn name(&self) -> Result<String, CallError> {
        self.devnet.read_token(self.address, |token| token.name()).await
    }

    /// Returns the symbol of the token.
    ///
    /// # Errors
    ///
    /// * [`CallError::UnknownContract`] - If no token is deployed at this
    ///   handle's address.
    pub async fn symbol(&self) -> Result<String, CallError> {
        self.devnet.read_token(self.address, |token| token.symbol()).await
    }

    /// Returns the number of decimals of the token.
    ///
    /// # Errors
    ///
    /// * [`CallError::UnknownContract`] - If no token is deployed at this
    ///   handle's address.
    pub async fn decimals(&self) -> Result<u8, CallError> {
        self.devnet.read_token(self.address, |token| token.decimals()).await
    }

    /// Returns the number of tokens in existence.
    ///
    /// # Errors
    ///
    /// * [`CallError::UnknownContract`] - If no token is deployed at this
    ///   handle's address.
    pub async fn total_supply(&self) -> Result<U256, CallError> {
        self.devnet.read_token(self.address, |token| token.total_supply()).await
    }

    /// Returns the number of tokens owned by `account`.
    ///
    /// # Errors
    ///
    /// * [`CallError::UnknownContract`] - If no token is deployed at this
    ///   handle's address.
    pub async fn balance_of(
        &self,
        account: Address,
    ) -> Result<U256, CallError> {
        self.devnet
            .read_token(self.address, |token| token.balance_of(account))
            .await
    }

    /// Moves `value` tokens from the calling account to `to`.
    ///
    /// # Errors
    ///
    /// * [`CallError::Revert`] - If the token rejects the transfer.
    pub async fn transfer(
        &self,
        to: Address,
        value: U256,
    ) -> Result<Receipt, CallError> {
        let (_, receipt) = self
            .devnet
            .call_token(self.caller, self.address, |token, env| {
                token.transfer(env, to, value)
            })
            .await?;
        Ok(receipt)
    }
}
