//! The ledger behind a devnet and the transaction machinery driving it.
//!
//! All state lives in a single [`ChainState`] guarded by an async lock.
//! A transaction runs against a clone of the state and the clone replaces
//! the original only when the call succeeds, so a reverted call never
//! leaves a partial write behind.

use std::{collections::BTreeMap, sync::Arc};

use alloy_primitives::{Address, Log, B256, U256};
use guessing_game::{
    game::{self, GuessingGame},
    host::{CallFailed, Host},
    token::{self, GuessingToken},
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    account::{Account, DEFAULT_FUNDING},
    error::CallError,
    receipt::Receipt,
};

/// A contract deployed on the chain.
#[derive(Clone, Debug)]
enum Instance {
    Game(GuessingGame),
    Token(GuessingToken),
}

/// Everything a transaction can read or write.
#[derive(Clone, Debug, Default)]
struct ChainState {
    /// Native balances of accounts and contracts.
    balances: BTreeMap<Address, U256>,
    /// Deployed contracts, keyed by address.
    instances: BTreeMap<Address, Instance>,
    /// Logs of every committed transaction, in emission order.
    logs: Vec<Log>,
    /// Number of contracts deployed so far.
    deployed: u64,
}

impl ChainState {
    fn balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Moves `value` of the native token from `from` to `to`.
    fn move_value(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), CallError> {
        let from_balance = self.balance(from);
        if from_balance < value {
            return Err(CallError::InsufficientFunds {
                account: from,
                balance: from_balance,
                needed: value,
            });
        }
        self.balances.insert(from, from_balance - value);
        let to_balance = self.balance(to);
        self.balances.insert(to, to_balance + value);
        Ok(())
    }

    /// Hands out the address for the next deployment.
    ///
    /// Addresses are deterministic: a fixed `0xc0de` prefix followed by
    /// the deployment counter, so assertion failures print recognizable
    /// values.
    fn allocate_address(&mut self) -> Address {
        self.deployed += 1;
        let mut bytes = [0u8; 20];
        bytes[0] = 0xc0;
        bytes[1] = 0xde;
        bytes[12..].copy_from_slice(&self.deployed.to_be_bytes());
        Address::from(bytes)
    }
}

/// The [`Host`] a contract sees while it executes inside a draft of the
/// chain state.
pub(crate) struct Env<'a> {
    state: &'a mut ChainState,
    sender: Address,
    value: U256,
    address: Address,
}

impl Host for Env<'_> {
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
        self.state.balance(account)
    }

    fn transfer_eth(
        &mut self,
        to: Address,
        amount: U256,
    ) -> Result<(), CallFailed> {
        self.state
            .move_value(self.address, to, amount)
            .map_err(|_| CallFailed::new(Vec::new()))
    }

    fn erc20_transfer(
        &mut self,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), CallFailed> {
        let mut instance = match self.state.instances.remove(&token) {
            Some(Instance::Token(instance)) => instance,
            Some(other) => {
                self.state.instances.insert(token, other);
                return Err(CallFailed::new(Vec::new()));
            }
            None => return Err(CallFailed::new(Vec::new())),
        };

        // The nested call runs against the same draft as the caller. A
        // failed `transfer` makes no writes, so there is no inner state to
        // unwind.
        let mut env = Env {
            state: &mut *self.state,
            sender: self.address,
            value: U256::ZERO,
            address: token,
        };
        let result = instance.transfer(&mut env, to, amount);
        self.state.instances.insert(token, Instance::Token(instance));

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(CallFailed::new(e.into())),
        }
    }

    fn raw_log(&mut self, log: Log) {
        self.state.logs.push(log);
    }
}

/// An in-process chain hosting the guessing game and its reward token.
///
/// Cloning a [`Devnet`] yields another handle to the same chain, so
/// accounts and contract handles can be moved freely across tasks.
/// Transactions take the state lock exclusively and therefore serialize,
/// whatever task they arrive from.
#[derive(Clone, Debug, Default)]
pub struct Devnet {
    state: Arc<RwLock<ChainState>>,
}

impl Devnet {
    /// Creates a chain with no accounts and no contracts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account funded with [`DEFAULT_FUNDING`].
    pub async fn create_account(&self) -> Account {
        self.create_account_with(DEFAULT_FUNDING).await
    }

    /// Creates an account holding `funding` of the native token.
    pub async fn create_account_with(&self, funding: U256) -> Account {
        let address = Address::from(rand::random::<[u8; 20]>());
        let mut state = self.state.write().await;
        state.balances.insert(address, funding);
        debug!(%address, %funding, "created account");
        Account::new(self.clone(), address)
    }

    /// Returns the native balance of `account`.
    pub async fn balance(&self, account: Address) -> U256 {
        self.state.read().await.balance(account)
    }

    /// Returns every log committed so far, in emission order.
    pub async fn logs(&self) -> Vec<Log> {
        self.state.read().await.logs.clone()
    }

    /// Runs `tx` against a draft of the chain and commits the draft only
    /// when `tx` succeeds.
    ///
    /// A failed transaction leaves no trace: balance moves, storage
    /// writes and logs all roll back together.
    async fn transact<T>(
        &self,
        tx: impl FnOnce(&mut ChainState) -> Result<T, CallError>,
    ) -> Result<(T, Receipt), CallError> {
        let mut state = self.state.write().await;
        let mut draft = (*state).clone();
        match tx(&mut draft) {
            Ok(output) => {
                let receipt =
                    Receipt::new(draft.logs[state.logs.len()..].to_vec());
                *state = draft;
                Ok((output, receipt))
            }
            Err(err) => {
                debug!(%err, "transaction reverted");
                Err(err)
            }
        }
    }

    /// Moves native value between two addresses without running any
    /// contract code.
    pub(crate) async fn transfer(
        &self,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<(), CallError> {
        self.transact(|state| state.move_value(from, to, value)).await?;
        Ok(())
    }

    /// Sends a message call to the game deployed at `contract`.
    ///
    /// `value` is moved from `sender` to the game before the call runs,
    /// so the game already holds it when it reads its own balance.
    pub(crate) async fn call_game<T>(
        &self,
        sender: Address,
        contract: Address,
        value: U256,
        call: impl FnOnce(
            &mut GuessingGame,
            &mut Env<'_>,
        ) -> Result<T, game::Error>,
    ) -> Result<(T, Receipt), CallError> {
        self.transact(|state| {
            state.move_value(sender, contract, value)?;

            let mut instance = match state.instances.remove(&contract) {
                Some(Instance::Game(game)) => game,
                Some(other) => {
                    state.instances.insert(contract, other);
                    return Err(CallError::UnknownContract(contract));
                }
                None => return Err(CallError::UnknownContract(contract)),
            };

            let mut env =
                Env { state: &mut *state, sender, value, address: contract };
            let result = call(&mut instance, &mut env);
            state.instances.insert(contract, Instance::Game(instance));

            result.map_err(|e| CallError::Revert(e.into()))
        })
        .await
    }

    /// Sends a message call to the token deployed at `contract`.
    pub(crate) async fn call_token<T>(
        &self,
        sender: Address,
        contract: Address,
        call: impl FnOnce(
            &mut GuessingToken,
            &mut Env<'_>,
        ) -> Result<T, token::Error>,
    ) -> Result<(T, Receipt), CallError> {
        self.transact(|state| {
            let mut instance = match state.instances.remove(&contract) {
                Some(Instance::Token(token)) => token,
                Some(other) => {
                    state.instances.insert(contract, other);
                    return Err(CallError::UnknownContract(contract));
                }
                None => return Err(CallError::UnknownContract(contract)),
            };

            let mut env = Env {
                state: &mut *state,
                sender,
                value: U256::ZERO,
                address: contract,
            };
            let result = call(&mut instance, &mut env);
            state.instances.insert(contract, Instance::Token(instance));

            result.map_err(|e| CallError::Revert(e.into()))
        })
        .await
    }

    /// Reads from the game deployed at `contract` without a transaction.
    pub(crate) async fn read_game<T>(
        &self,
        contract: Address,
        read: impl FnOnce(&GuessingGame) -> T,
    ) -> Result<T, CallError> {
        match self.state.read().await.instances.get(&contract) {
            Some(Instance::Game(game)) => Ok(read(game)),
            _ => Err(CallError::UnknownContract(contract)),
        }
    }

    /// Reads from the token deployed at `contract` without a transaction.
    pub(crate) async fn read_token<T>(
        &self,
        contract: Address,
        read: impl FnOnce(&GuessingToken) -> T,
    ) -> Result<T, CallError> {
        match self.state.read().await.instances.get(&contract) {
            Some(Instance::Token(token)) => Ok(read(token)),
            _ => Err(CallError::UnknownContract(contract)),
        }
    }

    /// Deploys a game owned by `deployer` together with its reward token.
    ///
    /// Returns the game's address and the token's address. The token's
    /// full supply is minted to the game.
    pub(crate) async fn deploy_game(
        &self,
        deployer: Address,
        secret_number_hash: B256,
    ) -> Result<(Address, Address), CallError> {
        let ((game_address, token_address), _) = self
            .transact(|state| {
                let game_address = state.allocate_address();
                let token_address = state.allocate_address();

                // The token is constructed first so the game can be handed
                // its address, with the supply minted straight to the game.
                let mut env = Env {
                    state: &mut *state,
                    sender: deployer,
                    value: U256::ZERO,
                    address: token_address,
                };
                let token = GuessingToken::new(&mut env, game_address)
                    .map_err(|e| CallError::Revert(e.into()))?;

                let mut env = Env {
                    state: &mut *state,
                    sender: deployer,
                    value: U256::ZERO,
                    address: game_address,
                };
                let game = GuessingGame::new(
                    &mut env,
                    deployer,
                    secret_number_hash,
                    token_address,
                )
                .map_err(|e| CallError::Revert(e.into()))?;

                state.instances.insert(token_address, Instance::Token(token));
                state.instances.insert(game_address, Instance::Game(game));

                Ok((game_address, token_address))
            })
            .await?;

        info!(
            game = %game_address,
            token = %token_address,
            "deployed guessing game"
        );
        Ok((game_address, token_address))
    }

    /// Deploys a standalone token minted to `deployer`.
    pub(crate) async fn deploy_token(
        &self,
        deployer: Address,
    ) -> Result<Address, CallError> {
        let (token_address, _) = self
            .transact(|state| {
                let token_address = state.allocate_address();
                let mut env = Env {
                    state: &mut *state,
                    sender: deployer,
                    value: U256::ZERO,
                    address: token_address,
                };
                let token = GuessingToken::new(&mut env, deployer)
                    .map_err(|e| CallError::Revert(e.into()))?;
                state.instances.insert(token_address, Instance::Token(token));
                Ok(token_address)
            })
            .await?;

        info!(token = %token_address, "deployed guessing token");
        Ok(token_address)
    }
}
