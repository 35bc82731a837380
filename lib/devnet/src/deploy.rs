//! Contract deployment on behalf of an account.

use alloy_primitives::{Address, B256};

use crate::{
    chain::Devnet,
    contract::{GuessingGameContract, GuessingTokenContract},
    error::CallError,
};

/// A smart contract deployer acting for a single account.
///
/// Create one with [`crate::Account::as_deployer`].
#[derive(Clone, Debug)]
pub struct Deployer {
    devnet: Devnet,
    sender: Address,
}

impl Deployer {
    pub(crate) fn new(devnet: Devnet, sender: Address) -> Self {
        Self { devnet, sender }
    }

    /// Deploy a guessing game committed to `secret_number_hash`, together
    /// with its reward token.
    ///
    /// The deploying account becomes the game's owner. The token's full
    /// supply is minted to the game so it has rewards to hand out.
    ///
    /// # Errors
    ///
    /// * [`CallError::Revert`] - If either constructor reverts.
    pub async fn deploy_guessing_game(
        &self,
        secret_number_hash: B256,
    ) -> Result<GuessingGameContract, CallError> {
        let (game, token) =
            self.devnet.deploy_game(self.sender, secret_number_hash).await?;
        Ok(GuessingGameContract::new(
            self.devnet.clone(),
            self.sender,
            game,
            token,
        ))
    }

    /// Deploy a standalone reward token, minting the full supply to the
    /// deploying account.
    ///
    /// # Errors
    ///
    /// * [`CallError::Revert`] - If the constructor reverts.
    pub async fn deploy_guessing_token(
        &self,
    ) -> Result<GuessingTokenContract, CallError> {
        let token = self.devnet.deploy_token(self.sender).await?;
        Ok(GuessingTokenContract::new(
            self.devnet.clone(),
            self.sender,
            token,
        ))
    }
}
