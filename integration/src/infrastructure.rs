//! Shared setup for the end-to-end suites.

use alloy_primitives::{uint, U256};
use devnet::{Account, Devnet, GuessingGameContract};
use guessing_game::utils::commitment;

/// The number the game's initial commitment is made to.
pub(crate) const INITIAL_SECRET_NUMBER: U256 = uint!(42_U256);

/// A second secret number for suites that rotate the commitment.
pub(crate) const NEW_SECRET_NUMBER: U256 = uint!(24_U256);

/// A devnet with two funded accounts and a deployed game.
pub(crate) struct Infrastructure {
    /// The chain everything runs on.
    pub(crate) devnet: Devnet,
    /// Deploys and owns the game.
    pub(crate) alice: Account,
    /// Plays the game.
    pub(crate) bob: Account,
    /// The deployed game, calling from `alice`.
    pub(crate) game: GuessingGameContract,
}

impl Infrastructure {
    /// Spins up a devnet, funds `alice` and `bob`, and deploys a game
    /// committed to [`INITIAL_SECRET_NUMBER`] with `alice` as its owner.
    pub(crate) async fn new() -> eyre::Result<Self> {
        let devnet = Devnet::new();
        let alice = devnet.create_account().await;
        let bob = devnet.create_account().await;
        let game = alice
            .as_deployer()
            .deploy_guessing_game(commitment::commit(INITIAL_SECRET_NUMBER))
            .await?;
        Ok(Infrastructure { devnet, alice, bob, game })
    }
}
