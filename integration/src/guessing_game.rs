//! End-to-end suite for the guessing game.

use alloy_primitives::{uint, Address, U256};
use devnet::DEFAULT_FUNDING;
use guessing_game::{
    access::ownable::{OwnableUnauthorizedAccount, OwnershipTransferred},
    game::{
        CorrectGuess, GuessingGame, IncorrectAdmissionPrice, IncorrectGuess,
        TokenRewardFailed,
    },
    token::{GuessingToken, Transfer},
    utils::commitment,
};

use crate::infrastructure::*;

const ONE_ETHER: U256 = uint!(1_000_000_000_000_000_000_U256);

#[tokio::test]
async fn deploys_the_game_with_the_committed_secret() -> eyre::Result<()> {
    let Infrastructure { alice, game, .. } = Infrastructure::new().await?;

    assert_eq!(game.owner().await?, alice.address());
    assert_eq!(
        game.secret_number_hash().await?,
        commitment::commit(INITIAL_SECRET_NUMBER)
    );
    assert_eq!(game.balance().await, U256::ZERO);

    let token = game.token();
    assert_eq!(
        token.balance_of(game.address()).await?,
        GuessingToken::INITIAL_SUPPLY
    );
    Ok(())
}

#[tokio::test]
async fn allows_the_owner_to_set_a_new_commitment() -> eyre::Result<()> {
    let Infrastructure { game, .. } = Infrastructure::new().await?;

    let new_hash = commitment::commit(NEW_SECRET_NUMBER);
    game.set_secret_number_hash(new_hash).await?;

    assert_eq!(game.secret_number_hash().await?, new_hash);
    Ok(())
}

#[tokio::test]
async fn rejects_commitment_updates_from_non_owners() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    let err = game
        .connect(&bob)
        .set_secret_number_hash(commitment::commit(NEW_SECRET_NUMBER))
        .await
        .expect_err("should revert");

    assert!(err.reverted_with(OwnableUnauthorizedAccount {
        account: bob.address(),
    }));
    assert_eq!(
        game.secret_number_hash().await?,
        commitment::commit(INITIAL_SECRET_NUMBER)
    );
    Ok(())
}

#[tokio::test]
async fn rejects_guesses_with_no_value() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    let err = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, U256::ZERO)
        .await
        .expect_err("should revert");

    assert!(err.reverted_with(IncorrectAdmissionPrice {
        paid: U256::ZERO,
        expected: GuessingGame::ADMISSION_PRICE,
    }));
    Ok(())
}

#[tokio::test]
async fn rejects_overpaid_guesses() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    let err = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, ONE_ETHER)
        .await
        .expect_err("should revert");

    assert!(err.reverted_with(IncorrectAdmissionPrice {
        paid: ONE_ETHER,
        expected: GuessingGame::ADMISSION_PRICE,
    }));
    assert_eq!(bob.balance().await, DEFAULT_FUNDING);
    assert_eq!(game.balance().await, U256::ZERO);
    Ok(())
}

#[tokio::test]
async fn rejects_underpaid_guesses() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    let underpayment = uint!(100_000_000_000_000_U256);
    let err = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, underpayment)
        .await
        .expect_err("should revert");

    assert!(err.reverted_with(IncorrectAdmissionPrice {
        paid: underpayment,
        expected: GuessingGame::ADMISSION_PRICE,
    }));
    assert_eq!(bob.balance().await, DEFAULT_FUNDING);
    Ok(())
}

#[tokio::test]
async fn absorbs_the_fee_on_an_incorrect_guess() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    let receipt = game
        .connect(&bob)
        .guess(NEW_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;

    assert!(receipt.emits(IncorrectGuess { number: NEW_SECRET_NUMBER }));
    assert_eq!(game.balance().await, GuessingGame::ADMISSION_PRICE);
    assert_eq!(
        bob.balance().await,
        DEFAULT_FUNDING - GuessingGame::ADMISSION_PRICE
    );
    assert_eq!(game.token().balance_of(bob.address()).await?, U256::ZERO);
    Ok(())
}

#[tokio::test]
async fn pays_the_winner_and_keeps_the_rest() -> eyre::Result<()> {
    let Infrastructure { alice, bob, game, .. } = Infrastructure::new().await?;

    // Two wrong guesses bank their fees in the game's escrow.
    game.connect(&bob)
        .guess(NEW_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;
    game.guess(uint!(1234_U256), GuessingGame::ADMISSION_PRICE).await?;
    let bob_before = bob.balance().await;
    let alice_before = alice.balance().await;

    let receipt = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;

    let escrow = GuessingGame::ADMISSION_PRICE * U256::from(3);
    let reward = escrow * uint!(80_U256) / uint!(100_U256);
    assert!(receipt.emits(CorrectGuess {
        number: INITIAL_SECRET_NUMBER,
        reward,
    }));
    assert_eq!(
        bob.balance().await,
        bob_before - GuessingGame::ADMISSION_PRICE + reward
    );
    assert_eq!(alice.balance().await, alice_before);
    assert_eq!(game.balance().await, escrow - reward);
    Ok(())
}

#[tokio::test]
async fn pays_the_token_reward_to_the_winner() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    let receipt = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;

    let token = game.token();
    assert!(receipt.emits(Transfer {
        from: game.address(),
        to: bob.address(),
        value: GuessingGame::TOKEN_REWARD_AMOUNT,
    }));
    assert_eq!(
        token.balance_of(bob.address()).await?,
        GuessingGame::TOKEN_REWARD_AMOUNT
    );
    assert_eq!(
        token.balance_of(game.address()).await?,
        GuessingToken::INITIAL_SUPPLY - GuessingGame::TOKEN_REWARD_AMOUNT
    );
    Ok(())
}

#[tokio::test]
async fn supports_successive_winners() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    for _ in 0..3 {
        let receipt = game
            .connect(&bob)
            .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
            .await?;
        assert!(receipt.emits(Transfer {
            from: game.address(),
            to: bob.address(),
            value: GuessingGame::TOKEN_REWARD_AMOUNT,
        }));
    }

    // Each win retained 20% of its pot: 0.0002, then 0.00024, then
    // 0.000248 ether.
    assert_eq!(game.balance().await, uint!(248_000_000_000_000_U256));
    assert_eq!(
        bob.balance().await,
        DEFAULT_FUNDING - uint!(248_000_000_000_000_U256)
    );
    assert_eq!(
        game.token().balance_of(bob.address()).await?,
        GuessingGame::TOKEN_REWARD_AMOUNT * U256::from(3)
    );
    Ok(())
}

#[tokio::test]
async fn keeps_escrow_in_play_after_rotation() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;

    game.connect(&bob)
        .guess(uint!(1234_U256), GuessingGame::ADMISSION_PRICE)
        .await?;
    game.set_secret_number_hash(commitment::commit(NEW_SECRET_NUMBER)).await?;

    // The old number stopped winning when the commitment rotated.
    let receipt = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;
    assert!(receipt.emits(IncorrectGuess { number: INITIAL_SECRET_NUMBER }));

    // The winner is paid from the escrow banked before the rotation too.
    let receipt = game
        .connect(&bob)
        .guess(NEW_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;
    assert!(receipt.emits(CorrectGuess {
        number: NEW_SECRET_NUMBER,
        reward: uint!(2_400_000_000_000_000_U256),
    }));
    assert_eq!(game.balance().await, uint!(600_000_000_000_000_U256));
    Ok(())
}

#[tokio::test]
async fn floors_fractional_payouts() -> eyre::Result<()> {
    let Infrastructure { alice, bob, game, .. } = Infrastructure::new().await?;

    // Seven stray wei donated to the game make 80% of the pot fractional.
    alice.send_value(game.address(), U256::from(7)).await?;

    let receipt = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;

    assert!(receipt.emits(CorrectGuess {
        number: INITIAL_SECRET_NUMBER,
        reward: uint!(800_000_000_000_005_U256),
    }));
    assert_eq!(game.balance().await, uint!(200_000_000_000_002_U256));
    Ok(())
}

#[tokio::test]
async fn settles_racing_winners_one_at_a_time() -> eyre::Result<()> {
    let Infrastructure { devnet, game, .. } = Infrastructure::new().await?;

    let mut tasks = Vec::new();
    for _ in 0..4 {
        let player = devnet.create_account().await;
        let game = game.connect(&player);
        tasks.push(tokio::spawn(async move {
            game.guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
                .await
        }));
    }
    for handle in futures::future::join_all(tasks).await {
        handle?.expect("every racer should win in turn");
    }

    // Four settlements, each paying out 80% of its own pot and a fixed
    // token reward.
    assert_eq!(game.balance().await, uint!(249_600_000_000_000_U256));
    assert_eq!(
        game.token().balance_of(game.address()).await?,
        GuessingToken::INITIAL_SUPPLY
            - GuessingGame::TOKEN_REWARD_AMOUNT * U256::from(4)
    );
    Ok(())
}

#[tokio::test]
async fn hands_the_game_to_a_new_owner() -> eyre::Result<()> {
    let Infrastructure { alice, bob, game, .. } = Infrastructure::new().await?;

    let receipt = game.transfer_ownership(bob.address()).await?;
    assert!(receipt.emits(OwnershipTransferred {
        previous_owner: alice.address(),
        new_owner: bob.address(),
    }));
    assert_eq!(game.owner().await?, bob.address());

    let err = game
        .set_secret_number_hash(commitment::commit(NEW_SECRET_NUMBER))
        .await
        .expect_err("should revert");
    assert!(err.reverted_with(OwnableUnauthorizedAccount {
        account: alice.address(),
    }));

    game.connect(&bob)
        .set_secret_number_hash(commitment::commit(NEW_SECRET_NUMBER))
        .await?;
    Ok(())
}

#[tokio::test]
async fn renouncing_freezes_the_commitment() -> eyre::Result<()> {
    let Infrastructure { alice, bob, game, .. } = Infrastructure::new().await?;

    game.renounce_ownership().await?;
    assert_eq!(game.owner().await?, Address::ZERO);

    let err = game
        .set_secret_number_hash(commitment::commit(NEW_SECRET_NUMBER))
        .await
        .expect_err("should revert");
    assert!(err.reverted_with(OwnableUnauthorizedAccount {
        account: alice.address(),
    }));

    // The frozen game still takes guesses.
    let receipt = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await?;
    assert!(receipt.emits(CorrectGuess {
        number: INITIAL_SECRET_NUMBER,
        reward: uint!(800_000_000_000_000_U256),
    }));
    Ok(())
}

#[tokio::test]
async fn fails_closed_when_the_reward_pool_runs_dry() -> eyre::Result<()> {
    let Infrastructure { bob, game, .. } = Infrastructure::new().await?;
    let token = game.token();

    // The initial supply covers exactly 1000 rewards.
    for _ in 0..1000 {
        game.connect(&bob)
            .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
            .await?;
    }
    assert_eq!(token.balance_of(game.address()).await?, U256::ZERO);
    assert_eq!(
        token.balance_of(bob.address()).await?,
        GuessingToken::INITIAL_SUPPLY
    );

    let bob_before = bob.balance().await;
    let game_before = game.balance().await;

    let err = game
        .connect(&bob)
        .guess(INITIAL_SECRET_NUMBER, GuessingGame::ADMISSION_PRICE)
        .await
        .expect_err("should revert");

    assert!(err.reverted_with(TokenRewardFailed { token: token.address() }));
    assert_eq!(bob.balance().await, bob_before);
    assert_eq!(game.balance().await, game_before);
    Ok(())
}
