//! End-to-end suite for the reward token deployed on its own.

use alloy_primitives::{uint, Address, U256};
use devnet::{Account, Devnet, GuessingTokenContract};
use guessing_game::token::{
    ERC20InsufficientBalance, ERC20InvalidReceiver, GuessingToken, Transfer,
};

async fn deploy() -> eyre::Result<(Devnet, Account, GuessingTokenContract)> {
    let devnet = Devnet::new();
    let alice = devnet.create_account().await;
    let token = alice.as_deployer().deploy_guessing_token().await?;
    Ok((devnet, alice, token))
}

#[tokio::test]
async fn reports_fixed_metadata() -> eyre::Result<()> {
    let (_devnet, _alice, token) = deploy().await?;

    assert_eq!(token.name().await?, "GuessingToken");
    assert_eq!(token.symbol().await?, "GUESS");
    assert_eq!(token.decimals().await?, 18);
    Ok(())
}

#[tokio::test]
async fn mints_the_full_supply_to_the_deployer() -> eyre::Result<()> {
    let (_devnet, alice, token) = deploy().await?;

    assert_eq!(token.total_supply().await?, GuessingToken::INITIAL_SUPPLY);
    assert_eq!(
        token.total_supply().await?.to_string(),
        "100000000000000000000000"
    );
    assert_eq!(
        token.balance_of(alice.address()).await?,
        GuessingToken::INITIAL_SUPPLY
    );
    Ok(())
}

#[tokio::test]
async fn transfers_between_accounts() -> eyre::Result<()> {
    let (devnet, alice, token) = deploy().await?;
    let bob = devnet.create_account().await;

    let value = uint!(50_000_000_000_000_000_000_U256);
    let receipt = token.transfer(bob.address(), value).await?;

    assert!(receipt.emits(Transfer {
        from: alice.address(),
        to: bob.address(),
        value,
    }));
    assert_eq!(token.balance_of(bob.address()).await?, value);
    assert_eq!(
        token.balance_of(alice.address()).await?,
        GuessingToken::INITIAL_SUPPLY - value
    );
    assert_eq!(token.total_supply().await?, GuessingToken::INITIAL_SUPPLY);
    Ok(())
}

#[tokio::test]
async fn rejects_transfers_beyond_balance() -> eyre::Result<()> {
    let (devnet, alice, token) = deploy().await?;
    let bob = devnet.create_account().await;

    let err = token
        .connect(&bob)
        .transfer(alice.address(), U256::from(1))
        .await
        .expect_err("should revert");

    assert!(err.reverted_with(ERC20InsufficientBalance {
        sender: bob.address(),
        balance: U256::ZERO,
        needed: U256::from(1),
    }));
    Ok(())
}

#[tokio::test]
async fn rejects_transfers_to_the_zero_address() -> eyre::Result<()> {
    let (_devnet, alice, token) = deploy().await?;

    let err = token
        .transfer(Address::ZERO, U256::from(1))
        .await
        .expect_err("should revert");

    assert!(err
        .reverted_with(ERC20InvalidReceiver { receiver: Address::ZERO }));
    assert_eq!(
        token.balance_of(alice.address()).await?,
        GuessingToken::INITIAL_SUPPLY
    );
    Ok(())
}
