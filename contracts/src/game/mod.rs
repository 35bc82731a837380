//! Number-guessing game contract.
//!
//! The game holds a keccak-256 commitment to a secret number, chosen by
//! the owner. Anyone may submit a guess by paying the exact admission
//! price, which joins the game's escrow whether or not the guess is right.
//! A correct guess wins 80% of the game's balance plus a fixed amount of
//! [`crate::token::GuessingToken`], paid atomically before the result is
//! announced.
//!
//! The secret number itself never appears in contract state. Only the
//! commitment is stored, so the answer cannot be read out of storage.
use alloy_primitives::{uint, Address, B256, U256};
use alloy_sol_types::SolError;
pub use sol::*;

use crate::{
    access::ownable::{
        self, Ownable, OwnableInvalidOwner, OwnableUnauthorizedAccount,
    },
    host::{self, Host},
    utils::commitment,
};

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Emitted when a guess matches the committed secret number.
        ///
        /// * `number` - The guessed number.
        /// * `reward` - Amount of native currency paid out to the winner.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event CorrectGuess(uint256 number, uint256 reward);

        /// Emitted when a guess does not match the committed secret number.
        ///
        /// * `number` - The guessed number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        event IncorrectGuess(uint256 number);
    }

    sol! {
        /// The value attached to a guess does not match the admission
        /// price. Too low and too high are both rejected.
        ///
        /// * `paid` - Value attached to the guess.
        /// * `expected` - The admission price.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error IncorrectAdmissionPrice(uint256 paid, uint256 expected);

        /// Paying the native reward out to the winner failed.
        ///
        /// * `to` - The winner owed the payout.
        /// * `amount` - Amount that could not be paid.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error PayoutFailed(address to, uint256 amount);

        /// Transferring the token reward to the winner failed.
        ///
        /// * `token` - Address of the reward token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error TokenRewardFailed(address token);
    }
}

/// An error that occurred in the [`GuessingGame`] contract.
#[derive(Debug)]
pub enum Error {
    /// The caller account is not authorized to perform an operation.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. `Address::ZERO`)
    InvalidOwner(OwnableInvalidOwner),
    /// The value attached to a guess does not match the admission price.
    IncorrectAdmissionPrice(IncorrectAdmissionPrice),
    /// Paying the native reward out to the winner failed.
    PayoutFailed(PayoutFailed),
    /// Transferring the token reward to the winner failed.
    TokenRewardFailed(TokenRewardFailed),
}

impl From<ownable::Error> for Error {
    fn from(value: ownable::Error) -> Self {
        match value {
            ownable::Error::UnauthorizedAccount(e) => {
                Error::UnauthorizedAccount(e)
            }
            ownable::Error::InvalidOwner(e) => Error::InvalidOwner(e),
        }
    }
}

impl From<Error> for Vec<u8> {
    fn from(error: Error) -> Self {
        match error {
            Error::UnauthorizedAccount(e) => e.abi_encode(),
            Error::InvalidOwner(e) => e.abi_encode(),
            Error::IncorrectAdmissionPrice(e) => e.abi_encode(),
            Error::PayoutFailed(e) => e.abi_encode(),
            Error::TokenRewardFailed(e) => e.abi_encode(),
        }
    }
}

/// State of a [`GuessingGame`] contract.
#[derive(Debug, Clone)]
pub struct GuessingGame {
    /// [`Ownable`] contract.
    // The instance stays public so composing contracts have access to its
    // internal functions.
    pub ownable: Ownable,
    /// Commitment to the current secret number.
    secret_number_hash: B256,
    /// Address of the reward token paid out to winners.
    guessing_token: Address,
}

impl GuessingGame {
    /// Exact native value that must accompany a guess: 0.001 ether.
    pub const ADMISSION_PRICE: U256 = uint!(1_000_000_000_000_000_U256);
    /// Share of the game's balance paid to a winner, in percent.
    pub const PAYOUT_PERCENT: U256 = uint!(80_U256);
    /// Amount of [`crate::token::GuessingToken`] paid for a correct guess:
    /// 100 whole tokens.
    pub const TOKEN_REWARD_AMOUNT: U256 =
        uint!(100_000_000_000_000_000_000_U256);

    /// Constructor.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `initial_owner` - The initial owner of this contract.
    /// * `secret_number_hash` - Commitment to the secret number, as
    ///   produced by [`commitment::commit`].
    /// * `guessing_token` - Address of the reward token.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidOwner`] - If `initial_owner` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn new(
        host: &mut impl Host,
        initial_owner: Address,
        secret_number_hash: B256,
        guessing_token: Address,
    ) -> Result<Self, Error> {
        let ownable = Ownable::new(host, initial_owner)?;
        Ok(Self { ownable, secret_number_hash, guessing_token })
    }

    /// Returns the commitment to the current secret number.
    #[must_use]
    pub fn secret_number_hash(&self) -> B256 {
        self.secret_number_hash
    }

    /// Returns the address of the reward token.
    #[must_use]
    pub fn guessing_token(&self) -> Address {
        self.guessing_token
    }

    /// Returns the address of the current owner.
    ///
    /// Re-export of [`Ownable::owner`].
    #[must_use]
    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// Replaces the commitment to the secret number. Can only be called by
    /// the current owner.
    ///
    /// The previous commitment is discarded. Escrow already held by the
    /// game stays in play for the new number.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `secret_number_hash` - Commitment to the new secret number.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any account other
    ///   than the owner.
    pub fn set_secret_number_hash(
        &mut self,
        host: &mut impl Host,
        secret_number_hash: B256,
    ) -> Result<(), Error> {
        self.ownable.only_owner(host)?;
        self.secret_number_hash = secret_number_hash;
        Ok(())
    }

    /// Submits a guess for the secret number.
    ///
    /// The message must carry exactly [`GuessingGame::ADMISSION_PRICE`] of
    /// native value. The fee joins the game's escrow whether the guess is
    /// right or wrong. A correct guess pays the winner
    /// [`GuessingGame::PAYOUT_PERCENT`] percent of the game's balance, fee
    /// included and rounded down, plus
    /// [`GuessingGame::TOKEN_REWARD_AMOUNT`] of the reward token. Both
    /// payouts must succeed for the guess to resolve.
    ///
    /// # Arguments
    ///
    /// * `host` - Access to the contract's execution environment.
    /// * `number` - The guessed number.
    ///
    /// # Errors
    ///
    /// * [`Error::IncorrectAdmissionPrice`] - If the attached value
    ///   differs from the admission price in either direction.
    /// * [`Error::PayoutFailed`] - If the native payout to the winner
    ///   fails.
    /// * [`Error::TokenRewardFailed`] - If the token reward transfer
    ///   fails.
    ///
    /// # Events
    ///
    /// * [`CorrectGuess`] or [`IncorrectGuess`].
    pub fn guess(
        &mut self,
        host: &mut impl Host,
        number: U256,
    ) -> Result<(), Error> {
        let paid = host.msg_value();
        if paid != Self::ADMISSION_PRICE {
            return Err(Error::IncorrectAdmissionPrice(
                IncorrectAdmissionPrice {
                    paid,
                    expected: Self::ADMISSION_PRICE,
                },
            ));
        }

        if !commitment::matches(self.secret_number_hash, number) {
            host::log(host, IncorrectGuess { number });
            return Ok(());
        }

        let winner = host.msg_sender();
        // The admission fee is already part of the balance here.
        let escrow = host.balance(host.contract_address());
        let reward = escrow * Self::PAYOUT_PERCENT / uint!(100_U256);

        host.transfer_eth(winner, reward).map_err(|_| {
            Error::PayoutFailed(PayoutFailed { to: winner, amount: reward })
        })?;
        host.erc20_transfer(
            self.guessing_token,
            winner,
            Self::TOKEN_REWARD_AMOUNT,
        )
        .map_err(|_| {
            Error::TokenRewardFailed(TokenRewardFailed {
                token: self.guessing_token,
            })
        })?;

        host::log(host, CorrectGuess { number, reward });
        Ok(())
    }

    /// Transfers ownership of the game to a new account (`new_owner`). Can
    /// only be called by the current owner.
    ///
    /// Re-export of [`Ownable::transfer_ownership`].
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any account other
    ///   than the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is `Address::ZERO`.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn transfer_ownership(
        &mut self,
        host: &mut impl Host,
        new_owner: Address,
    ) -> Result<(), Error> {
        self.ownable.transfer_ownership(host, new_owner)?;
        Ok(())
    }

    /// Leaves the game without owner, freezing the commitment forever.
    ///
    /// Re-export of [`Ownable::renounce_ownership`].
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`ownable::OwnershipTransferred`].
    pub fn renounce_ownership(
        &mut self,
        host: &mut impl Host,
    ) -> Result<(), Error> {
        self.ownable.renounce_ownership(host)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address};

    use super::*;
    use crate::test_utils::{MockHost, ALICE, BOB, GAME_ADDRESS, TOKEN_ADDRESS};

    const SECRET_NUMBER: U256 = uint!(42_U256);

    fn deploy(host: &mut MockHost) -> GuessingGame {
        GuessingGame::new(
            host,
            ALICE,
            commitment::commit(SECRET_NUMBER),
            TOKEN_ADDRESS,
        )
        .unwrap()
    }

    #[test]
    fn constructor() {
        let mut host = MockHost::new(ALICE);
        let game = deploy(&mut host);

        assert_eq!(game.owner(), ALICE);
        assert_eq!(
            game.secret_number_hash(),
            commitment::commit(SECRET_NUMBER)
        );
        assert_eq!(game.guessing_token(), TOKEN_ADDRESS);

        host.assert_emitted(&ownable::OwnershipTransferred {
            previous_owner: Address::ZERO,
            new_owner: ALICE,
        });
    }

    #[test]
    fn constructor_reverts_when_invalid_owner() {
        let mut host = MockHost::new(ALICE);
        let err = GuessingGame::new(
            &mut host,
            Address::ZERO,
            commitment::commit(SECRET_NUMBER),
            TOKEN_ADDRESS,
        )
        .expect_err("should revert");

        assert!(matches!(
            err,
            Error::InvalidOwner(OwnableInvalidOwner { owner })
                if owner.is_zero()
        ));
    }

    #[test]
    fn owner_updates_the_commitment() {
        let mut host = MockHost::new(ALICE);
        let mut game = deploy(&mut host);

        let new_hash = commitment::commit(U256::from(24));
        game.set_secret_number_hash(&mut host, new_hash)
            .expect("owner should update the commitment");

        assert_eq!(game.secret_number_hash(), new_hash);
    }

    #[test]
    fn prevents_non_owners_from_updating_the_commitment() {
        let mut host = MockHost::new(ALICE);
        let mut game = deploy(&mut host);
        let original_hash = game.secret_number_hash();

        host.set_sender(BOB);
        let err = game
            .set_secret_number_hash(
                &mut host,
                commitment::commit(U256::from(24)),
            )
            .expect_err("should revert");

        assert!(matches!(
            err,
            Error::UnauthorizedAccount(OwnableUnauthorizedAccount { account })
                if account == BOB
        ));
        assert_eq!(game.secret_number_hash(), original_hash);
    }

    #[test]
    fn rejects_guesses_with_no_value() {
        let mut host = MockHost::new(ALICE);
        let mut game = deploy(&mut host);

        let err =
            game.guess(&mut host, SECRET_NUMBER).expect_err("should revert");

        assert!(matches!(
            err,
            Error::IncorrectAdmissionPrice(IncorrectAdmissionPrice {
                paid,
                expected,
            }) if paid == U256::ZERO
                && expected == GuessingGame::ADMISSION_PRICE
        ));
    }

    #[test]
    fn rejects_overpaid_guesses() {
        let one_ether = uint!(1_000_000_000_000_000_000_U256);
        let mut host = MockHost::new(ALICE);
        let mut game = deploy(&mut host);

        host.set_msg_value(one_ether);
        let err =
            game.guess(&mut host, SECRET_NUMBER).expect_err("should revert");

        assert!(matches!(
            err,
            Error::IncorrectAdmissionPrice(IncorrectAdmissionPrice {
                paid,
                expected,
            }) if paid == one_ether
                && expected == GuessingGame::ADMISSION_PRICE
        ));
    }

    #[test]
    fn rejects_underpaid_guesses() {
        let underpayment = uint!(100_000_000_000_000_U256);
        let mut host = MockHost::new(ALICE);
        let mut game = deploy(&mut host);

        host.set_msg_value(underpayment);
        let err =
            game.guess(&mut host, SECRET_NUMBER).expect_err("should revert");

        assert!(matches!(
            err,
            Error::IncorrectAdmissionPrice(IncorrectAdmissionPrice {
                paid,
                ..
            }) if paid == underpayment
        ));
    }

    #[test]
    fn absorbs_the_fee_on_an_incorrect_guess() {
        let mut host = MockHost::new(ALICE);
        let mut game = deploy(&mut host);

        host.set_msg_value(GuessingGame::ADMISSION_PRICE);
        game.guess(&mut host, U256::from(24))
            .expect("incorrect guesses are not errors");

        host.assert_emitted(&IncorrectGuess { number: U256::from(24) });
        assert_eq!(
            host.balance(GAME_ADDRESS),
            GuessingGame::ADMISSION_PRICE
        );
        assert_eq!(host.balance(ALICE), U256::ZERO);
        assert!(host.erc20_transfers().is_empty());
    }

    #[test]
    fn pays_out_on_a_correct_guess() {
        let mut host = MockHost::new(BOB);
        let mut game = deploy(&mut host);

        // Four absorbed fees from earlier incorrect guesses.
        let prior_escrow = GuessingGame::ADMISSION_PRICE * U256::from(4);
        host.set_balance(GAME_ADDRESS, prior_escrow);

        host.set_msg_value(GuessingGame::ADMISSION_PRICE);
        game.guess(&mut host, SECRET_NUMBER).expect("should win");

        let escrow = prior_escrow + GuessingGame::ADMISSION_PRICE;
        let reward = escrow * uint!(80_U256) / uint!(100_U256);

        host.assert_emitted(&CorrectGuess { number: SECRET_NUMBER, reward });
        assert_eq!(host.balance(BOB), reward);
        assert_eq!(host.balance(GAME_ADDRESS), escrow - reward);
        assert_eq!(
            host.erc20_transfers(),
            [(TOKEN_ADDRESS, BOB, GuessingGame::TOKEN_REWARD_AMOUNT)]
        );
    }

    #[test]
    fn rounds_the_payout_down() {
        let mut host = MockHost::new(BOB);
        let mut game = deploy(&mut host);

        // Seven stray wei on top of the fee make 80% fractional.
        host.set_balance(GAME_ADDRESS, U256::from(7));
        host.set_msg_value(GuessingGame::ADMISSION_PRICE);
        game.guess(&mut host, SECRET_NUMBER).expect("should win");

        let reward = uint!(800_000_000_000_005_U256);
        host.assert_emitted(&CorrectGuess { number: SECRET_NUMBER, reward });
        assert_eq!(host.balance(BOB), reward);
        assert_eq!(
            host.balance(GAME_ADDRESS),
            uint!(200_000_000_000_002_U256)
        );
    }

    #[test]
    fn fails_closed_when_the_payout_fails() {
        let mut host = MockHost::new(BOB);
        let mut game = deploy(&mut host);

        host.set_msg_value(GuessingGame::ADMISSION_PRICE);
        host.fail_eth_transfers();
        let err =
            game.guess(&mut host, SECRET_NUMBER).expect_err("should revert");

        assert!(matches!(
            err,
            Error::PayoutFailed(PayoutFailed { to, .. }) if to == BOB
        ));
        assert!(host.erc20_transfers().is_empty());
    }

    #[test]
    fn fails_closed_when_the_token_reward_fails() {
        let mut host = MockHost::new(BOB);
        let mut game = deploy(&mut host);

        host.set_msg_value(GuessingGame::ADMISSION_PRICE);
        host.fail_erc20_transfers();
        let err =
            game.guess(&mut host, SECRET_NUMBER).expect_err("should revert");

        assert!(matches!(
            err,
            Error::TokenRewardFailed(TokenRewardFailed { token })
                if token == TOKEN_ADDRESS
        ));
    }

    #[test]
    fn transfers_game_ownership() {
        let mut host = MockHost::new(ALICE);
        let mut game = deploy(&mut host);

        game.transfer_ownership(&mut host, BOB)
            .expect("should transfer ownership");
        assert_eq!(game.owner(), BOB);

        host.set_sender(BOB);
        game.set_secret_number_hash(
            &mut host,
            commitment::commit(U256::from(24)),
        )
        .expect("new owner should update the commitment");
    }
}
