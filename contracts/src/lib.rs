/*!
# Guessing Game Contracts

Contract logic for a number-guessing game and its fixed-supply reward
token. The game never stores its secret number: it stores a keccak-256
commitment, and checks guesses by recomputing the digest. Anyone may pay
the admission price to submit a guess; a correct guess wins 80% of the
game's escrow plus a fixed amount of [`token::GuessingToken`], paid
atomically before the result is announced.

Contracts here do not talk to a ledger directly. All ambient state and
side effects go through the [`host::Host`] trait, so the same logic runs
unchanged under the in-process devnet and under unit-test mocks.
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod access;
pub mod game;
pub mod host;
pub mod token;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
