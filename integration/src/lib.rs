//! End-to-end suites for the guessing game, run against the in-process
//! devnet.
#![cfg(test)]

mod guessing_game;
mod guessing_token;
mod infrastructure;
