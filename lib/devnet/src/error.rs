//! Errors surfaced by devnet transactions and queries.

use alloy_primitives::{hex, Address, U256};
use alloy_sol_types::SolError;

/// An error returned by a failed transaction or query.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// The contract reverted with an ABI-encoded payload.
    #[error("execution reverted: 0x{}", hex::encode(.0))]
    Revert(Vec<u8>),
    /// The sending account cannot cover the value its transaction attaches.
    #[error("{account} holds {balance} wei but the transaction moves {needed}")]
    InsufficientFunds {
        /// Account paying for the transaction.
        account: Address,
        /// The account's balance.
        balance: U256,
        /// Value the transaction tried to move.
        needed: U256,
    },
    /// No contract of the expected kind is deployed at the address.
    #[error("no contract deployed at {0}")]
    UnknownContract(Address),
}

impl CallError {
    /// Checks that `Self` is a revert carrying the typed abi-encoded error
    /// `expected`.
    #[must_use]
    pub fn reverted_with<E: SolError>(&self, expected: E) -> bool {
        match self {
            CallError::Revert(data) => *data == expected.abi_encode(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{uint, Address, U256};
    use alloy_sol_types::SolError;
    use guessing_game::game::{IncorrectAdmissionPrice, PayoutFailed};

    use super::CallError;

    #[test]
    fn matches_the_encoded_revert_payload() {
        let expected = IncorrectAdmissionPrice {
            paid: U256::ZERO,
            expected: uint!(1_000_000_000_000_000_U256),
        };
        let err = CallError::Revert(expected.abi_encode());

        assert!(err.reverted_with(expected));
    }

    #[test]
    fn rejects_a_different_error() {
        let err = CallError::Revert(
            IncorrectAdmissionPrice {
                paid: U256::ZERO,
                expected: uint!(1_000_000_000_000_000_U256),
            }
            .abi_encode(),
        );

        assert!(!err.reverted_with(IncorrectAdmissionPrice {
            paid: U256::from(1),
            expected: uint!(1_000_000_000_000_000_U256),
        }));
        assert!(!err.reverted_with(PayoutFailed {
            to: Address::ZERO,
            amount: U256::ZERO,
        }));
    }

    #[test]
    fn only_reverts_carry_a_payload() {
        let err = CallError::UnknownContract(Address::ZERO);

        assert!(!err.reverted_with(IncorrectAdmissionPrice {
            paid: U256::ZERO,
            expected: U256::ZERO,
        }));
    }
}
