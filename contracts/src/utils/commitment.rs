//! Keccak-256 commitments over 256-bit numbers.
//!
//! The game never stores its secret number. It stores a commitment: the
//! keccak-256 digest of the number's 32-byte big-endian encoding. A guess
//! is checked by recomputing the digest and comparing it to the stored one.

use alloy_primitives::{keccak256, B256, U256};

/// Returns the commitment for `number`.
///
/// The commitment is the keccak-256 digest of the 32-byte big-endian
/// encoding of `number`, i.e. `keccak256(abi.encode(number))` in Solidity
/// terms.
#[must_use]
pub fn commit(number: U256) -> B256 {
    keccak256(number.to_be_bytes::<32>())
}

/// Checks whether `commitment` commits to `number`.
#[must_use]
pub fn matches(commitment: B256, number: U256) -> bool {
    commit(number) == commitment
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn commits_to_the_padded_big_endian_encoding() {
        let encoding = hex!(
            "000000000000000000000000000000000000000000000000000000000000002a"
        );
        assert_eq!(commit(U256::from(42)), keccak256(encoding));
    }

    #[test]
    fn zero_commits_to_the_all_zero_word() {
        assert_eq!(commit(U256::ZERO), keccak256([0u8; 32]));
    }

    #[test]
    fn max_value_commits_to_the_all_ones_word() {
        assert_eq!(commit(U256::MAX), keccak256([0xffu8; 32]));
    }

    proptest! {
        #[test]
        fn accepts_the_committed_number(bytes: [u8; 32]) {
            let number = U256::from_be_bytes(bytes);
            prop_assert!(matches(commit(number), number));
        }

        #[test]
        fn rejects_any_other_number(a: [u8; 32], b: [u8; 32]) {
            let a = U256::from_be_bytes(a);
            let b = U256::from_be_bytes(b);
            if a != b {
                prop_assert!(!matches(commit(a), b));
            }
        }
    }
}
