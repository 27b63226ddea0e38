//! Commit hashes for number picks.
//!
//! Players pick six distinct numbers and one strong number. Only the hashes
//! are ever handed to the lottery. The operator commits to the winning picks
//! before a round accepts entries and reveals them, with the salt, at the
//! draw; the reveal hashes are derived from the picks with the same function
//! players use.

use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::constants::{MAX_NUMBER, MAX_STRONG_NUMBER, NUMBERS_PER_TICKET};
use crate::error::LotteryError;

/// Returns `(commit_hash, strong_commit_hash)` for a set of picks.
///
/// Order of `numbers` does not matter; they are sorted before hashing.
pub fn ticket_hashes(
    numbers: [u8; NUMBERS_PER_TICKET],
    strong: u8,
) -> Result<([u8; 32], [u8; 32])> {
    let sorted = validated(numbers, strong)?;
    let commit = hashv(&[&sorted[..]]).to_bytes();
    let strong_commit = hashv(&[&sorted[..], &[strong][..]]).to_bytes();
    Ok((commit, strong_commit))
}

/// The operator's winning picks, revealed when a round is drawn.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinningPicks {
    pub numbers: [u8; NUMBERS_PER_TICKET],
    pub strong: u8,
    /// Keeps the commitment from being brute-forced over the pick space.
    pub salt: [u8; 32],
}

impl WinningPicks {
    /// Hash stored on a round before it opens. The draw only accepts picks
    /// that reproduce it.
    pub fn commitment(&self) -> Result<[u8; 32]> {
        let sorted = validated(self.numbers, self.strong)?;
        Ok(hashv(&[&sorted[..], &[self.strong][..], &self.salt[..]]).to_bytes())
    }

    /// `(reveal_hash, reveal_strong_hash)` matched against ticket commits.
    pub fn reveal_hashes(&self) -> Result<([u8; 32], [u8; 32])> {
        ticket_hashes(self.numbers, self.strong)
    }

    pub fn sorted_numbers(&self) -> Result<[u8; NUMBERS_PER_TICKET]> {
        validated(self.numbers, self.strong)
    }
}

fn validated(numbers: [u8; NUMBERS_PER_TICKET], strong: u8) -> Result<[u8; NUMBERS_PER_TICKET]> {
    let mut sorted = numbers;
    sorted.sort_unstable();

    require!(
        sorted.iter().all(|n| (1..=MAX_NUMBER).contains(n)),
        LotteryError::InvalidNumbers
    );
    require!(
        sorted.windows(2).all(|pair| pair[0] != pair[1]),
        LotteryError::InvalidNumbers
    );
    require!(
        (1..=MAX_STRONG_NUMBER).contains(&strong),
        LotteryError::InvalidNumbers
    );
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_does_not_matter() {
        let a = ticket_hashes([1, 2, 3, 4, 5, 6], 7).unwrap();
        let b = ticket_hashes([6, 5, 4, 3, 2, 1], 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn strong_number_only_changes_strong_hash() {
        let (commit_a, strong_a) = ticket_hashes([3, 9, 14, 21, 30, 37], 1).unwrap();
        let (commit_b, strong_b) = ticket_hashes([3, 9, 14, 21, 30, 37], 2).unwrap();
        assert_eq!(commit_a, commit_b);
        assert_ne!(strong_a, strong_b);
        assert_ne!(commit_a, strong_a);
    }

    #[test]
    fn rejects_out_of_range_or_repeated_picks() {
        assert!(ticket_hashes([0, 2, 3, 4, 5, 6], 1).is_err());
        assert!(ticket_hashes([1, 2, 3, 4, 5, 38], 1).is_err());
        assert!(ticket_hashes([1, 1, 3, 4, 5, 6], 1).is_err());
        assert!(ticket_hashes([1, 2, 3, 4, 5, 6], 0).is_err());
        assert!(ticket_hashes([1, 2, 3, 4, 5, 6], 8).is_err());
    }

    #[test]
    fn commitment_binds_picks_and_salt() {
        let picks = WinningPicks {
            numbers: [36, 3, 15, 8, 29, 22],
            strong: 5,
            salt: [9; 32],
        };
        let commitment = picks.commitment().unwrap();

        let reordered = WinningPicks {
            numbers: [3, 8, 15, 22, 29, 36],
            ..picks
        };
        assert_eq!(reordered.commitment().unwrap(), commitment);
        assert_eq!(reordered.sorted_numbers().unwrap(), [3, 8, 15, 22, 29, 36]);

        let other_salt = WinningPicks {
            salt: [10; 32],
            ..picks
        };
        let other_strong = WinningPicks { strong: 6, ..picks };
        assert_ne!(other_salt.commitment().unwrap(), commitment);
        assert_ne!(other_strong.commitment().unwrap(), commitment);

        assert_eq!(
            picks.reveal_hashes().unwrap(),
            ticket_hashes([3, 8, 15, 22, 29, 36], 5).unwrap()
        );
    }

    #[test]
    fn invalid_winning_picks_have_no_commitment() {
        let picks = WinningPicks {
            numbers: [1, 2, 3, 4, 5, 5],
            strong: 1,
            salt: [0; 32],
        };
        assert!(picks.commitment().is_err());
        assert!(picks.reveal_hashes().is_err());
    }
}
