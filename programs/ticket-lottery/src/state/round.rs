use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::constants::FIRST_ROUND;
use crate::draw::DrawOutcome;
use crate::error::LotteryError;
use crate::picks::WinningPicks;

/// Round status moves strictly forward: Open -> Closed -> Finished.
///
/// `Unknown` is never stored; it marks the zeroed record returned for a
/// round number that was never opened.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundStatus {
    #[default]
    Unknown,
    Open,
    Closed,
    Finished,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    /// Sequential round number, starting at 1.
    pub number: u64,

    pub status: RoundStatus,

    /// Distinct addresses with at least one ticket entered, in entry order.
    pub participants: Vec<Pubkey>,

    /// Sum of the prices of every ticket entered into the round.
    pub prize_pool: u64,

    /// Number of tickets entered into the round.
    pub ticket_count: u64,

    pub big_winners: Vec<Pubkey>,
    pub small_winners: Vec<Pubkey>,
    pub mini_winners: Vec<Pubkey>,

    /// Amounts actually credited per tier. Each equals `share * winners`.
    pub big_prize: u64,
    pub small_prize: u64,
    pub mini_prize: u64,

    /// Operator cut, including remainders and the share of empty tiers.
    pub commission: u64,

    pub opened_at: u64,
    pub closed_at: Option<u64>,
    pub finished_at: Option<u64>,

    /// Operator's commitment to the winning picks, fixed when the round
    /// opens. The draw must reveal picks that hash to it.
    pub reveal_commitment: [u8; 32],

    /// Winning picks revealed at the draw, numbers sorted ascending.
    pub winning_numbers: Option<[u8; 6]>,
    pub strong_number: Option<u8>,

    /// Reveal hashes the round was drawn with.
    pub reveal_hash: Option<[u8; 32]>,
    pub reveal_strong_hash: Option<[u8; 32]>,
}

impl Round {
    pub fn open(number: u64, reveal_commitment: [u8; 32], slot: u64) -> Self {
        Self {
            number,
            status: RoundStatus::Open,
            opened_at: slot,
            reveal_commitment,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RoundStatus::Open
    }
}

/// Ticks remaining before a round can be closed and drawn.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockStatus {
    pub blocks_until_close: u64,
    pub blocks_until_draw: u64,
}

/// The round in progress plus every finished round.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RoundLedger {
    finished: BTreeMap<u64, Round>,
    current: Round,
}

impl RoundLedger {
    pub fn new(reveal_commitment: [u8; 32], slot: u64) -> Self {
        Self {
            finished: BTreeMap::new(),
            current: Round::open(FIRST_ROUND, reveal_commitment, slot),
        }
    }

    pub fn current_number(&self) -> u64 {
        self.current.number
    }

    pub fn current(&self) -> &Round {
        &self.current
    }

    pub fn get(&self, number: u64) -> Option<&Round> {
        if number == self.current.number {
            return Some(&self.current);
        }
        self.finished.get(&number)
    }

    pub fn close(&mut self, slot: u64) -> Result<()> {
        let round = &mut self.current;
        require!(round.is_open(), LotteryError::RoundNotOpen);
        round.status = RoundStatus::Closed;
        round.closed_at = Some(slot);
        Ok(())
    }

    /// Closes the current round if its entry window has elapsed.
    /// Returns whether the round was closed by this call.
    pub fn auto_close(&mut self, slot: u64, close_threshold: u64) -> bool {
        let round = &mut self.current;
        if round.is_open() && slot.saturating_sub(round.opened_at) >= close_threshold {
            round.status = RoundStatus::Closed;
            round.closed_at = Some(slot);
            return true;
        }
        false
    }

    /// Adds an entered ticket's price to the current round's pool.
    pub fn enter(&mut self, player: Pubkey, price: u64) -> Result<()> {
        let round = &mut self.current;
        require!(round.is_open(), LotteryError::RoundNotOpen);

        round.prize_pool = round
            .prize_pool
            .checked_add(price)
            .ok_or(LotteryError::MathOverflow)?;
        round.ticket_count = round
            .ticket_count
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;
        if !round.participants.contains(&player) {
            round.participants.push(player);
        }
        Ok(())
    }

    /// Checks the current round can be drawn at `slot`.
    pub fn ensure_drawable(&self, slot: u64, draw_delay: u64) -> Result<()> {
        let round = &self.current;
        require!(
            round.status == RoundStatus::Closed,
            LotteryError::RoundNotClosed
        );
        let closed_at = round.closed_at.ok_or(LotteryError::RoundNotClosed)?;
        require!(
            slot.saturating_sub(closed_at) >= draw_delay,
            LotteryError::DrawNotReady
        );
        Ok(())
    }

    /// Checks `picks` open the current round's commitment.
    pub fn verify_reveal(&self, picks: &WinningPicks) -> Result<()> {
        require!(
            picks.commitment()? == self.current.reveal_commitment,
            LotteryError::RevealMismatch
        );
        Ok(())
    }

    /// Records the draw on the current round, marks it finished and opens the
    /// next one at the same slot under `next_commitment`. Returns the new
    /// round number.
    pub fn finish(
        &mut self,
        outcome: &DrawOutcome,
        picks: &WinningPicks,
        next_commitment: [u8; 32],
        slot: u64,
    ) -> Result<u64> {
        let (reveal_hash, reveal_strong_hash) = picks.reveal_hashes()?;
        let winning_numbers = picks.sorted_numbers()?;
        let round = &mut self.current;
        require!(
            round.status == RoundStatus::Closed,
            LotteryError::RoundNotClosed
        );

        round.big_winners = outcome.big_winners.clone();
        round.small_winners = outcome.small_winners.clone();
        round.mini_winners = outcome.mini_winner.into_iter().collect();
        round.big_prize = outcome.big_prize;
        round.small_prize = outcome.small_prize;
        round.mini_prize = outcome.mini_prize;
        round.commission = outcome.commission;
        round.winning_numbers = Some(winning_numbers);
        round.strong_number = Some(picks.strong);
        round.reveal_hash = Some(reveal_hash);
        round.reveal_strong_hash = Some(reveal_strong_hash);
        round.finished_at = Some(slot);
        round.status = RoundStatus::Finished;

        let next = round
            .number
            .checked_add(1)
            .ok_or(LotteryError::MathOverflow)?;
        let done = std::mem::replace(
            &mut self.current,
            Round::open(next, next_commitment, slot),
        );
        self.finished.insert(done.number, done);
        Ok(next)
    }

    pub fn block_status(&self, slot: u64, close_threshold: u64, draw_delay: u64) -> BlockStatus {
        let round = &self.current;
        match round.status {
            RoundStatus::Open => {
                let until_close = round
                    .opened_at
                    .saturating_add(close_threshold)
                    .saturating_sub(slot);
                BlockStatus {
                    blocks_until_close: until_close,
                    blocks_until_draw: until_close.saturating_add(draw_delay),
                }
            }
            RoundStatus::Closed => {
                let closed_at = round.closed_at.unwrap_or(slot);
                BlockStatus {
                    blocks_until_close: 0,
                    blocks_until_draw: closed_at.saturating_add(draw_delay).saturating_sub(slot),
                }
            }
            RoundStatus::Finished | RoundStatus::Unknown => BlockStatus {
                blocks_until_close: 0,
                blocks_until_draw: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winning_picks() -> WinningPicks {
        WinningPicks {
            numbers: [3, 8, 15, 22, 29, 36],
            strong: 5,
            salt: [4; 32],
        }
    }

    #[test]
    fn starts_with_round_one_open() {
        let ledger = RoundLedger::new([0; 32], 10);
        assert_eq!(ledger.current_number(), 1);
        assert!(ledger.current().is_open());
        assert_eq!(ledger.current().opened_at, 10);
        assert!(ledger.get(2).is_none());
    }

    #[test]
    fn close_is_one_way() {
        let mut ledger = RoundLedger::new([0; 32], 0);
        ledger.close(3).unwrap();
        assert_eq!(ledger.current().status, RoundStatus::Closed);
        assert_eq!(ledger.current().closed_at, Some(3));
        assert!(ledger.close(4).is_err());
        assert_eq!(ledger.current().closed_at, Some(3));
    }

    #[test]
    fn auto_close_waits_for_threshold() {
        let mut ledger = RoundLedger::new([0; 32], 100);
        assert!(!ledger.auto_close(103, 4));
        assert!(ledger.current().is_open());
        assert!(ledger.auto_close(104, 4));
        assert_eq!(ledger.current().closed_at, Some(104));
        assert!(!ledger.auto_close(200, 4));
    }

    #[test]
    fn enter_tracks_pool_and_distinct_participants() {
        let mut ledger = RoundLedger::new([0; 32], 0);
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        ledger.enter(alice, 10).unwrap();
        ledger.enter(bob, 10).unwrap();
        ledger.enter(alice, 15).unwrap();

        let round = ledger.current();
        assert_eq!(round.prize_pool, 35);
        assert_eq!(round.ticket_count, 3);
        assert_eq!(round.participants, vec![alice, bob]);

        ledger.close(1).unwrap();
        assert!(ledger.enter(alice, 10).is_err());
    }

    #[test]
    fn draw_needs_a_gap_after_close() {
        let mut ledger = RoundLedger::new([0; 32], 0);
        assert!(ledger.ensure_drawable(10, 1).is_err());
        ledger.close(5).unwrap();
        assert!(ledger.ensure_drawable(5, 1).is_err());
        ledger.ensure_drawable(6, 1).unwrap();
    }

    #[test]
    fn reveal_must_open_the_commitment() {
        let picks = winning_picks();
        let ledger = RoundLedger::new(picks.commitment().unwrap(), 0);
        ledger.verify_reveal(&picks).unwrap();

        let resalted = WinningPicks {
            salt: [5; 32],
            ..picks
        };
        let other_numbers = WinningPicks {
            numbers: [1, 2, 3, 4, 5, 6],
            ..picks
        };
        assert!(ledger.verify_reveal(&resalted).is_err());
        assert!(ledger.verify_reveal(&other_numbers).is_err());
    }

    #[test]
    fn finish_records_picks_and_opens_next_round() {
        let picks = winning_picks();
        let mut ledger = RoundLedger::new(picks.commitment().unwrap(), 0);
        ledger.close(4).unwrap();
        let next = ledger
            .finish(&DrawOutcome::default(), &picks, [7; 32], 5)
            .unwrap();

        assert_eq!(next, 2);
        let finished = ledger.get(1).unwrap();
        assert_eq!(finished.status, RoundStatus::Finished);
        assert_eq!(finished.finished_at, Some(5));
        assert_eq!(finished.winning_numbers, Some(picks.numbers));
        assert_eq!(finished.strong_number, Some(5));
        let (_, strong_hash) = picks.reveal_hashes().unwrap();
        assert_eq!(finished.reveal_strong_hash, Some(strong_hash));

        let current = ledger.current();
        assert!(current.is_open());
        assert_eq!(current.opened_at, 5);
        assert_eq!(current.reveal_commitment, [7; 32]);
        assert_eq!(current.winning_numbers, None);
    }

    #[test]
    fn zeroed_round_is_not_open() {
        let round = Round::default();
        assert_eq!(round.status, RoundStatus::Unknown);
        assert!(!round.is_open());
    }

    #[test]
    fn block_status_counts_down() {
        let mut ledger = RoundLedger::new([0; 32], 10);
        assert_eq!(
            ledger.block_status(11, 4, 1),
            BlockStatus {
                blocks_until_close: 3,
                blocks_until_draw: 4
            }
        );
        ledger.close(14).unwrap();
        assert_eq!(
            ledger.block_status(14, 4, 1),
            BlockStatus {
                blocks_until_close: 0,
                blocks_until_draw: 1
            }
        );
        assert_eq!(ledger.block_status(20, 4, 1).blocks_until_draw, 0);
    }
}
