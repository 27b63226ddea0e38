//! Tier matching for a closed round.
//!
//! `draw` is a pure function of the round record, the tickets entered into it
//! and the operator's two reveal hashes. It moves no value; the draw
//! instruction credits the vault from its output.

use anchor_lang::prelude::*;
use solana_program::hash::hashv;

use crate::error::LotteryError;
use crate::state::{LotteryConfig, Round, Ticket, TicketStatus};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Owners of a ticket whose strong commit hash matched, deduplicated.
    pub big_winners: Vec<Pubkey>,

    /// Owners of a ticket whose commit hash matched, excluding big winners.
    pub small_winners: Vec<Pubkey>,

    /// Fallback winner picked from participants who matched nothing.
    pub mini_winner: Option<Pubkey>,

    /// Amount credited to each big winner.
    pub big_share: u64,

    /// Amount credited to each small winner.
    pub small_share: u64,

    pub big_prize: u64,
    pub small_prize: u64,
    pub mini_prize: u64,
    pub commission: u64,
}

impl DrawOutcome {
    pub fn total(&self) -> u64 {
        self.big_prize
            .saturating_add(self.small_prize)
            .saturating_add(self.mini_prize)
            .saturating_add(self.commission)
    }
}

/// Sorts the round's entries into prize tiers and splits the pool.
///
/// Tier totals are `pct * pool / 100`. A tier with `n` winners pays each
/// `total / n`; the remainder, and the whole share of a tier nobody won,
/// goes to commission. An empty round yields an all-zero outcome.
pub fn draw(
    round: &Round,
    tickets: &[Ticket],
    reveal_hash: &[u8; 32],
    reveal_strong_hash: &[u8; 32],
    config: &LotteryConfig,
) -> Result<DrawOutcome> {
    let entries: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Selected && t.round_number == round.number)
        .collect();

    let mut big_winners: Vec<Pubkey> = Vec::new();
    for ticket in &entries {
        if ticket.strong_commit_hash.as_ref() == Some(reveal_strong_hash)
            && !big_winners.contains(&ticket.owner)
        {
            big_winners.push(ticket.owner);
        }
    }

    let mut small_winners: Vec<Pubkey> = Vec::new();
    for ticket in &entries {
        if ticket.commit_hash.as_ref() == Some(reveal_hash)
            && !big_winners.contains(&ticket.owner)
            && !small_winners.contains(&ticket.owner)
        {
            small_winners.push(ticket.owner);
        }
    }

    let leftover: Vec<Pubkey> = round
        .participants
        .iter()
        .filter(|p| !big_winners.contains(p) && !small_winners.contains(p))
        .copied()
        .collect();

    let mini_winner = if leftover.is_empty() {
        None
    } else {
        let index = mini_winner_index(
            round.number,
            &entries,
            reveal_hash,
            reveal_strong_hash,
            leftover.len(),
        );
        Some(leftover[index])
    };

    let pool = round.prize_pool;
    let (big_share, big_prize) = split(pool, config.big_pct(), big_winners.len())?;
    let (small_share, small_prize) = split(pool, config.small_pct, small_winners.len())?;
    let (_, mini_prize) = split(pool, config.mini_pct, usize::from(mini_winner.is_some()))?;

    let commission = pool
        .checked_sub(big_prize)
        .and_then(|rest| rest.checked_sub(small_prize))
        .and_then(|rest| rest.checked_sub(mini_prize))
        .ok_or(LotteryError::MathOverflow)?;

    Ok(DrawOutcome {
        big_winners,
        small_winners,
        mini_winner,
        big_share,
        small_share,
        big_prize,
        small_prize,
        mini_prize,
        commission,
    })
}

/// Returns `(share per winner, total credited)` for one tier.
fn split(pool: u64, pct: u8, winners: usize) -> Result<(u64, u64)> {
    if winners == 0 || pool == 0 {
        return Ok((0, 0));
    }
    let tier_total = u128::from(pool) * u128::from(pct) / 100;
    let winners = winners as u128;
    let share = tier_total / winners;
    let credited = u64::try_from(share * winners).map_err(|_| LotteryError::MathOverflow)?;
    let share = u64::try_from(share).map_err(|_| LotteryError::MathOverflow)?;
    Ok((share, credited))
}

/// Picks the mini winner's position in the leftover list.
///
/// The seed binds the reveal hashes to the round number and to every strong
/// commit entered before the round closed, so it can be recomputed from the
/// stored round and tickets. The reveal hashes come from picks committed
/// before the round opened, so nothing in the seed is chosen after the
/// entries are known.
pub fn mini_winner_index(
    round_number: u64,
    entries: &[&Ticket],
    reveal_hash: &[u8; 32],
    reveal_strong_hash: &[u8; 32],
    leftover_len: usize,
) -> usize {
    let number = round_number.to_le_bytes();
    let mut parts: Vec<&[u8]> = Vec::with_capacity(entries.len() + 3);
    parts.push(reveal_hash);
    parts.push(reveal_strong_hash);
    parts.push(&number);
    for ticket in entries {
        if let Some(strong) = ticket.strong_commit_hash.as_ref() {
            parts.push(strong);
        }
    }

    let seed = hashv(&parts).to_bytes();
    let mut head = [0u8; 8];
    head.copy_from_slice(&seed[..8]);
    (u64::from_le_bytes(head) % leftover_len as u64) as usize
}
