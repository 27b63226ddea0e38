use anchor_lang::prelude::*;

use crate::draw::{draw, DrawOutcome};
use crate::error::LotteryError;
use crate::events::{RoundFinished, RoundOpened};
use crate::instructions::Ctx;
use crate::picks::WinningPicks;

/// Settles the closed round against the operator's winning picks.
///
/// This ensures that:
/// 1. Only the operator can draw.
/// 2. The round is closed and the draw gap after closing has passed.
/// 3. The picks and salt open the commitment stored when the round opened,
///    so the outcome was fixed before any ticket was entered.
/// 4. Every winner and the operator are credited in the vault; nothing is
///    paid out here.
/// 5. The round is finished and the next one opens in the same slot under
///    `next_commitment`.
///
/// # Arguments
/// * `ctx` - Instruction context
/// * `picks` - Winning numbers, strong number and commitment salt
/// * `next_commitment` - Commitment to the next round's winning picks
pub fn process_draw_winner(
    ctx: &mut Ctx,
    picks: WinningPicks,
    next_commitment: [u8; 32],
) -> Result<DrawOutcome> {
    let slot = ctx.clock.slot;
    let state = &mut ctx.lottery.state;
    require_keys_eq!(ctx.signer, state.authority, LotteryError::Unauthorized);

    state.rounds.ensure_drawable(slot, state.config.draw_delay)?;
    state.rounds.verify_reveal(&picks)?;
    let (reveal_hash, reveal_strong_hash) = picks.reveal_hashes()?;

    let round = state.rounds.current();
    let entries = state.tickets.selected_in_round(round.number);
    let outcome = draw(
        round,
        &entries,
        &reveal_hash,
        &reveal_strong_hash,
        &state.config,
    )?;

    for winner in &outcome.big_winners {
        state.vault.credit(*winner, outcome.big_share)?;
    }
    for winner in &outcome.small_winners {
        state.vault.credit(*winner, outcome.small_share)?;
    }
    if let Some(winner) = outcome.mini_winner {
        state.vault.credit(winner, outcome.mini_prize)?;
    }
    state.vault.credit(state.authority, outcome.commission)?;

    let round_number = state.rounds.current_number();
    let prize_pool = state.rounds.current().prize_pool;
    let next_round = state
        .rounds
        .finish(&outcome, &picks, next_commitment, slot)?;

    msg!(
        "Round {} drawn with {:?} + {}, pool {}",
        round_number,
        picks.numbers,
        picks.strong,
        prize_pool
    );
    msg!(
        "Big winners: {}, small winners: {}, mini winner: {:?}",
        outcome.big_winners.len(),
        outcome.small_winners.len(),
        outcome.mini_winner
    );
    msg!("Commission: {}", outcome.commission);

    emit!(RoundFinished {
        round_number,
        prize_pool,
        winning_numbers: picks.sorted_numbers()?,
        strong_number: picks.strong,
        big_winners: outcome.big_winners.clone(),
        small_winners: outcome.small_winners.clone(),
        mini_winners: outcome.mini_winner.into_iter().collect(),
        big_prize: outcome.big_prize,
        small_prize: outcome.small_prize,
        mini_prize: outcome.mini_prize,
        commission: outcome.commission,
    });
    emit!(RoundOpened {
        round_number: next_round,
        opened_at: slot,
    });

    Ok(outcome)
}
