use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::events::RoundClosed;
use crate::instructions::Ctx;

/// Stops entries into the current round ahead of the draw. Operator only.
pub fn process_close_round(ctx: &mut Ctx) -> Result<()> {
    let slot = ctx.clock.slot;
    let state = &mut ctx.lottery.state;
    require_keys_eq!(ctx.signer, state.authority, LotteryError::Unauthorized);

    state.rounds.close(slot)?;

    let round = state.rounds.current();
    msg!(
        "Round {} closed with {} tickets, pool {}",
        round.number,
        round.ticket_count,
        round.prize_pool
    );
    emit!(RoundClosed {
        round_number: round.number,
        closed_at: slot,
        prize_pool: round.prize_pool,
        auto: false,
    });

    Ok(())
}
