use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::events::{RoundClosed, TicketSelected};
use crate::instructions::Ctx;

/// One ticket to enter, with the player's two commit hashes.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicketEntry {
    pub ticket_id: u64,
    pub commit_hash: [u8; 32],
    pub strong_commit_hash: [u8; 32],
}

/// Enters one of the caller's tickets into the current round.
///
/// Returns `false` without entering the ticket when the round is not open,
/// including when this call is the one that closes it.
pub fn process_select_ticket(ctx: &mut Ctx, entry: TicketEntry) -> Result<bool> {
    close_if_elapsed(ctx);
    enter_ticket(ctx, &entry)
}

/// Enters several tickets at once. Each entry gets its own result; a hard
/// failure on any entry fails the whole batch.
pub fn process_select_tickets(ctx: &mut Ctx, entries: &[TicketEntry]) -> Result<Vec<bool>> {
    close_if_elapsed(ctx);
    entries.iter().map(|entry| enter_ticket(ctx, entry)).collect()
}

fn enter_ticket(ctx: &mut Ctx, entry: &TicketEntry) -> Result<bool> {
    let player = ctx.signer;
    let slot = ctx.clock.slot;
    let state = &mut ctx.lottery.state;

    require!(
        state.players.is_registered(&player),
        LotteryError::NotRegistered
    );

    let entered = state.tickets.select(
        entry.ticket_id,
        &player,
        entry.commit_hash,
        entry.strong_commit_hash,
        state.rounds.current(),
        slot,
    )?;

    let round_number = state.rounds.current_number();
    if entered {
        let price = state
            .tickets
            .get(entry.ticket_id)
            .map(|t| t.price)
            .ok_or(LotteryError::TicketNotFound)?;
        state.rounds.enter(player, price)?;
        msg!("Ticket {} entered into round {}", entry.ticket_id, round_number);
    } else {
        msg!(
            "Ticket {} not entered: round {} is not open",
            entry.ticket_id,
            round_number
        );
    }

    emit!(TicketSelected {
        ticket_id: entry.ticket_id,
        player,
        round_number,
        entered,
    });

    Ok(entered)
}

fn close_if_elapsed(ctx: &mut Ctx) {
    let slot = ctx.clock.slot;
    let close_threshold = ctx.lottery.state.config.close_threshold;
    let rounds = &mut ctx.lottery.state.rounds;

    if rounds.auto_close(slot, close_threshold) {
        msg!("Round {} closed: entry window elapsed", rounds.current_number());
        emit!(RoundClosed {
            round_number: rounds.current_number(),
            closed_at: slot,
            prize_pool: rounds.current().prize_pool,
            auto: true,
        });
    }
}
