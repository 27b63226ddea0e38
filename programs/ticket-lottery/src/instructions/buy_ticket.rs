use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::events::{RoundClosed, TicketPurchased};
use crate::instructions::Ctx;
use crate::utils::transfer_from_vault;

/// Buys a lottery ticket for the caller.
///
/// Steps performed:
/// 1. Check the caller is registered and paid at least the ticket price.
/// 2. Take the payment into the vault.
/// 3. Issue an active ticket stamped with the current round.
/// 4. Refund any overpayment. A rejected refund fails the whole purchase.
/// 5. Close the round if its entry window has elapsed.
///
/// # Arguments
/// * `ctx` - Instruction context
/// * `paid` - Lamports sent with the purchase
pub fn process_buy_ticket(ctx: &mut Ctx, paid: u64) -> Result<u64> {
    let buyer = ctx.signer;
    let slot = ctx.clock.slot;
    let state = &mut ctx.lottery.state;
    let price = state.config.ticket_price;

    require!(
        state.players.is_registered(&buyer),
        LotteryError::NotRegistered
    );
    require!(paid >= price, LotteryError::InsufficientPayment);

    state.vault.deposit(paid)?;

    let round_number = state.rounds.current_number();
    let ticket_id = state
        .tickets
        .issue(&state.players, buyer, round_number, price, slot)?;
    state.total_revenue = state
        .total_revenue
        .checked_add(price)
        .ok_or(LotteryError::MathOverflow)?;

    let refund = paid - price;
    if refund > 0 {
        transfer_from_vault(ctx.lottery, &buyer, refund)
            .map_err(|_| LotteryError::RefundFailed)?;
    }

    msg!(
        "Ticket {} purchased by {} in round {}",
        ticket_id,
        buyer,
        round_number
    );
    emit!(TicketPurchased {
        ticket_id,
        buyer,
        round_number,
        price,
        refunded: refund,
    });

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

    Ok(ticket_id)
}
