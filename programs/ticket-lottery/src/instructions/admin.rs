use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::events::{RoundOpened, TicketPriceUpdated};
use crate::instructions::Ctx;
use crate::state::{LotteryConfig, LotteryState};

/// Creates the lottery state with round 1 open at `slot`.
///
/// # Arguments
/// * `authority` - Operator address; receives commission
/// * `config` - Ticket price, round timing and prize split
/// * `reveal_commitment` - Commitment to round 1's winning picks
/// * `slot` - Slot the first round opens at
pub fn process_initialize_config(
    authority: Pubkey,
    config: LotteryConfig,
    reveal_commitment: [u8; 32],
    slot: u64,
) -> Result<LotteryState> {
    config.validate()?;

    let state = LotteryState::new(authority, config, reveal_commitment, slot);
    msg!(
        "Lottery initialized: ticket price {} lamports, round {} open",
        state.config.ticket_price,
        state.rounds.current_number()
    );
    emit!(RoundOpened {
        round_number: state.rounds.current_number(),
        opened_at: slot,
    });

    Ok(state)
}

/// Changes the ticket price for future purchases. Operator only.
///
/// Tickets already sold keep the price they were bought at.
pub fn process_set_ticket_price(ctx: &mut Ctx, new_price: u64) -> Result<()> {
    let state = &mut ctx.lottery.state;
    require_keys_eq!(ctx.signer, state.authority, LotteryError::Unauthorized);
    require!(new_price > 0, LotteryError::InvalidTicketPrice);

    let old_price = state.config.ticket_price;
    state.config.ticket_price = new_price;

    msg!("Ticket price: {} -> {}", old_price, new_price);
    emit!(TicketPriceUpdated {
        old_price,
        new_price,
    });

    Ok(())
}
