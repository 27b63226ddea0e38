use anchor_lang::prelude::*;

use crate::events::PlayerRegistered;
use crate::instructions::Ctx;

pub fn process_register_player(ctx: &mut Ctx) -> Result<()> {
    let players = &mut ctx.lottery.state.players;
    players.register(ctx.signer, ctx.clock.slot)?;

    msg!("Player registered: {}", ctx.signer);
    emit!(PlayerRegistered {
        player: ctx.signer,
        total_players: players.len(),
    });

    Ok(())
}
