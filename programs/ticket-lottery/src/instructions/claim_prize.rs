use anchor_lang::prelude::*;

use crate::error::LotteryError;
use crate::events::PrizeClaimed;
use crate::instructions::Ctx;
use crate::utils::transfer_from_vault;

/// Pays out everything the caller is owed.
///
/// Steps:
/// 1. Read and zero the caller's pending balance (fails if it is zero).
/// 2. Record the payout.
/// 3. Transfer the lamports. A rejected transfer fails the claim and the
///    pending balance is left as it was.
pub fn process_claim_prize(ctx: &mut Ctx) -> Result<u64> {
    let claimant = ctx.signer;
    let vault = &mut ctx.lottery.state.vault;

    let owed = vault.take_pending(&claimant)?;
    vault.record_payout(owed)?;

    msg!("Paying {} lamports to {}", owed, claimant);
    transfer_from_vault(ctx.lottery, &claimant, owed)
        .map_err(|_| LotteryError::TransferFailed)?;

    emit!(PrizeClaimed {
        player: claimant,
        amount: owed,
    });

    Ok(owed)
}
