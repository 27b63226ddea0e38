use anchor_lang::prelude::*;

use crate::TicketLottery;

/// Transfer lamports from the vault to a recipient.
///
/// Custody is debited before the recipient's wallet runs, so anything the
/// wallet does during the call already sees the lamports gone.
pub fn transfer_from_vault(lottery: &mut TicketLottery, to: &Pubkey, amount: u64) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    lottery.state.vault.withdraw(amount)?;

    // Detached while it runs; a nested transfer to the same address lands as
    // a plain credit.
    if let Some(mut wallet) = lottery.wallets.remove(to) {
        let received = wallet.receive(lottery, amount);
        lottery.wallets.insert(*to, wallet);
        received?;
    }
    Ok(())
}
