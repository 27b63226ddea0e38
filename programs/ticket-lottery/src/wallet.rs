use anchor_lang::prelude::*;

use crate::TicketLottery;

/// Receiving side of an address that runs code when lamports arrive.
///
/// Addresses without a wallet accept every transfer. A wallet gets mutable
/// access to the lottery while it is being paid and may call back into any
/// instruction. Returning an error rejects the transfer, which aborts the
/// instruction that sent it.
pub trait Wallet {
    fn receive(&mut self, lottery: &mut TicketLottery, amount: u64) -> Result<()>;
}
