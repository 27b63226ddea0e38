pub mod admin;
pub mod buy_ticket;
pub mod claim_prize;
pub mod close_round;
pub mod draw_winner;
pub mod register;
pub mod select_ticket;

pub use admin::*;
pub use buy_ticket::*;
pub use claim_prize::*;
pub use close_round::*;
pub use draw_winner::*;
pub use register::*;
pub use select_ticket::*;

use anchor_lang::prelude::*;

use crate::TicketLottery;

/// Everything an instruction handler sees: the lottery it mutates, the
/// address that signed the call and the clock at execution.
pub struct Ctx<'a> {
    pub lottery: &'a mut TicketLottery,
    pub signer: Pubkey,
    pub clock: Clock,
}
