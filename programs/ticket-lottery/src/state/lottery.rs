use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::LotteryError;
use crate::state::{PlayerRegistry, PrizeVault, RoundLedger, TicketStore};

/// Operator-tunable parameters of the lottery.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LotteryConfig {
    /// Price (in lamports) of a single ticket.
    pub ticket_price: u64,

    /// Slots after opening at which a round closes itself on the next
    /// purchase or selection.
    pub close_threshold: u64,

    /// Slots that must pass between closing and drawing a round.
    pub draw_delay: u64,

    /// Percent of the pool for the mini tier.
    pub mini_pct: u8,

    /// Percent of the pool for the small tier.
    pub small_pct: u8,

    /// Percent of the pool kept by the operator.
    pub commission_pct: u8,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            ticket_price: DEFAULT_TICKET_PRICE,
            close_threshold: BLOCKS_TO_WAIT_FOR_CLOSE,
            draw_delay: BLOCKS_TO_WAIT_FOR_DRAW,
            mini_pct: MINI_PRIZE_PERCENT,
            small_pct: SMALL_PRIZE_PERCENT,
            commission_pct: COMMISSION_PERCENT,
        }
    }
}

impl LotteryConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.ticket_price > 0, LotteryError::InvalidTicketPrice);
        require!(self.close_threshold >= 1, LotteryError::InvalidConfig);
        require!(self.draw_delay >= 1, LotteryError::InvalidConfig);
        require!(
            u16::from(self.mini_pct) + u16::from(self.small_pct) + u16::from(self.commission_pct)
                <= 100,
            LotteryError::InvalidConfig
        );
        Ok(())
    }

    /// Percent of the pool for the big tier: whatever the other shares leave.
    pub fn big_pct(&self) -> u8 {
        100u8
            .saturating_sub(self.mini_pct)
            .saturating_sub(self.small_pct)
            .saturating_sub(self.commission_pct)
    }
}

/// Everything the lottery persists: the player set, the ticket table, the
/// round table and the pending-prize ledger, plus configuration and counters.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LotteryState {
    /// The operator. Receives commission and runs the operator-only
    /// instructions.
    pub authority: Pubkey,

    pub config: LotteryConfig,

    pub players: PlayerRegistry,

    pub tickets: TicketStore,

    pub rounds: RoundLedger,

    pub vault: PrizeVault,

    /// Ticket prices ever received, excluding refunded overpayment.
    pub total_revenue: u64,
}

impl LotteryState {
    pub fn new(
        authority: Pubkey,
        config: LotteryConfig,
        reveal_commitment: [u8; 32],
        slot: u64,
    ) -> Self {
        Self {
            authority,
            config,
            players: PlayerRegistry::default(),
            tickets: TicketStore::default(),
            rounds: RoundLedger::new(reveal_commitment, slot),
            vault: PrizeVault::default(),
            total_revenue: 0,
        }
    }

    /// Lamports held for tickets not yet entered into any round.
    pub fn unallocated_balance(&self) -> u64 {
        // the current round is never finished, its pool is still in custody
        self.vault
            .balance()
            .saturating_sub(self.vault.total_pending())
            .saturating_sub(self.rounds.current().prize_pool)
    }
}
