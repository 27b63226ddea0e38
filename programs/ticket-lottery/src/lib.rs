//! Ticket Lottery — hash-committed lottery rounds with tiered prizes.
//!
//! Players register, buy tickets and enter them into the open round with two
//! commit hashes (their six numbers, and their six numbers plus a strong
//! number). Each round opens with the operator's commitment to the winning
//! picks; the operator closes the round and draws it by revealing those
//! picks. Matching tickets split the big and small tiers, a mini
//! winner is picked among everyone else, and all prizes are credited to a
//! pull-payment vault that winners claim from.
//!
//! Every instruction runs to completion or not at all: a failing handler
//! leaves the ledger exactly as it found it.

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use std::collections::BTreeMap;

pub mod constants;
pub mod draw;
pub mod error;
pub mod events;
pub mod instructions;
pub mod picks;
pub mod state;
pub mod utils;
pub mod wallet;

use error::LotteryError;
use instructions::*;
use state::*;
use wallet::Wallet;

pub use draw::DrawOutcome;
pub use instructions::TicketEntry;
pub use picks::WinningPicks;

declare_id!("8KYcJuzDe9pJqeCB55bvywRpyQpA33VsbZxqdrNH6owy");

/// The lottery program: ledger state plus the wallets that react to payouts.
pub struct TicketLottery {
    pub(crate) state: LotteryState,
    pub(crate) wallets: BTreeMap<Pubkey, Box<dyn Wallet>>,
}

impl TicketLottery {
    /// Starts the lottery with round 1 open at `slot`. `reveal_commitment`
    /// is `WinningPicks::commitment` of round 1's winning picks.
    pub fn initialize(
        authority: Pubkey,
        config: LotteryConfig,
        reveal_commitment: [u8; 32],
        slot: u64,
    ) -> Result<Self> {
        let state = process_initialize_config(authority, config, reveal_commitment, slot)?;
        Ok(Self {
            state,
            wallets: BTreeMap::new(),
        })
    }

    pub fn register_player(&mut self, signer: Pubkey, slot: u64) -> Result<()> {
        self.execute(signer, slot, process_register_player)
    }

    pub fn purchase_ticket(&mut self, signer: Pubkey, slot: u64, paid: u64) -> Result<u64> {
        self.execute(signer, slot, |ctx| process_buy_ticket(ctx, paid))
    }

    pub fn select_for_lottery(
        &mut self,
        signer: Pubkey,
        slot: u64,
        ticket_id: u64,
        commit_hash: [u8; 32],
        strong_commit_hash: [u8; 32],
    ) -> Result<bool> {
        let entry = TicketEntry {
            ticket_id,
            commit_hash,
            strong_commit_hash,
        };
        self.execute(signer, slot, |ctx| process_select_ticket(ctx, entry))
    }

    pub fn select_tickets_for_lottery(
        &mut self,
        signer: Pubkey,
        slot: u64,
        entries: &[TicketEntry],
    ) -> Result<Vec<bool>> {
        self.execute(signer, slot, |ctx| process_select_tickets(ctx, entries))
    }

    pub fn close_round(&mut self, signer: Pubkey, slot: u64) -> Result<()> {
        self.execute(signer, slot, process_close_round)
    }

    pub fn draw_winner(
        &mut self,
        signer: Pubkey,
        slot: u64,
        picks: WinningPicks,
        next_commitment: [u8; 32],
    ) -> Result<DrawOutcome> {
        self.execute(signer, slot, |ctx| {
            process_draw_winner(ctx, picks, next_commitment)
        })
    }

    pub fn claim_prize(&mut self, signer: Pubkey, slot: u64) -> Result<u64> {
        self.execute(signer, slot, process_claim_prize)
    }

    pub fn set_ticket_price(&mut self, signer: Pubkey, slot: u64, new_price: u64) -> Result<()> {
        self.execute(signer, slot, |ctx| process_set_ticket_price(ctx, new_price))
    }

    /// Runs one instruction against a checkpoint of the ledger. Any error
    /// restores the checkpoint, including changes made by nested calls.
    ///
    /// The checkpoint is a full clone, so each call costs time proportional
    /// to the ticket and round history.
    fn execute<T>(
        &mut self,
        signer: Pubkey,
        slot: u64,
        handler: impl FnOnce(&mut Ctx) -> Result<T>,
    ) -> Result<T> {
        let checkpoint = self.state.clone();
        let result = handler(&mut Ctx {
            lottery: self,
            signer,
            clock: Clock {
                slot,
                ..Clock::default()
            },
        });
        if let Err(err) = &result {
            msg!("Instruction failed, state rolled back: {}", err);
            self.state = checkpoint;
        }
        result
    }

    // ---------------------------------------------------------------------
    // Wallets
    // ---------------------------------------------------------------------

    /// Installs code that runs whenever lamports are sent to `address`.
    pub fn attach_wallet(&mut self, address: Pubkey, wallet: Box<dyn Wallet>) {
        self.wallets.insert(address, wallet);
    }

    pub fn detach_wallet(&mut self, address: &Pubkey) -> Option<Box<dyn Wallet>> {
        self.wallets.remove(address)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn state(&self) -> &LotteryState {
        &self.state
    }

    pub fn get_owner(&self) -> Pubkey {
        self.state.authority
    }

    pub fn get_ticket_price(&self) -> u64 {
        self.state.config.ticket_price
    }

    pub fn is_registered(&self, player: &Pubkey) -> bool {
        self.state.players.is_registered(player)
    }

    pub fn get_total_registered_players(&self) -> u64 {
        self.state.players.len()
    }

    pub fn get_all_registered_players(&self) -> Vec<Pubkey> {
        self.state.players.all().to_vec()
    }

    pub fn current_round_number(&self) -> u64 {
        self.state.rounds.current_number()
    }

    pub fn is_round_open(&self) -> bool {
        self.state.rounds.current().is_open()
    }

    pub fn get_block_status(&self, slot: u64) -> BlockStatus {
        let config = &self.state.config;
        self.state
            .rounds
            .block_status(slot, config.close_threshold, config.draw_delay)
    }

    /// The full round record. Rounds that never existed read as a zeroed
    /// record with status `Unknown`.
    pub fn get_round_info(&self, number: u64) -> Round {
        self.state.rounds.get(number).cloned().unwrap_or_default()
    }

    pub fn get_ticket(&self, ticket_id: u64) -> Option<Ticket> {
        self.state.tickets.get(ticket_id).cloned()
    }

    pub fn get_player_tickets(&self, player: &Pubkey) -> Vec<Ticket> {
        self.state.tickets.tickets_of(player).cloned().collect()
    }

    pub fn get_active_tickets(&self, player: &Pubkey) -> Vec<u64> {
        self.state
            .tickets
            .active_tickets_of(player, self.state.rounds.current_number())
    }

    pub fn get_total_tickets_sold(&self) -> u64 {
        self.state.tickets.len()
    }

    pub fn get_pending_prize(&self, player: &Pubkey) -> u64 {
        self.state.vault.pending(player)
    }

    /// Lamports in custody: pending prizes, the current pool and tickets not
    /// yet entered.
    pub fn get_contract_balance(&self) -> u64 {
        self.state.vault.balance()
    }

    pub fn get_unallocated_balance(&self) -> u64 {
        self.state.unallocated_balance()
    }

    pub fn get_total_paid_out(&self) -> u64 {
        self.state.vault.total_paid_out()
    }

    pub fn get_total_revenue(&self) -> u64 {
        self.state.total_revenue
    }

    // ---------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------

    /// Serializes the ledger (players, tickets, rounds, pending prizes).
    /// Wallets are runtime hooks and are not part of it.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        self.state
            .try_to_vec()
            .map_err(|_| error!(LotteryError::InvalidSnapshot))
    }

    pub fn restore(bytes: &[u8]) -> Result<Self> {
        let state =
            LotteryState::try_from_slice(bytes).map_err(|_| error!(LotteryError::InvalidSnapshot))?;
        state.config.validate()?;
        Ok(Self {
            state,
            wallets: BTreeMap::new(),
        })
    }
}
