use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::error::LotteryError;
use crate::state::player::PlayerRegistry;
use crate::state::round::{Round, RoundStatus};

/// Lifecycle of a ticket. A ticket moves from `Active` to `Selected`
/// exactly once and is immutable afterwards.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketStatus {
    Active,
    Selected,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Sequential identifier, starting at zero.
    pub id: u64,

    /// The only address allowed to enter this ticket into a round.
    pub owner: Pubkey,

    /// Round the ticket belongs to. Set to the current round at purchase and
    /// re-stamped with the round it is entered into on selection.
    pub round_number: u64,

    /// Lamports the ticket contributes to the prize pool once selected.
    pub price: u64,

    pub status: TicketStatus,

    /// Hash of the six regular numbers, set on selection.
    pub commit_hash: Option<[u8; 32]>,

    /// Hash of the six regular numbers plus the strong number, set on selection.
    pub strong_commit_hash: Option<[u8; 32]>,

    pub purchased_at: u64,

    pub selected_at: Option<u64>,
}

/// Owns every ticket ever issued, keyed by id.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketStore {
    tickets: BTreeMap<u64, Ticket>,
    by_owner: BTreeMap<Pubkey, Vec<u64>>,
    next_id: u64,
}

impl TicketStore {
    /// Issues a new `Active` ticket for a registered `owner`.
    pub fn issue(
        &mut self,
        registry: &PlayerRegistry,
        owner: Pubkey,
        current_round: u64,
        price: u64,
        slot: u64,
    ) -> Result<u64> {
        require!(registry.is_registered(&owner), LotteryError::NotRegistered);

        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(LotteryError::MathOverflow)?;

        self.tickets.insert(
            id,
            Ticket {
                id,
                owner,
                round_number: current_round,
                price,
                status: TicketStatus::Active,
                commit_hash: None,
                strong_commit_hash: None,
                purchased_at: slot,
                selected_at: None,
            },
        );
        self.by_owner.entry(owner).or_default().push(id);

        Ok(id)
    }

    /// Enters a ticket into `round` with the player's two commit hashes.
    ///
    /// Unknown ids, foreign callers and already selected tickets are hard
    /// failures. A round that is not open is a soft failure: nothing is
    /// touched and `Ok(false)` is returned so batch callers can continue.
    pub fn select(
        &mut self,
        ticket_id: u64,
        caller: &Pubkey,
        commit_hash: [u8; 32],
        strong_commit_hash: [u8; 32],
        round: &Round,
        slot: u64,
    ) -> Result<bool> {
        let ticket = self
            .tickets
            .get_mut(&ticket_id)
            .ok_or(LotteryError::TicketNotFound)?;

        require_keys_eq!(ticket.owner, *caller, LotteryError::NotOwner);
        require!(
            ticket.status == TicketStatus::Active,
            LotteryError::InvalidStatus
        );

        if round.status != RoundStatus::Open {
            return Ok(false);
        }

        ticket.status = TicketStatus::Selected;
        ticket.round_number = round.number;
        ticket.commit_hash = Some(commit_hash);
        ticket.strong_commit_hash = Some(strong_commit_hash);
        ticket.selected_at = Some(slot);

        Ok(true)
    }

    pub fn get(&self, ticket_id: u64) -> Option<&Ticket> {
        self.tickets.get(&ticket_id)
    }

    /// Every ticket of `owner`, in purchase order.
    pub fn tickets_of<'a>(&'a self, owner: &Pubkey) -> impl Iterator<Item = &'a Ticket> + 'a {
        self.by_owner
            .get(owner)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.tickets.get(id))
    }

    /// Ids of `owner`'s tickets still eligible for `round`: active and bought
    /// in that round or an earlier one.
    pub fn active_tickets_of(&self, owner: &Pubkey, round: u64) -> Vec<u64> {
        self.tickets_of(owner)
            .filter(|t| t.status == TicketStatus::Active && t.round_number <= round)
            .map(|t| t.id)
            .collect()
    }

    /// Selected tickets entered into `round`, in id order.
    pub fn selected_in_round(&self, round: u64) -> Vec<Ticket> {
        self.tickets
            .values()
            .filter(|t| t.status == TicketStatus::Selected && t.round_number == round)
            .cloned()
            .collect()
    }

    /// Total number of tickets ever issued.
    pub fn len(&self) -> u64 {
        self.next_id
    }

    pub fn is_empty(&self) -> bool {
        self.next_id == 0
    }
}
