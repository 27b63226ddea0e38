use anchor_lang::prelude::*;

#[event]
pub struct PlayerRegistered {
    pub player: Pubkey,
    pub total_players: u64,
}

#[event]
pub struct TicketPurchased {
    pub ticket_id: u64,
    pub buyer: Pubkey,
    pub round_number: u64,
    pub price: u64,
    pub refunded: u64,
}

#[event]
pub struct TicketSelected {
    pub ticket_id: u64,
    pub player: Pubkey,
    pub round_number: u64,
    pub entered: bool,
}

#[event]
pub struct RoundOpened {
    pub round_number: u64,
    pub opened_at: u64,
}

#[event]
pub struct RoundClosed {
    pub round_number: u64,
    pub closed_at: u64,
    pub prize_pool: u64,
    pub auto: bool,
}

#[event]
pub struct RoundFinished {
    pub round_number: u64,
    pub prize_pool: u64,
    pub winning_numbers: [u8; 6],
    pub strong_number: u8,
    pub big_winners: Vec<Pubkey>,
    pub small_winners: Vec<Pubkey>,
    pub mini_winners: Vec<Pubkey>,
    pub big_prize: u64,
    pub small_prize: u64,
    pub mini_prize: u64,
    pub commission: u64,
}

#[event]
pub struct PrizeClaimed {
    pub player: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TicketPriceUpdated {
    pub old_price: u64,
    pub new_price: u64,
}
