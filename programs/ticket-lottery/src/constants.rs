/// Default price of a single ticket, in lamports (0.01 SOL).
pub const DEFAULT_TICKET_PRICE: u64 = 10_000_000;

/// Slots a round stays open for entries before it can be closed.
pub const BLOCKS_TO_WAIT_FOR_CLOSE: u64 = 4;

/// Slots that must pass between closing a round and drawing it.
pub const BLOCKS_TO_WAIT_FOR_DRAW: u64 = 1;

/// Share of the prize pool paid to the single mini winner.
pub const MINI_PRIZE_PERCENT: u8 = 10;

/// Share of the prize pool split between small-tier winners.
pub const SMALL_PRIZE_PERCENT: u8 = 20;

/// Share of the prize pool kept by the operator.
pub const COMMISSION_PERCENT: u8 = 10;

/// Number of regular numbers on a ticket.
pub const NUMBERS_PER_TICKET: usize = 6;

/// Highest regular number a player can pick.
pub const MAX_NUMBER: u8 = 37;

/// Highest strong number a player can pick.
pub const MAX_STRONG_NUMBER: u8 = 7;

/// The first round opened when the lottery is initialized.
pub const FIRST_ROUND: u64 = 1;
