use anchor_lang::prelude::*;

#[error_code]
pub enum LotteryError {
    // Registration errors
    #[msg("Not a registered player")]
    NotRegistered,
    #[msg("Registration failed: player already registered")]
    AlreadyRegistered,

    // Ticket errors
    #[msg("Insufficient payment for ticket")]
    InsufficientPayment,
    #[msg("Ticket not found")]
    TicketNotFound,
    #[msg("Caller does not own this ticket")]
    NotOwner,
    #[msg("Ticket is not active")]
    InvalidStatus,
    #[msg("Numbers must be six distinct values in 1..=37 and a strong number in 1..=7")]
    InvalidNumbers,

    // Round lifecycle errors
    #[msg("Lottery round is not open")]
    RoundNotOpen,
    #[msg("Lottery round is not closed")]
    RoundNotClosed,
    #[msg("Draw window has not been reached yet")]
    DrawNotReady,
    #[msg("Revealed numbers do not match the round commitment")]
    RevealMismatch,

    // Authority errors
    #[msg("Only the contract owner can call this function")]
    Unauthorized,
    #[msg("Ticket price must be greater than zero")]
    InvalidTicketPrice,
    #[msg("Invalid lottery configuration")]
    InvalidConfig,

    // Vault errors
    #[msg("No prize to claim")]
    NothingToClaim,
    #[msg("Prize transfer failed")]
    TransferFailed,
    #[msg("Refund failed")]
    RefundFailed,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Snapshot could not be decoded")]
    InvalidSnapshot,
}
