#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anchor_lang::error::{Error, ERROR_CODE_OFFSET};
use anchor_lang::prelude::*;
use ticket_lottery::constants::DEFAULT_TICKET_PRICE;
use ticket_lottery::error::LotteryError;
use ticket_lottery::picks::ticket_hashes;
use ticket_lottery::state::LotteryConfig;
use ticket_lottery::wallet::Wallet;
use ticket_lottery::{TicketLottery, WinningPicks};

pub const PRICE: u64 = DEFAULT_TICKET_PRICE;

pub const WINNING_NUMBERS: [u8; 6] = [3, 8, 15, 22, 29, 36];
pub const WINNING_STRONG: u8 = 5;
pub const LOSING_NUMBERS: [u8; 6] = [1, 2, 4, 5, 6, 7];
pub const LOSING_STRONG: u8 = 1;
pub const SALT: [u8; 32] = [42; 32];

/// The picks every test round is committed to and drawn with.
pub fn winning_picks() -> WinningPicks {
    WinningPicks {
        numbers: WINNING_NUMBERS,
        strong: WINNING_STRONG,
        salt: SALT,
    }
}

pub fn commitment() -> [u8; 32] {
    winning_picks().commitment().unwrap()
}

/// Lottery with default config, round 1 opened at slot 0.
pub fn setup() -> (TicketLottery, Pubkey) {
    let operator = Pubkey::new_unique();
    let lottery =
        TicketLottery::initialize(operator, LotteryConfig::default(), commitment(), 0).unwrap();
    (lottery, operator)
}

pub fn register_players(lottery: &mut TicketLottery, count: usize) -> Vec<Pubkey> {
    (0..count)
        .map(|_| {
            let player = Pubkey::new_unique();
            lottery.register_player(player, 0).unwrap();
            player
        })
        .collect()
}


/// Buys one ticket at the exact price and enters it with the given picks.
pub fn buy_and_enter(
    lottery: &mut TicketLottery,
    player: Pubkey,
    slot: u64,
    numbers: [u8; 6],
    strong: u8,
) -> u64 {
    let price = lottery.get_ticket_price();
    let ticket_id = lottery.purchase_ticket(player, slot, price).unwrap();
    let (commit, strong_commit) = ticket_hashes(numbers, strong).unwrap();
    assert!(lottery
        .select_for_lottery(player, slot, ticket_id, commit, strong_commit)
        .unwrap());
    ticket_id
}

/// Closes the current round at `slot` and draws it one slot later with the
/// winning picks, committing the same picks for the next round.
pub fn close_and_draw(lottery: &mut TicketLottery, operator: Pubkey, slot: u64) {
    lottery.close_round(operator, slot).unwrap();
    lottery
        .draw_winner(operator, slot + 1, winning_picks(), commitment())
        .unwrap();
}

pub fn error_code(err: &Error) -> Option<u32> {
    match err {
        Error::AnchorError(e) => Some(e.error_code_number),
        Error::ProgramError(_) => None,
    }
}

pub fn assert_lottery_error<T: std::fmt::Debug>(result: Result<T>, expected: LotteryError) {
    let err = result.expect_err("instruction should have failed");
    assert_eq!(
        error_code(&err),
        Some(expected as u32 + ERROR_CODE_OFFSET),
        "unexpected error: {err}"
    );
}

/// Custody always equals revenue kept minus prizes paid, and covers every
/// pending prize plus the live pool.
pub fn assert_ledger_balanced(lottery: &TicketLottery) {
    let state = lottery.state();
    assert_eq!(
        lottery.get_contract_balance(),
        lottery.get_total_revenue() - lottery.get_total_paid_out()
    );
    assert!(
        lottery.get_contract_balance()
            >= state.vault.total_pending() + state.rounds.current().prize_pool
    );
}

/// Accepts every transfer and remembers what arrived.
#[derive(Default, Clone)]
pub struct RecordingWallet {
    pub received: Rc<Cell<u64>>,
}

impl Wallet for RecordingWallet {
    fn receive(&mut self, _lottery: &mut TicketLottery, amount: u64) -> Result<()> {
        self.received.set(self.received.get() + amount);
        Ok(())
    }
}

/// Refuses every incoming transfer.
pub struct RejectingWallet;

impl Wallet for RejectingWallet {
    fn receive(&mut self, _lottery: &mut TicketLottery, _amount: u64) -> Result<()> {
        Err(ProgramError::InvalidAccountData.into())
    }
}

/// Calls `claim_prize` again while its first payout is still in flight.
pub struct ReentrantClaimer {
    pub player: Pubkey,
    pub slot: u64,
    /// Swallow the nested failure instead of rejecting the outer transfer.
    pub swallow: bool,
    pub attempts: Rc<Cell<u32>>,
    pub nested_errors: Rc<RefCell<Vec<Option<u32>>>>,
}

impl ReentrantClaimer {
    pub fn new(player: Pubkey, slot: u64, swallow: bool) -> Self {
        Self {
            player,
            slot,
            swallow,
            attempts: Rc::default(),
            nested_errors: Rc::default(),
        }
    }
}

impl Wallet for ReentrantClaimer {
    fn receive(&mut self, lottery: &mut TicketLottery, _amount: u64) -> Result<()> {
        self.attempts.set(self.attempts.get() + 1);
        match lottery.claim_prize(self.player, self.slot) {
            Ok(_) => Ok(()),
            Err(err) => {
                self.nested_errors.borrow_mut().push(error_code(&err));
                if self.swallow {
                    Ok(())
                } else {
                    Err(err)
                }
            }
        }
    }
}
