//! Ledger state of the lottery. Each table owns its own invariants; the
//! instruction handlers compose them.

pub mod lottery;
pub mod player;
pub mod round;
pub mod ticket;
pub mod vault;

pub use lottery::*;
pub use player::*;
pub use round::*;
pub use ticket::*;
pub use vault::*;
