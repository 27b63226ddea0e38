use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::error::LotteryError;

/// Lamports held in custody and the pull-payment ledger of prizes owed.
///
/// Prizes are never pushed to winners. Settlement only credits `pending`;
/// value leaves the vault when the owner claims it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrizeVault {
    pending: BTreeMap<Pubkey, u64>,

    /// Lamports currently held.
    balance: u64,

    /// Lamports paid to claimants over the vault's lifetime.
    total_paid_out: u64,
}

impl PrizeVault {
    /// Takes custody of incoming lamports.
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;
        Ok(())
    }

    /// Releases lamports from custody.
    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(LotteryError::MathOverflow)?;
        Ok(())
    }

    /// Adds `amount` to what `to` is owed. Balances accumulate across rounds.
    pub fn credit(&mut self, to: Pubkey, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let owed = self.pending.entry(to).or_insert(0);
        *owed = owed.checked_add(amount).ok_or(LotteryError::MathOverflow)?;
        Ok(())
    }

    /// Zeroes and returns the balance owed to `claimant`.
    ///
    /// Must run before any lamports move: a re-entrant claim made during the
    /// transfer then finds nothing to take.
    pub fn take_pending(&mut self, claimant: &Pubkey) -> Result<u64> {
        let owed = self.pending(claimant);
        require!(owed > 0, LotteryError::NothingToClaim);
        self.pending.insert(*claimant, 0);
        Ok(owed)
    }

    pub fn record_payout(&mut self, amount: u64) -> Result<()> {
        self.total_paid_out = self
            .total_paid_out
            .checked_add(amount)
            .ok_or(LotteryError::MathOverflow)?;
        Ok(())
    }

    pub fn pending(&self, who: &Pubkey) -> u64 {
        self.pending.get(who).copied().unwrap_or(0)
    }

    pub fn total_pending(&self) -> u64 {
        self.pending.values().sum()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn total_paid_out(&self) -> u64 {
        self.total_paid_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_accumulate() {
        let mut vault = PrizeVault::default();
        let alice = Pubkey::new_unique();

        vault.credit(alice, 30).unwrap();
        vault.credit(alice, 12).unwrap();
        vault.credit(alice, 0).unwrap();

        assert_eq!(vault.pending(&alice), 42);
        assert_eq!(vault.total_pending(), 42);
        assert_eq!(vault.pending(&Pubkey::new_unique()), 0);
    }

    #[test]
    fn take_pending_zeroes_before_payout() {
        let mut vault = PrizeVault::default();
        let alice = Pubkey::new_unique();
        vault.deposit(100).unwrap();
        vault.credit(alice, 60).unwrap();

        assert_eq!(vault.take_pending(&alice).unwrap(), 60);
        assert_eq!(vault.pending(&alice), 0);
        assert!(vault.take_pending(&alice).is_err());

        // custody is untouched until the transfer actually happens
        assert_eq!(vault.balance(), 100);
    }

    #[test]
    fn withdraw_cannot_overdraw() {
        let mut vault = PrizeVault::default();
        vault.deposit(10).unwrap();
        assert!(vault.withdraw(11).is_err());
        vault.withdraw(10).unwrap();
        assert_eq!(vault.balance(), 0);
    }
}
