use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::error::LotteryError;

/// A registered lottery participant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    /// Always `true` once stored; records are never removed.
    pub registered: bool,

    /// Slot at which the player registered.
    pub registered_at: u64,
}

/// Set of addresses allowed to buy and enter tickets.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: BTreeMap<Pubkey, Player>,
    /// Registration order, used by `all`.
    roster: Vec<Pubkey>,
}

impl PlayerRegistry {
    pub fn register(&mut self, player: Pubkey, slot: u64) -> Result<()> {
        require!(
            !self.is_registered(&player),
            LotteryError::AlreadyRegistered
        );
        self.players.insert(
            player,
            Player {
                registered: true,
                registered_at: slot,
            },
        );
        self.roster.push(player);
        Ok(())
    }

    pub fn is_registered(&self, player: &Pubkey) -> bool {
        self.players.get(player).map_or(false, |p| p.registered)
    }

    pub fn get(&self, player: &Pubkey) -> Option<&Player> {
        self.players.get(player)
    }

    pub fn len(&self) -> u64 {
        self.roster.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn all(&self) -> &[Pubkey] {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_once_then_reject() {
        let mut registry = PlayerRegistry::default();
        let alice = Pubkey::new_unique();

        assert!(!registry.is_registered(&alice));
        registry.register(alice, 7).unwrap();
        assert!(registry.is_registered(&alice));
        assert_eq!(registry.get(&alice).unwrap().registered_at, 7);

        assert!(registry.register(alice, 8).is_err());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&alice).unwrap().registered_at, 7);
    }

    #[test]
    fn roster_keeps_registration_order() {
        let mut registry = PlayerRegistry::default();
        let players: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        for (slot, player) in players.iter().rev().enumerate() {
            registry.register(*player, slot as u64).unwrap();
        }

        let expected: Vec<Pubkey> = players.iter().rev().copied().collect();
        assert_eq!(registry.all(), expected.as_slice());
    }
}
