use alloc::collections::BTreeMap;

use crate::powerup::Powerup;

/// Powerup counts owned by the player. A zero count is never stored, so an
/// empty slot and a missing entry compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    counts: BTreeMap<Powerup, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, item: Powerup) -> u32 {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    /// Add `amount` units, saturating at `u32::MAX`.
    pub fn add(&mut self, item: Powerup, amount: u32) {
        if amount > 0 {
            let n = self.counts.entry(item).or_insert(0);
            *n = n.saturating_add(amount);
        }
    }

    /// Replace the held count for `item`.
    pub fn set(&mut self, item: Powerup, count: u32) {
        if count == 0 {
            self.counts.remove(&item);
        } else {
            self.counts.insert(item, count);
        }
    }

    /// Consume one unit. Returns `false` (and changes nothing) when none are held.
    pub fn take(&mut self, item: Powerup) -> bool {
        match self.counts.get_mut(&item) {
            Some(n) if *n > 1 => {
                *n -= 1;
                true
            }
            Some(_) => {
                self.counts.remove(&item);
                true
            }
            None => false,
        }
    }

    /// Non-zero entries in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Powerup, u32)> + '_ {
        self.counts.iter().map(|(&p, &n)| (p, n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(Powerup, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (Powerup, u32)>>(iter: I) -> Self {
        let mut inv = Inventory::new();
        for (item, n) in iter {
            inv.add(item, n);
        }
        inv
    }
}
