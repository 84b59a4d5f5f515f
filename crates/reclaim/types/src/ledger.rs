//! Per-structure fund ledgers
//!
//! A ledger tracks who gave how much toward restoring one destroyed
//! structure. It exists only while the structure stays destroyed: successful
//! restoration, external revival, and session reset are the only paths that
//! remove it from the controller's table.

use crate::credits::Credits;
use crate::ids::{Acronym, ContributorId, StructureId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accumulated contributions toward restoring one destroyed structure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundLedger {
    /// Acronym of the governing definition, re-resolved against the registry
    /// whenever cost or type information is needed
    acronym: Acronym,
    /// Structure instance this ledger funds
    structure: StructureId,
    /// Balance per contributor; entries are always positive
    contributions: HashMap<ContributorId, Credits>,
}

impl FundLedger {
    /// Create an empty ledger for a destroyed structure
    pub fn new(acronym: Acronym, structure: StructureId) -> Self {
        Self {
            acronym,
            structure,
            contributions: HashMap::new(),
        }
    }

    /// Acronym of the governing definition
    pub fn acronym(&self) -> &Acronym {
        &self.acronym
    }

    /// Structure instance this ledger funds
    pub fn structure(&self) -> StructureId {
        self.structure
    }

    /// Accumulate a contribution.
    ///
    /// # Panics
    ///
    /// Panics when `amount` is not positive. Callers clamp against balance
    /// and remaining need first and skip the deposit entirely when nothing
    /// remains to apply, so a non-positive amount here is a caller bug.
    pub fn add_contribution(&mut self, contributor: ContributorId, amount: Credits) {
        assert!(amount.is_positive(), "contribution amount must be positive");
        let balance = self.contributions.entry(contributor).or_default();
        *balance = *balance + amount;
    }

    /// Remove the contributor's entry and return its balance,
    /// [`Credits::zero`] when the contributor never gave anything
    pub fn refund(&mut self, contributor: &ContributorId) -> Credits {
        self.contributions.remove(contributor).unwrap_or_default()
    }

    /// Drain every entry, returning who gets how much back
    pub fn refund_all(&mut self) -> Vec<(ContributorId, Credits)> {
        self.contributions.drain().collect()
    }

    /// Sum of all current contributions
    pub fn total(&self) -> Credits {
        Credits::new(self.contributions.values().map(Credits::value).sum())
    }

    /// The contributor's current balance, [`Credits::zero`] when absent
    pub fn contribution_of(&self, contributor: &ContributorId) -> Credits {
        self.contributions
            .get(contributor)
            .copied()
            .unwrap_or_default()
    }

    /// Whether the accumulated total, allowing the funding tolerance,
    /// reaches `target_cost`
    pub fn funding_complete(&self, target_cost: Credits) -> bool {
        self.total().meets(target_cost)
    }

    /// Number of contributors with a balance on this ledger
    pub fn contributor_count(&self) -> usize {
        self.contributions.len()
    }

    /// Whether nobody currently has a balance on this ledger
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}
