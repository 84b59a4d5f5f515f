//! In-memory host shared by the engine tests
//!
//! `TestHost` implements every host seam over `RefCell` state and records
//! all outbound calls so tests can assert on messages, balances, and
//! restorations without a game server.

use crate::host::{CreditAccess, Messenger, StructureRef, StructureRestorer, WorldQuery};
use reclaim_types::{
    ContributorId, Credits, StructureId, StructureTypeId, StructureTypeName, TeamId,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// One structure in the fake world
#[derive(Clone, Debug)]
pub struct TestStructure {
    pub id: StructureId,
    pub team: TeamId,
    pub type_id: StructureTypeId,
    pub name: String,
    pub destroyed: bool,
}

/// Scriptable in-memory game host
#[derive(Default)]
pub struct TestHost {
    pub types: RefCell<HashMap<String, StructureTypeId>>,
    pub structures: RefCell<Vec<TestStructure>>,
    pub balances: RefCell<HashMap<ContributorId, f32>>,
    pub team_sizes: RefCell<HashMap<TeamId, i32>>,
    pub team_names: RefCell<HashMap<TeamId, String>>,
    pub pages: RefCell<Vec<(ContributorId, String)>>,
    pub team_messages: RefCell<Vec<(TeamId, String)>>,
    pub host_messages: RefCell<Vec<String>>,
    pub restored: RefCell<Vec<StructureId>>,
    pub marked: RefCell<Vec<ContributorId>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&self, name: &str, id: u32) {
        self.types
            .borrow_mut()
            .insert(name.to_string(), StructureTypeId::new(id));
    }

    pub fn add_structure(&self, id: i32, team: i32, type_id: u32, name: &str, destroyed: bool) {
        self.structures.borrow_mut().push(TestStructure {
            id: StructureId::new(id),
            team: TeamId::new(team),
            type_id: StructureTypeId::new(type_id),
            name: name.to_string(),
            destroyed,
        });
    }

    pub fn remove_structure(&self, id: i32) {
        self.structures
            .borrow_mut()
            .retain(|s| s.id != StructureId::new(id));
    }

    pub fn destroy(&self, id: i32) {
        self.set_destroyed(id, true);
    }

    pub fn repair(&self, id: i32) {
        self.set_destroyed(id, false);
    }

    fn set_destroyed(&self, id: i32, destroyed: bool) {
        if let Some(structure) = self
            .structures
            .borrow_mut()
            .iter_mut()
            .find(|s| s.id == StructureId::new(id))
        {
            structure.destroyed = destroyed;
        }
    }

    pub fn set_balance(&self, contributor: &str, amount: f32) {
        self.balances
            .borrow_mut()
            .insert(ContributorId::new(contributor), amount);
    }

    pub fn balance_of(&self, contributor: &str) -> f32 {
        self.balances
            .borrow()
            .get(&ContributorId::new(contributor))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set_team_size(&self, team: i32, size: i32) {
        self.team_sizes.borrow_mut().insert(TeamId::new(team), size);
    }

    pub fn set_team_name(&self, team: i32, name: &str) {
        self.team_names
            .borrow_mut()
            .insert(TeamId::new(team), name.to_string());
    }

    pub fn restored_ids(&self) -> Vec<StructureId> {
        self.restored.borrow().clone()
    }

    pub fn pages_for(&self, contributor: &str) -> Vec<String> {
        let contributor = ContributorId::new(contributor);
        self.pages
            .borrow()
            .iter()
            .filter(|(who, _)| *who == contributor)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn team_messages_for(&self, team: i32) -> Vec<String> {
        let team = TeamId::new(team);
        self.team_messages
            .borrow()
            .iter()
            .filter(|(to, _)| *to == team)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl WorldQuery for TestHost {
    fn resolve_structure_type(&self, name: &StructureTypeName) -> Option<StructureTypeId> {
        self.types.borrow().get(name.as_str()).copied()
    }

    fn destroyed_structures(&self, team: TeamId) -> Vec<StructureRef> {
        self.structures
            .borrow()
            .iter()
            .filter(|s| s.team == team && s.destroyed)
            .map(|s| StructureRef {
                id: s.id,
                team: s.team,
                type_id: s.type_id,
            })
            .collect()
    }

    fn structure_by_id(&self, structure: StructureId) -> Option<StructureRef> {
        self.structures
            .borrow()
            .iter()
            .find(|s| s.id == structure)
            .map(|s| StructureRef {
                id: s.id,
                team: s.team,
                type_id: s.type_id,
            })
    }

    fn team_player_count(&self, team: TeamId) -> i32 {
        self.team_sizes.borrow().get(&team).copied().unwrap_or(0)
    }
}

impl CreditAccess for TestHost {
    fn balance(&self, contributor: &ContributorId) -> Credits {
        Credits::new(
            self.balances
                .borrow()
                .get(contributor)
                .copied()
                .unwrap_or(0.0),
        )
    }

    fn withdraw(&self, contributor: &ContributorId, amount: Credits) {
        if let Some(balance) = self.balances.borrow_mut().get_mut(contributor) {
            *balance -= amount.value();
        }
    }

    fn deposit(&self, contributor: &ContributorId, amount: Credits) {
        *self
            .balances
            .borrow_mut()
            .entry(contributor.clone())
            .or_insert(0.0) += amount.value();
    }

    fn mark_changed(&self, contributor: &ContributorId) {
        self.marked.borrow_mut().push(contributor.clone());
    }
}

impl Messenger for TestHost {
    fn page(&self, contributor: &ContributorId, message: &str) {
        self.pages
            .borrow_mut()
            .push((contributor.clone(), message.to_string()));
    }

    fn team_message(&self, team: TeamId, message: &str) {
        self.team_messages
            .borrow_mut()
            .push((team, message.to_string()));
    }

    fn host_message(&self, message: &str) {
        self.host_messages.borrow_mut().push(message.to_string());
    }

    fn structure_name(&self, structure: StructureId) -> String {
        self.structures
            .borrow()
            .iter()
            .find(|s| s.id == structure)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("structure-{structure}"))
    }

    fn team_name(&self, team: TeamId) -> String {
        self.team_names
            .borrow()
            .get(&team)
            .cloned()
            .unwrap_or_else(|| format!("Team {team}"))
    }
}

impl StructureRestorer for TestHost {
    fn restore_structure(&self, structure: &StructureRef) {
        self.restored.borrow_mut().push(structure.id);
        if let Some(entry) = self
            .structures
            .borrow_mut()
            .iter_mut()
            .find(|s| s.id == structure.id)
        {
            entry.destroyed = false;
        }
    }
}
