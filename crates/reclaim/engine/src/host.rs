//! Host interfaces
//!
//! The funding engine never touches the game world directly. Type resolution,
//! destroyed-structure lookups, credit balances, messaging, and the restore
//! action itself all go through these traits, so a production server and the
//! test harness plug in the same way.
//!
//! Methods take `&self`: hosts wrap live engine state behind their own
//! handles and the controller is driven from a single thread.

use reclaim_types::{
    ContributorId, Credits, StructureId, StructureTypeId, StructureTypeName, TeamId,
};

/// Handle to one structure instance in the current session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StructureRef {
    /// Instance id, stable for the structure's lifetime
    pub id: StructureId,
    /// Owning team
    pub team: TeamId,
    /// Live type handle, valid only for the current session
    pub type_id: StructureTypeId,
}

/// Read access to the live game world
pub trait WorldQuery {
    /// Resolve a configured type name against the current session, `None`
    /// when no such type exists in it
    fn resolve_structure_type(&self, name: &StructureTypeName) -> Option<StructureTypeId>;

    /// Destroyed structures belonging to `team`, in world order
    fn destroyed_structures(&self, team: TeamId) -> Vec<StructureRef>;

    /// Look up a structure by instance id, destroyed or not; `None` once the
    /// instance has left the world
    fn structure_by_id(&self, structure: StructureId) -> Option<StructureRef>;

    /// Number of players currently on `team`
    fn team_player_count(&self, team: TeamId) -> i32;
}

/// Access to contributors' spendable credit balances
pub trait CreditAccess {
    /// Current spendable balance
    fn balance(&self, contributor: &ContributorId) -> Credits;

    /// Take `amount` from the contributor's balance
    fn withdraw(&self, contributor: &ContributorId, amount: Credits);

    /// Return `amount` to the contributor's balance
    fn deposit(&self, contributor: &ContributorId, amount: Credits);

    /// Flag the contributor's state for replication after a balance change
    fn mark_changed(&self, contributor: &ContributorId);
}

/// Outbound messaging and display-name resolution
pub trait Messenger {
    /// Private message to one contributor
    fn page(&self, contributor: &ContributorId, message: &str);

    /// Message to every member of `team`
    fn team_message(&self, team: TeamId, message: &str);

    /// Message to everyone in the session
    fn host_message(&self, message: &str);

    /// Display name for a structure instance
    fn structure_name(&self, structure: StructureId) -> String;

    /// Display name for a team
    fn team_name(&self, team: TeamId) -> String;
}

/// The restoration side effect
pub trait StructureRestorer {
    /// Bring a destroyed structure back into play
    fn restore_structure(&self, structure: &StructureRef);
}

/// Everything the restoration controller needs from the surrounding game
/// server, in one bound
pub trait GameHost: WorldQuery + CreditAccess + Messenger + StructureRestorer {}

impl<T: WorldQuery + CreditAccess + Messenger + StructureRestorer> GameHost for T {}
