//! The restoration controller
//!
//! Owns all funding state for one session: the definition registry, one fund
//! ledger per destroyed structure, and the event journal. The host drives it
//! synchronously from its own thread; chat commands, revival notifications,
//! session loads, and settings reloads all arrive as plain method calls, and
//! every world side effect goes back out through the [`GameHost`] traits.

use crate::events::FundingEventBus;
use crate::host::{GameHost, StructureRef};
use crate::registry::DefinitionRegistry;
use crate::settings::{self, SettingsProvider};
use reclaim_types::{
    Acronym, ContributorId, Credits, DefinitionSettings, FundLedger, FundingConfig, FundingError,
    FundingEvent, FundingEventData, FundingEventKind, FundingResult, SessionId, StructureId,
    TeamId,
};
use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Outcome of an accepted contribution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContributionOutcome {
    /// Amount actually taken from the contributor after clamping
    pub applied: Credits,
    /// Ledger total right after the contribution
    pub total: Credits,
    /// Target cost at contribution time
    pub cost: Credits,
    /// Whether this contribution completed the funding and the structure
    /// was restored
    pub restored: bool,
}

/// Snapshot returned by a fund-status request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FundStatus {
    /// Structure whose ledger was inspected
    pub structure: StructureId,
    /// The requesting contributor's balance on the ledger
    pub personal: Credits,
    /// Ledger total
    pub total: Credits,
    /// Target cost at request time
    pub cost: Credits,
}

/// Statistics about the restoration controller
#[derive(Clone, Debug)]
pub struct ControllerStats {
    /// Current session
    pub session: SessionId,
    /// Ledgers currently tracking a destroyed structure
    pub active_ledgers: u64,
    /// Registered definitions
    pub registered_definitions: u64,
    /// Restorations recorded this session
    pub total_restorations: u64,
    /// Events journaled this session
    pub events_logged: u64,
}

/// Resolution of an acronym against the live session
struct FundingTarget {
    structure: StructureRef,
    settings: DefinitionSettings,
    limit_reached: bool,
}

/// Funding state machine for one host session
pub struct RestorationController<H: GameHost> {
    /// Session-wide configuration
    config: FundingConfig,
    /// Acronym to definition table
    registry: DefinitionRegistry,
    /// One ledger per destroyed structure with live funding
    ledgers: HashMap<StructureId, FundLedger>,
    /// Journal and broadcast of funding events
    events: FundingEventBus,
    /// The surrounding game server
    host: H,
}

impl<H: GameHost> RestorationController<H> {
    /// Create a controller with default configuration and no definitions
    pub fn new(host: H) -> Self {
        Self {
            config: FundingConfig::default(),
            registry: DefinitionRegistry::new(),
            ledgers: HashMap::new(),
            events: FundingEventBus::new(),
            host,
        }
    }

    /// Create a controller with an explicit configuration
    pub fn with_config(host: H, config: FundingConfig) -> FundingResult<Self> {
        config.validate()?;
        let mut controller = Self::new(host);
        controller.config = config;
        Ok(controller)
    }

    /// The host this controller drives
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Current configuration
    pub fn config(&self) -> &FundingConfig {
        &self.config
    }

    /// The definition registry
    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// The fund ledger for `structure`, if one is live
    pub fn ledger(&self, structure: StructureId) -> Option<&FundLedger> {
        self.ledgers.get(&structure)
    }

    /// The event journal and broadcast bus
    pub fn events(&self) -> &FundingEventBus {
        &self.events
    }

    /// Subscribe to the live funding event stream
    pub fn subscribe(&self) -> broadcast::Receiver<FundingEvent> {
        self.events.subscribe()
    }

    /// The current session
    pub fn session(&self) -> SessionId {
        self.events.current_session()
    }

    /// Get controller statistics
    pub fn stats(&self) -> ControllerStats {
        let registry = self.registry.stats();
        ControllerStats {
            session: self.events.current_session(),
            active_ledgers: self.ledgers.len() as u64,
            registered_definitions: registry.total_definitions,
            total_restorations: registry.total_restorations,
            events_logged: self.events.event_count() as u64,
        }
    }

    // ===== Contribution Operations =====

    /// Apply a contribution toward restoring the structure `acronym` resolves
    /// to on the contributor's team.
    ///
    /// `requested` of `None` offers the contributor's whole balance. An
    /// explicit amount must be positive and is clamped to the balance. The
    /// offer is then clamped to the remaining need; when nothing remains to
    /// apply, the call still succeeds with a zero `applied` amount and
    /// touches neither the balance nor the ledger. Every path ends with a
    /// restoration check against the live team size.
    pub fn contribute(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
        acronym: &Acronym,
        requested: Option<Credits>,
    ) -> FundingResult<ContributionOutcome> {
        if !self.config.enabled {
            return Err(FundingError::FeatureDisabled);
        }

        let target = self.resolve_target(acronym, team)?;
        self.check_restore_limit(&target)?;
        let structure = target.structure;
        let structure_name = self.host.structure_name(structure.id);

        let offered = match requested {
            Some(amount) => {
                if !amount.is_positive() {
                    return Err(FundingError::InvalidAmount(amount.value().to_string()));
                }
                amount.min(self.host.balance(contributor))
            }
            None => {
                let balance = self.host.balance(contributor);
                if !balance.is_positive() {
                    return Err(FundingError::InsufficientFunds(structure_name));
                }
                balance
            }
        };

        let cost = target
            .settings
            .total_cost(self.host.team_player_count(team));

        let (applied, total) = {
            let ledger = self
                .ledgers
                .entry(structure.id)
                .or_insert_with(|| FundLedger::new(acronym.clone(), structure.id));
            let remaining = cost.saturating_sub(ledger.total());
            let applied = offered.min(remaining);
            if applied.is_positive() {
                ledger.add_contribution(contributor.clone(), applied);
            }
            (applied, ledger.total())
        };

        if applied.is_positive() {
            self.host.withdraw(contributor, applied);
            self.host.mark_changed(contributor);
            self.host.team_message(
                team,
                &format!(
                    "{contributor} deposited {applied} credit(s) towards the funding of the {structure_name}."
                ),
            );

            debug!(
                contributor = %contributor,
                structure = %structure.id,
                amount = applied.value(),
                total = total.value(),
                cost = cost.value(),
                "Contribution applied"
            );

            let event = FundingEvent::new(
                FundingEventKind::ContributionAccepted,
                self.events.current_session(),
                FundingEventData::Contribution {
                    amount: applied,
                    ledger_total: total,
                    target_cost: cost,
                },
            )
            .with_contributor(contributor.clone())
            .with_structure(structure.id);
            self.events.publish(event);
        }

        let restored = self.attempt_restore(structure.id, 0);

        Ok(ContributionOutcome {
            applied,
            total,
            cost,
            restored,
        })
    }

    /// Report funding progress for the structure `acronym` resolves to.
    ///
    /// Pages the contributor their personal balance and tells the team the
    /// overall total. Opens an empty ledger when none exists yet, exactly as
    /// a contribution would.
    pub fn fund_status(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
        acronym: &Acronym,
    ) -> FundingResult<FundStatus> {
        if !self.config.enabled {
            return Err(FundingError::FeatureDisabled);
        }

        let target = self.resolve_target(acronym, team)?;
        self.check_restore_limit(&target)?;
        let structure = target.structure;
        let structure_name = self.host.structure_name(structure.id);
        let cost = target
            .settings
            .total_cost(self.host.team_player_count(team));

        let (personal, total) = {
            let ledger = self
                .ledgers
                .entry(structure.id)
                .or_insert_with(|| FundLedger::new(acronym.clone(), structure.id));
            (ledger.contribution_of(contributor), ledger.total())
        };

        self.host.page(
            contributor,
            &format!(
                "Your contribution towards restoring the {structure_name} is {personal} credit(s)."
            ),
        );
        self.host.team_message(
            team,
            &format!(
                "{total} out of {cost} credit(s) gathered to restore the {structure_name}."
            ),
        );

        Ok(FundStatus {
            structure: structure.id,
            personal,
            total,
            cost,
        })
    }

    // ===== Refund Operations =====

    /// Return contributions to the contributor.
    ///
    /// With an acronym, refunds the contributor's balance on that one
    /// structure's ledger. Without one, drains the contributor's balance
    /// from every live ledger. Returns the total refunded; refund requests
    /// work even while funding commands are disabled.
    pub fn refund(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
        acronym: Option<&Acronym>,
    ) -> FundingResult<Credits> {
        match acronym {
            Some(acronym) => self.refund_structure(contributor, team, acronym),
            None => self.refund_everything(contributor, team),
        }
    }

    fn refund_structure(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
        acronym: &Acronym,
    ) -> FundingResult<Credits> {
        let target = self.resolve_target(acronym, team)?;
        let structure = target.structure;
        let structure_name = self.host.structure_name(structure.id);

        let amount = self
            .ledgers
            .get_mut(&structure.id)
            .map(|ledger| ledger.refund(contributor))
            .unwrap_or_default();
        if !amount.is_positive() {
            return Err(FundingError::NothingToRefund(Some(structure_name)));
        }

        self.host.deposit(contributor, amount);
        self.host.mark_changed(contributor);
        self.host.page(
            contributor,
            &format!("You have been refunded {amount} credit(s) for the {structure_name}."),
        );

        let total = self
            .ledgers
            .get(&structure.id)
            .map(FundLedger::total)
            .unwrap_or_default();
        let cost = target
            .settings
            .total_cost(self.host.team_player_count(team));
        self.host.team_message(
            team,
            &format!(
                "{total} out of {cost} credit(s) gathered to restore the {structure_name}."
            ),
        );

        debug!(
            contributor = %contributor,
            structure = %structure.id,
            amount = amount.value(),
            "Contribution refunded"
        );
        self.publish_refund(contributor, structure.id, amount);

        Ok(amount)
    }

    fn refund_everything(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
    ) -> FundingResult<Credits> {
        // One team-size read up front prices every progress line below
        let team_size = self.host.team_player_count(team);
        let mut total_refunded = Credits::zero();

        let mut refunds: Vec<(StructureId, Acronym, Credits, Credits)> = Vec::new();
        for ledger in self.ledgers.values_mut() {
            let amount = ledger.refund(contributor);
            if amount.is_positive() {
                refunds.push((
                    ledger.structure(),
                    ledger.acronym().clone(),
                    amount,
                    ledger.total(),
                ));
            }
        }

        for (structure, acronym, amount, total) in refunds {
            let structure_name = self.host.structure_name(structure);

            self.host.deposit(contributor, amount);
            self.host.mark_changed(contributor);
            self.host.page(
                contributor,
                &format!("You have been refunded {amount} credit(s) for the {structure_name}."),
            );

            match self.registry.resolve(&acronym) {
                Ok(definition) => {
                    let cost = definition.settings().total_cost(team_size);
                    self.host.team_message(
                        team,
                        &format!(
                            "{total} out of {cost} credit(s) gathered to restore the {structure_name}."
                        ),
                    );
                }
                Err(_) => {
                    warn!(
                        acronym = %acronym,
                        structure = %structure,
                        "Ledger references an unregistered acronym, progress line skipped"
                    );
                }
            }

            self.publish_refund(contributor, structure, amount);
            total_refunded = total_refunded + amount;
        }

        if !total_refunded.is_positive() {
            return Err(FundingError::NothingToRefund(None));
        }

        debug!(
            contributor = %contributor,
            refunded = total_refunded.value(),
            "All contributions refunded"
        );
        Ok(total_refunded)
    }

    // ===== Restoration Operations =====

    /// Check one ledger against the live cost and restore its structure when
    /// funding is complete.
    ///
    /// `team_size_delta` adjusts the live team size for callbacks that fire
    /// while a departing player still counts. Returns whether a restoration
    /// fired. Without one, funding progress goes out to the owning team.
    pub fn attempt_restore(&mut self, structure: StructureId, team_size_delta: i32) -> bool {
        let Some(ledger) = self.ledgers.get(&structure) else {
            return false;
        };
        let acronym = ledger.acronym().clone();
        let total = ledger.total();

        // The instance itself may have left the world; keep the ledger so a
        // later revival notification can still reconcile it
        let Some(structure_ref) = self.host.structure_by_id(structure) else {
            return false;
        };

        let team_size = self.host.team_player_count(structure_ref.team) + team_size_delta;
        if team_size <= 0 {
            return false;
        }

        let settings = match self.registry.resolve(&acronym) {
            Ok(definition) => definition.settings(),
            Err(_) => {
                warn!(
                    acronym = %acronym,
                    structure = %structure,
                    "Ledger references an unregistered acronym, restore check skipped"
                );
                return false;
            }
        };
        let cost = settings.total_cost(team_size);
        let structure_name = self.host.structure_name(structure);

        if total.meets(cost) {
            // The ledger comes out before the world changes; the revival
            // notification for this restoration must find nothing left
            self.ledgers.remove(&structure);
            let restore_count = self
                .registry
                .resolve_mut(&acronym)
                .map(|definition| definition.record_restore())
                .unwrap_or(0);

            self.host.restore_structure(&structure_ref);
            self.host.host_message(&format!(
                "{} has restored their {}.",
                self.host.team_name(structure_ref.team),
                structure_name
            ));

            info!(
                structure = %structure,
                team = %structure_ref.team,
                funded = total.value(),
                restore_count,
                "Structure restored by pooled funding"
            );

            let event = FundingEvent::new(
                FundingEventKind::StructureRestored,
                self.events.current_session(),
                FundingEventData::Restoration {
                    funded: total,
                    restore_count,
                },
            )
            .with_structure(structure);
            self.events.publish(event);

            true
        } else {
            self.host.team_message(
                structure_ref.team,
                &format!(
                    "{total} out of {cost} credit(s) gathered to restore the {structure_name}."
                ),
            );
            false
        }
    }

    /// Run a restoration check over every live ledger
    pub fn sweep_all(&mut self, team_size_delta: i32) {
        // Snapshot, the table mutates as restorations fire
        let structures: Vec<StructureId> = self.ledgers.keys().copied().collect();
        for structure in structures {
            self.attempt_restore(structure, team_size_delta);
        }
    }

    // ===== Host Lifecycle Hooks =====

    /// Hook for the host's revival notification: a funded structure came
    /// back without the funding system restoring it.
    ///
    /// Refunds every contributor when refunds are allowed, then drops the
    /// ledger either way. A second notification for the same structure is a
    /// no-op.
    pub fn on_external_restoration(&mut self, structure: StructureId) {
        let Some(mut ledger) = self.ledgers.remove(&structure) else {
            return;
        };

        let contributors = ledger.contributor_count() as u64;
        let structure_name = self.host.structure_name(structure);
        let mut refunded = Credits::zero();

        if self.config.allow_refund {
            for (contributor, amount) in ledger.refund_all() {
                self.host.deposit(&contributor, amount);
                self.host.mark_changed(&contributor);
                self.host.page(
                    &contributor,
                    &format!(
                        "You have been refunded {amount} credit(s) for the {structure_name}."
                    ),
                );
                refunded = refunded + amount;
            }
        }

        info!(
            structure = %structure,
            contributors,
            refunded = refunded.value(),
            "Ledger reconciled after external restoration"
        );

        let event = FundingEvent::new(
            FundingEventKind::LedgerReconciled,
            self.events.current_session(),
            FundingEventData::Reconciliation {
                refunded,
                contributors,
            },
        )
        .with_structure(structure);
        self.events.publish(event);
    }

    /// Hook for the host's session load: drop every ledger, zero the
    /// restore counters, and start a fresh journal
    pub fn on_session_start(&mut self) {
        self.ledgers.clear();
        self.registry.reset_counters();
        self.events.begin_session();
        self.events
            .emit(FundingEventKind::SessionStarted, FundingEventData::None);

        info!(session = %self.events.current_session(), "Session started, funding state reset");
    }

    /// Hook for the host's player-departure callback.
    ///
    /// The departing player still counts toward the live team size while the
    /// callback runs, so every ledger is checked as if they already left.
    pub fn on_player_leave(&mut self) {
        self.sweep_all(-1);
    }

    /// Rebuild configuration and definitions from the provider.
    ///
    /// Rejects out-of-range values without touching current state. On
    /// success the registry is cleared and re-registered, per-acronym
    /// overrides are applied, and every ledger is re-checked since a reload
    /// can lower a cost below an existing total.
    pub fn reload_settings(&mut self, provider: &dyn SettingsProvider) -> FundingResult<()> {
        let config = settings::load_funding_config(provider);
        config.validate()?;

        settings::register_definitions(&mut self.registry, provider, config.defaults);
        self.registry.apply_config(config.defaults, |acronym, defaults| {
            settings::definition_settings(provider, acronym, defaults)
        });
        self.config = config;

        info!(
            definitions = self.registry.count(),
            enabled = self.config.enabled,
            allow_refund = self.config.allow_refund,
            "Funding settings reloaded"
        );
        self.events
            .emit(FundingEventKind::SettingsReloaded, FundingEventData::None);

        self.sweep_all(0);
        Ok(())
    }

    // ===== Internal Helpers =====

    fn resolve_target(&self, acronym: &Acronym, team: TeamId) -> FundingResult<FundingTarget> {
        let definition = self.registry.resolve(acronym)?;
        let validated =
            definition.validated_types(|name| self.host.resolve_structure_type(name));
        if validated.is_empty() {
            return Err(FundingError::UnknownAcronym(acronym.clone()));
        }

        let structure = self
            .host
            .destroyed_structures(team)
            .into_iter()
            .find(|s| validated.contains(&s.type_id))
            .ok_or_else(|| FundingError::NoDestroyedStructure(acronym.clone()))?;

        Ok(FundingTarget {
            structure,
            settings: definition.settings(),
            limit_reached: definition.restore_limit_reached(),
        })
    }

    fn check_restore_limit(&self, target: &FundingTarget) -> FundingResult<()> {
        if target.limit_reached {
            return Err(FundingError::RestoreLimitExceeded(
                self.host.structure_name(target.structure.id),
            ));
        }
        Ok(())
    }

    fn publish_refund(
        &mut self,
        contributor: &ContributorId,
        structure: StructureId,
        amount: Credits,
    ) {
        let event = FundingEvent::new(
            FundingEventKind::ContributionRefunded,
            self.events.current_session(),
            FundingEventData::Refund { amount },
        )
        .with_contributor(contributor.clone())
        .with_structure(structure);
        self.events.publish(event);
    }
}
