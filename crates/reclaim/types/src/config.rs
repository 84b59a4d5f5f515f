//! Funding configuration
//!
//! Two layers: [`FundingConfig`] holds the session-wide switches plus the
//! default [`DefinitionSettings`], and each registered definition carries its
//! own settings copy after per-acronym overrides are applied.

use crate::credits::Credits;
use crate::errors::{FundingError, FundingResult};
use serde::{Deserialize, Serialize};

/// Sentinel for [`DefinitionSettings::max_restore_count`]: no per-session cap
pub const UNLIMITED_RESTORES: i32 = -1;

/// Cost and limit settings applied to one restore definition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSettings {
    /// Base restoration cost in credits
    pub restore_cost: Credits,
    /// Multiply the base cost by the live team size when computing the total
    pub scale_with_player_count: bool,
    /// Extra multiplier applied on top of team-size scaling
    pub scale: f32,
    /// Restorations allowed per session, [`UNLIMITED_RESTORES`] for no cap
    pub max_restore_count: i32,
}

impl Default for DefinitionSettings {
    fn default() -> Self {
        Self {
            restore_cost: Credits::new(1000.0),
            scale_with_player_count: true,
            scale: 1.0,
            max_restore_count: UNLIMITED_RESTORES,
        }
    }
}

impl DefinitionSettings {
    /// Total restoration cost for the given live team size.
    ///
    /// # Panics
    ///
    /// Panics when `team_size` is not positive. Restoration paths skip empty
    /// teams before any cost is computed, so a non-positive size here is a
    /// caller bug.
    pub fn total_cost(&self, team_size: i32) -> Credits {
        assert!(team_size > 0, "team_size must be positive");
        if self.scale_with_player_count {
            Credits::new(self.restore_cost.value() * team_size as f32 * self.scale)
        } else {
            self.restore_cost
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> FundingResult<()> {
        if self.restore_cost.value() < 0.0 {
            return Err(FundingError::InvalidConfig(format!(
                "restore_cost must be non-negative, got {}",
                self.restore_cost.value()
            )));
        }
        if self.scale < 0.0 {
            return Err(FundingError::InvalidConfig(format!(
                "scale must be non-negative, got {}",
                self.scale
            )));
        }
        if self.max_restore_count < UNLIMITED_RESTORES {
            return Err(FundingError::InvalidConfig(format!(
                "max_restore_count must be {UNLIMITED_RESTORES} or higher, got {}",
                self.max_restore_count
            )));
        }
        Ok(())
    }
}

/// Session-wide funding configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundingConfig {
    /// Master switch for the fund and fund-status commands
    pub enabled: bool,
    /// Refund contributors when a funded structure is restored from outside
    /// the funding system
    pub allow_refund: bool,
    /// Settings used for definitions without per-acronym overrides
    pub defaults: DefinitionSettings,
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_refund: true,
            defaults: DefinitionSettings::default(),
        }
    }
}

impl FundingConfig {
    /// Check value ranges
    pub fn validate(&self) -> FundingResult<()> {
        self.defaults.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FundingConfig::default();
        assert!(config.enabled);
        assert!(config.allow_refund);
        assert_eq!(config.defaults.restore_cost, Credits::new(1000.0));
        assert!(config.defaults.scale_with_player_count);
        assert_eq!(config.defaults.scale, 1.0);
        assert_eq!(config.defaults.max_restore_count, UNLIMITED_RESTORES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_total_cost_scales_with_team_size() {
        let settings = DefinitionSettings::default();
        assert_eq!(settings.total_cost(1), Credits::new(1000.0));
        assert_eq!(settings.total_cost(3), Credits::new(3000.0));

        let halved = DefinitionSettings {
            scale: 0.5,
            ..DefinitionSettings::default()
        };
        assert_eq!(halved.total_cost(4), Credits::new(2000.0));
    }

    #[test]
    fn test_total_cost_flat_when_scaling_disabled() {
        let settings = DefinitionSettings {
            restore_cost: Credits::new(750.0),
            scale_with_player_count: false,
            scale: 2.0,
            max_restore_count: UNLIMITED_RESTORES,
        };
        assert_eq!(settings.total_cost(1), Credits::new(750.0));
        assert_eq!(settings.total_cost(16), Credits::new(750.0));
    }

    #[test]
    #[should_panic(expected = "team_size must be positive")]
    fn test_total_cost_rejects_empty_team() {
        DefinitionSettings::default().total_cost(0);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let negative_cost = DefinitionSettings {
            restore_cost: Credits::new(-1.0),
            ..DefinitionSettings::default()
        };
        assert!(negative_cost.validate().is_err());

        let negative_scale = DefinitionSettings {
            scale: -0.5,
            ..DefinitionSettings::default()
        };
        assert!(negative_scale.validate().is_err());

        let bad_limit = DefinitionSettings {
            max_restore_count: -2,
            ..DefinitionSettings::default()
        };
        assert!(bad_limit.validate().is_err());

        let zero_limit = DefinitionSettings {
            max_restore_count: 0,
            ..DefinitionSettings::default()
        };
        assert!(zero_limit.validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = FundingConfig {
            enabled: false,
            allow_refund: true,
            defaults: DefinitionSettings {
                restore_cost: Credits::new(1500.0),
                scale_with_player_count: false,
                scale: 1.0,
                max_restore_count: 3,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: FundingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
