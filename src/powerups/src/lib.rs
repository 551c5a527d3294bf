//! Power-up inventory and timed activation.
//!
//! Inventory entries are keyed by (theme, kind); granting an existing pair
//! bumps its quantity. Activating a timed kind moves one unit into the
//! active set, whose remaining durations only ever decrease via [`PowerUpRegistry::tick`].
//! An entry that reaches zero remaining is removed before it can ever be
//! persisted as active.

pub mod kind;

pub use kind::{PowerUpKind, PowerUpMeta};

use error::EngineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;
use theme::Theme;

/// An inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Derived id, stable across replays: `<theme>_<kind>`.
    pub id: String,
    pub kind: PowerUpKind,
    pub theme: Theme,
    pub quantity: u32,
    pub duration_secs: u64,
    pub acquired_at: SystemTime,
}

/// A running timed effect.
///
/// Invariant: `remaining_secs <= duration_secs as f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub id: String,
    pub powerup_id: String,
    pub kind: PowerUpKind,
    pub activated_at: SystemTime,
    pub duration_secs: u64,
    pub remaining_secs: f64,
}

/// What an activation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Permanent or instant effect; applied directly, no timer entry.
    Instant(PowerUpKind),
    /// Timed effect now counting down.
    Timed(ActivePowerUp),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PowerUpRegistry {
    inventory: BTreeMap<String, PowerUp>,
    active: BTreeMap<String, ActivePowerUp>,
    /// Monotonic counter giving timed activations distinct, replay-stable ids.
    activation_seq: u64,
}

impl PowerUpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inventory(&self) -> impl Iterator<Item = &PowerUp> {
        self.inventory.values()
    }

    pub fn active(&self) -> impl Iterator<Item = &ActivePowerUp> {
        self.active.values()
    }

    pub fn get(&self, powerup_id: &str) -> Option<&PowerUp> {
        self.inventory.get(powerup_id)
    }

    /// Total quantity of a kind in inventory, optionally filtered by theme.
    pub fn count(&self, kind: PowerUpKind, theme: Option<Theme>) -> u32 {
        self.inventory
            .values()
            .filter(|p| p.kind == kind && theme.is_none_or(|t| p.theme == t))
            .map(|p| p.quantity)
            .sum()
    }

    pub fn has_active(&self, kind: PowerUpKind) -> bool {
        self.active.values().any(|a| a.kind == kind)
    }

    /// Add one unit of (kind, theme) to the inventory, creating the entry
    /// on first grant.
    pub fn grant(&mut self, kind: PowerUpKind, theme: Theme, now: SystemTime) -> &PowerUp {
        let id = format!("{}_{}", theme.key(), kind.key());
        let entry = self.inventory.entry(id.clone()).or_insert_with(|| PowerUp {
            id,
            kind,
            theme,
            quantity: 0,
            duration_secs: kind.meta().duration_secs,
            acquired_at: now,
        });
        entry.quantity = entry.quantity.saturating_add(1);
        entry
    }

    /// Consume one unit. Timed kinds start a countdown entry; instant kinds
    /// report back for the caller to apply directly.
    pub fn activate(
        &mut self,
        powerup_id: &str,
        now: SystemTime,
    ) -> Result<Activation, EngineError> {
        let powerup = self
            .inventory
            .get_mut(powerup_id)
            .ok_or_else(|| EngineError::NotFound(format!("power-up {powerup_id}")))?;
        if powerup.quantity == 0 {
            return Err(EngineError::Validation(format!(
                "power-up {powerup_id} has no remaining quantity"
            )));
        }

        powerup.quantity -= 1;
        let kind = powerup.kind;
        let duration_secs = powerup.duration_secs;
        let depleted = powerup.quantity == 0;

        let activation = if duration_secs > 0 {
            let active_id = format!("{powerup_id}#{}", self.activation_seq);
            self.activation_seq += 1;
            let active = ActivePowerUp {
                id: active_id.clone(),
                powerup_id: powerup_id.to_string(),
                kind,
                activated_at: now,
                duration_secs,
                remaining_secs: duration_secs as f64,
            };
            self.active.insert(active_id.clone(), active.clone());
            Activation::Timed(active)
        } else {
            Activation::Instant(kind)
        };

        // A depleted entry stays only while an active countdown still
        // references it.
        if depleted && !self.active.values().any(|a| a.powerup_id == powerup_id) {
            self.inventory.remove(powerup_id);
        }

        Ok(activation)
    }

    /// Advance every active countdown by `delta_secs`, flooring at zero.
    /// Entries that reach zero are removed and returned as expired.
    pub fn tick(&mut self, delta_secs: f64) -> Vec<ActivePowerUp> {
        let delta = delta_secs.max(0.0);
        let mut expired = Vec::new();

        for active in self.active.values_mut() {
            active.remaining_secs = (active.remaining_secs - delta).max(0.0);
        }
        let expired_ids: Vec<String> = self
            .active
            .values()
            .filter(|a| a.remaining_secs <= 0.0)
            .map(|a| a.id.clone())
            .collect();
        for id in expired_ids {
            if let Some(active) = self.active.remove(&id) {
                expired.push(active);
            }
        }

        // Drop depleted inventory entries that were only kept alive for
        // their countdown.
        let orphaned: Vec<String> = self
            .inventory
            .values()
            .filter(|p| p.quantity == 0)
            .filter(|p| !self.active.values().any(|a| a.powerup_id == p.id))
            .map(|p| p.id.clone())
            .collect();
        for id in orphaned {
            self.inventory.remove(&id);
        }

        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH
    }

    #[test]
    fn granting_same_pair_stacks_quantity() {
        let mut registry = PowerUpRegistry::new();
        registry.grant(PowerUpKind::Mushroom, Theme::Mario, now());
        let second = registry.grant(PowerUpKind::Mushroom, Theme::Mario, now());
        assert_eq!(second.quantity, 2);
        assert_eq!(registry.inventory().count(), 1);
        assert_eq!(registry.count(PowerUpKind::Mushroom, Some(Theme::Mario)), 2);
    }

    #[test]
    fn distinct_themes_keep_distinct_entries() {
        let mut registry = PowerUpRegistry::new();
        registry.grant(PowerUpKind::Banana, Theme::Dkc, now());
        registry.grant(PowerUpKind::Mushroom, Theme::Mario, now());
        assert_eq!(registry.inventory().count(), 2);
    }

    #[test]
    fn activating_instant_kind_consumes_and_reports() {
        let mut registry = PowerUpRegistry::new();
        registry.grant(PowerUpKind::Mushroom, Theme::Mario, now());

        let activation = registry.activate("mario_mushroom", now()).expect("activate");
        assert_eq!(activation, Activation::Instant(PowerUpKind::Mushroom));
        // Depleted instant entry is removed outright.
        assert!(registry.get("mario_mushroom").is_none());
        assert_eq!(registry.active().count(), 0);
    }

    #[test]
    fn activating_timed_kind_starts_countdown() {
        let mut registry = PowerUpRegistry::new();
        registry.grant(PowerUpKind::FireFlower, Theme::Mario, now());

        let activation = registry
            .activate("mario_fire_flower", now())
            .expect("activate");
        let active = match activation {
            Activation::Timed(active) => active,
            other => panic!("expected timed activation, got {other:?}"),
        };
        assert_eq!(active.duration_secs, 60);
        assert_eq!(active.remaining_secs, 60.0);
        assert_eq!(registry.active().count(), 1);
        // Depleted entry survives while its countdown runs.
        assert!(registry.get("mario_fire_flower").is_some());
    }

    #[test]
    fn activation_fails_on_unknown_or_empty() {
        let mut registry = PowerUpRegistry::new();
        assert!(matches!(
            registry.activate("mario_star", now()),
            Err(EngineError::NotFound(_))
        ));

        registry.grant(PowerUpKind::Star, Theme::Mario, now());
        registry.activate("mario_star", now()).expect("first use");
        // Entry kept for the countdown but quantity is zero now.
        assert!(registry.activate("mario_star", now()).is_err());
    }

    #[test]
    fn tick_floors_at_zero_and_returns_expired() {
        let mut registry = PowerUpRegistry::new();
        registry.grant(PowerUpKind::Star, Theme::Mario, now());
        registry.activate("mario_star", now()).expect("activate");

        assert!(registry.tick(29.0).is_empty());
        let remaining = registry.active().next().expect("still active").remaining_secs;
        assert!((remaining - 1.0).abs() < 1e-9);

        let expired = registry.tick(5.0);
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].remaining_secs, 0.0);
        assert_eq!(registry.active().count(), 0);
        // Countdown gone, depleted entry is cleaned up too.
        assert!(registry.get("mario_star").is_none());
    }

    #[test]
    fn remaining_never_exceeds_duration() {
        let mut registry = PowerUpRegistry::new();
        registry.grant(PowerUpKind::GoldenBanana, Theme::Dkc, now());
        registry.activate("dkc_golden_banana", now()).expect("activate");

        registry.tick(-10.0); // hostile delta must not rewind the clock
        for active in registry.active() {
            assert!(active.remaining_secs <= active.duration_secs as f64);
        }
    }

    #[test]
    fn registry_roundtrips_through_json() {
        let mut registry = PowerUpRegistry::new();
        registry.grant(PowerUpKind::FireFlower, Theme::Mario, now());
        registry.grant(PowerUpKind::Shield, Theme::Zelda, now());
        registry.activate("mario_fire_flower", now()).expect("activate");
        registry.tick(12.5);

        let json = serde_json::to_string(&registry).expect("serialize");
        let back: PowerUpRegistry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(registry, back);
    }
}
