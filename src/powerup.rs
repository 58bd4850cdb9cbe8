/// Timed buffs.  Each power-up counts down on its own; pickups refresh the
/// timer to the full duration instead of stacking.

use crate::config::PhysicsConfig;
use crate::entities::{Player, PowerUpKind, PowerUps};
use crate::player;

impl PowerUps {
    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        match kind {
            PowerUpKind::Flight => self.flight,
            PowerUpKind::Immunity => self.immunity,
            PowerUpKind::ScoreMultiplier => self.multiplier,
        }
    }

    fn timer_mut(&mut self, kind: PowerUpKind) -> &mut f32 {
        match kind {
            PowerUpKind::Flight => &mut self.flight,
            PowerUpKind::Immunity => &mut self.immunity,
            PowerUpKind::ScoreMultiplier => &mut self.multiplier,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.remaining(kind) > 0.0
    }

    /// Sets `kind` to `duration`, leaving the other timers untouched.
    pub fn activate(&mut self, kind: PowerUpKind, duration: f32) {
        *self.timer_mut(kind) = duration;
    }

    /// Counts every running timer down by `dt` and returns those that ran out.
    pub fn tick(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let timer = self.timer_mut(kind);
            if *timer > 0.0 {
                *timer -= dt;
                if *timer <= 0.0 {
                    *timer = 0.0;
                    expired.push(kind);
                }
            }
        }
        expired
    }
}

/// Advances the player's power-up timers and reverts whatever expired.
pub fn update(player: &mut Player, physics: &PhysicsConfig, dt: f32) {
    for kind in player.power_ups.tick(dt) {
        log::debug!("power-up {:?} expired", kind);
        if kind == PowerUpKind::Flight {
            player::end_surfing(player, physics);
        }
    }
}
