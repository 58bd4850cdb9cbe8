/// Collision & effects: overlaps between the player and world entities.
///
/// Collectibles are consumed and grant score, health or power-ups.  Obstacles
/// and flying hazards damage the player unless immunity is active, in which
/// case they are passed through and stay in the world.  Platforms only carry
/// the player and are handled by the movement code.

use crate::config::{DamagePolicy, GameConfig};
use crate::entities::{
    Category, CollectibleKind, EntityKind, Player, PowerUpKind, SoundEvent, World,
};
use crate::player;

/// Applies every overlap for this frame and removes consumed entities.
pub fn resolve(player: &mut Player, world: &mut World, config: &GameConfig, events: &mut Vec<SoundEvent>) {
    collect_pickups(player, world, config, events);
    take_hits(player, world, config, events);

    for category in Category::ALL {
        world.entities_mut(category).retain(|e| e.active);
    }
}

fn collect_pickups(
    player: &mut Player,
    world: &mut World,
    config: &GameConfig,
    events: &mut Vec<SoundEvent>,
) {
    let bounds = player.bounds();
    let duration = config.player.power_up_duration;

    for item in world.collectibles.iter_mut() {
        if !item.active || !item.bounds.overlaps(&bounds) {
            continue;
        }
        let EntityKind::Collectible(kind) = item.kind else {
            continue;
        };
        item.active = false;

        match kind {
            CollectibleKind::Plain => {
                let multiplier = if player.power_ups.is_active(PowerUpKind::ScoreMultiplier) {
                    2
                } else {
                    1
                };
                player.score = player
                    .score
                    .saturating_add(config.player.coin_score.saturating_mul(multiplier));
                player.health = player::heal(player.health, config.player.coin_heal, player.max_health);
                events.push(SoundEvent::CoinPickup);
            }
            CollectibleKind::Special => {
                player.power_ups.activate(PowerUpKind::Flight, duration);
                player::enter_surfing(player);
                log::debug!("flight active for {:.1}s", duration);
                events.push(SoundEvent::PowerPickup);
            }
            CollectibleKind::Shield => {
                player.power_ups.activate(PowerUpKind::Immunity, duration);
                log::debug!("immunity active for {:.1}s", duration);
                events.push(SoundEvent::ShieldPickup);
            }
            CollectibleKind::Multiplier => {
                player.power_ups.activate(PowerUpKind::ScoreMultiplier, duration);
                log::debug!("score multiplier active for {:.1}s", duration);
                events.push(SoundEvent::PowerPickup);
            }
        }
    }
}

fn take_hits(player: &mut Player, world: &mut World, config: &GameConfig, events: &mut Vec<SoundEvent>) {
    if player.power_ups.is_active(PowerUpKind::Immunity) {
        return;
    }

    let bounds = player.bounds();
    let mut damaged = false;

    for hazard in world.obstacles.iter_mut().chain(world.hazards.iter_mut()) {
        if !hazard.active || !hazard.bounds.overlaps(&bounds) {
            continue;
        }
        hazard.active = false;

        let deal = match config.player.damage_policy {
            DamagePolicy::PerHazard => true,
            DamagePolicy::OncePerFrame => !damaged,
        };
        if deal {
            player.health =
                player::apply_damage(player.health, config.player.hazard_damage, player.max_health);
            damaged = true;
        }
        player::crash(player, &config.physics);
        events.push(SoundEvent::HazardHit);
    }

    debug_assert!(player.health <= player.max_health);
}
