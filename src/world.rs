/// Procedural level generation.
///
/// Content is generated lazily per category: whenever a category's rightmost
/// entity falls within `spawn_distance` of the player, the generator extends
/// it to `2 × spawn_distance` ahead.  Ground segments form a fixed ring that
/// is recycled rather than regenerated.

use std::collections::VecDeque;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::config::{GameConfig, SpawnConfig};
use crate::entities::{
    Category, CollectibleKind, Entity, EntityKind, Frontier, GroundSegment, Rect, World,
};

/// Attempts per placement before it is dropped.
const MAX_PLACEMENT_RETRIES: usize = 8;

/// Minimum clear space kept between conflicting categories.
const PLACEMENT_MARGIN: f32 = 10.0;

// ── Construction ─────────────────────────────────────────────────────────────

/// An empty world with the ground ring laid from the camera's left edge.
pub fn new_world(config: &GameConfig) -> World {
    let start = config.player.start_x - config.world.camera_offset;
    let width = config.world.ground_width;
    let horizon = (0..config.world.ground_segments)
        .map(|i| GroundSegment {
            x: start + i as f32 * width,
            width,
        })
        .collect::<VecDeque<_>>();

    World {
        obstacles: Vec::new(),
        collectibles: Vec::new(),
        hazards: Vec::new(),
        platforms: Vec::new(),
        horizon,
        next_id: 0,
    }
}

/// Initial population pass, run at level start and on every restart.
pub fn populate(
    world: &mut World,
    frontier: &mut Frontier,
    player_x: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let x_min = player_x + config.world.safe_zone;
    let x_max = player_x + 2.0 * config.world.spawn_distance;
    for category in Category::ALL {
        if config.features.enables(category) {
            extend(world, frontier, category, x_min, x_max, config, rng);
        }
    }
    top_up(world, frontier, player_x, config, rng);
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Right edge of the rightmost active entity, or 0.0 for an empty category.
pub fn rightmost(entities: &[Entity]) -> f32 {
    entities
        .iter()
        .filter(|e| e.active)
        .map(Entity::right)
        .fold(0.0, f32::max)
}

// ── Generation ───────────────────────────────────────────────────────────────

/// Fills `[x_min, x_max)` with entities of `category`.
///
/// A cursor starts at `x_min`; each step places one entity and advances by
/// its width plus a random gap.  An empty or inverted range does nothing and
/// draws no random numbers.  Returns the number of entities placed.
pub fn extend(
    world: &mut World,
    frontier: &mut Frontier,
    category: Category,
    x_min: f32,
    x_max: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> usize {
    if x_max <= x_min {
        return 0;
    }

    let spawn = config.world.spawn(category);
    let mut cursor = x_min;
    let mut placed = 0;

    while cursor < x_max {
        let y = pick_height(spawn, rng);
        let kind = pick_kind(category, config, rng);
        let landed_at = match place(world, category, kind, cursor, y, spawn, x_max) {
            Some(x) => {
                placed += 1;
                x
            }
            None => {
                log::debug!("dropped {} placement at x={:.0}", category.name(), cursor);
                cursor
            }
        };
        cursor = landed_at.max(cursor) + spawn.width + rng.gen_range(spawn.gap_min..=spawn.gap_max);
    }

    frontier.advance(category, cursor);
    log::trace!(
        "extended {} over [{:.0}, {:.0}): {} placed, frontier {:.0}",
        category.name(),
        x_min,
        x_max,
        placed,
        cursor
    );
    placed
}

/// Keeps every enabled category populated at least `spawn_distance` ahead of
/// the player.
pub fn top_up(
    world: &mut World,
    frontier: &mut Frontier,
    player_x: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let lookahead = player_x + config.world.spawn_distance;
    let x_max = player_x + 2.0 * config.world.spawn_distance;

    for category in Category::ALL {
        if !config.features.enables(category) {
            continue;
        }
        if rightmost(world.entities(category)) >= lookahead {
            continue;
        }

        let start = frontier.get(category).max(lookahead);
        let x_min = if start < x_max { start } else { lookahead };
        extend(world, frontier, category, x_min, x_max, config, rng);

        if rightmost(world.entities(category)) < lookahead {
            log::warn!(
                "{} fell behind the spawn frontier at x={:.0}; forcing a placement",
                category.name(),
                lookahead
            );
            let spawn = config.world.spawn(category);
            let y = pick_height(spawn, rng);
            let kind = pick_kind(category, config, rng);
            spawn_entity(world, kind, Rect::new(lookahead, y, spawn.width, spawn.height));
            frontier.advance(category, lookahead + spawn.width);
        }
    }
}

/// Moves ground segments that have scrolled behind the camera to the front of
/// the ring.
pub fn recycle_horizon(world: &mut World, camera_x: f32) {
    while world
        .horizon
        .front()
        .map_or(false, |seg| seg.right() < camera_x)
    {
        let tail = match world.horizon.back() {
            Some(seg) => seg.right(),
            None => return,
        };
        if let Some(mut seg) = world.horizon.pop_front() {
            seg.x = tail;
            world.horizon.push_back(seg);
        }
    }
}

/// Drops entities that are entirely behind the camera.
pub fn cull(world: &mut World, camera_x: f32) {
    for category in Category::ALL {
        world
            .entities_mut(category)
            .retain(|e| e.right() >= camera_x);
    }
}

/// Frame step for the generator: recycle ground, cull, then top up.
pub fn maintain(
    world: &mut World,
    frontier: &mut Frontier,
    player_x: f32,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let camera_x = player_x - config.world.camera_offset;
    recycle_horizon(world, camera_x);
    cull(world, camera_x);
    top_up(world, frontier, player_x, config, rng);
}

// ── Placement ────────────────────────────────────────────────────────────────

fn pick_height(spawn: &SpawnConfig, rng: &mut impl Rng) -> f32 {
    spawn.heights[rng.gen_range(0..spawn.heights.len())]
}

fn pick_kind(category: Category, config: &GameConfig, rng: &mut impl Rng) -> EntityKind {
    match category {
        Category::Obstacle => EntityKind::Obstacle,
        Category::Hazard => EntityKind::Hazard,
        Category::Platform => EntityKind::Platform,
        Category::Collectible if !config.features.power_ups => {
            EntityKind::Collectible(CollectibleKind::Plain)
        }
        Category::Collectible => {
            let table = config.world.collectible_weights.table();
            let kind = match WeightedIndex::new(table.iter().map(|(_, w)| *w)) {
                Ok(dist) => table[dist.sample(rng)].0,
                Err(_) => CollectibleKind::Plain,
            };
            EntityKind::Collectible(kind)
        }
    }
}

fn spawn_entity(world: &mut World, kind: EntityKind, bounds: Rect) -> u64 {
    let id = world.next_id;
    world.next_id += 1;
    world
        .entities_mut(kind.category())
        .push(Entity::new(id, kind, bounds));
    id
}

/// First active entity in `others` whose x-range clashes with `bounds`.
fn conflict(others: &[Entity], bounds: &Rect) -> Option<Rect> {
    others
        .iter()
        .filter(|e| e.active)
        .find(|e| e.bounds.overlaps_span(bounds, PLACEMENT_MARGIN))
        .map(|e| e.bounds)
}

/// Places one entity near `x`, resolving conflicts per category.  Returns the
/// x it finally landed at, or `None` if it was dropped.
fn place(
    world: &mut World,
    category: Category,
    kind: EntityKind,
    x: f32,
    y: f32,
    spawn: &SpawnConfig,
    x_max: f32,
) -> Option<f32> {
    let mut bounds = Rect::new(x, y, spawn.width, spawn.height);

    for _ in 0..MAX_PLACEMENT_RETRIES {
        let blocker = match category {
            Category::Obstacle => conflict(&world.collectibles, &bounds),
            Category::Collectible => conflict(&world.obstacles, &bounds),
            Category::Platform => conflict(&world.hazards, &bounds),
            Category::Hazard => None,
        };

        let Some(blocker) = blocker else {
            spawn_entity(world, kind, bounds);
            return Some(bounds.x);
        };

        bounds.x = match category {
            // Nudge past the collectible.
            Category::Obstacle => blocker.right() + PLACEMENT_MARGIN,
            // Shift in front of the obstacle.
            Category::Collectible => blocker.x - spawn.width - PLACEMENT_MARGIN,
            // Skip beyond the hazard's span.
            Category::Platform => blocker.right() + spawn.gap_min.max(PLACEMENT_MARGIN),
            Category::Hazard => bounds.x,
        };
        if category == Category::Platform && bounds.x >= x_max {
            return None;
        }
    }
    None
}
