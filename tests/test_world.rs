use jungle_dash::compute::{init_state, press, release, tick};
use jungle_dash::config::{CollectibleWeights, Features, GameConfig, PlayerConfig, WorldConfig};
use jungle_dash::entities::*;
use jungle_dash::world::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn empty(config: &GameConfig) -> (World, Frontier) {
    (new_world(config), Frontier::default())
}

// ── extend ────────────────────────────────────────────────────────────────────

#[test]
fn extend_empty_range_is_a_no_op() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let mut rng = seeded_rng();
    let before_rng = rng.clone();

    assert_eq!(extend(&mut world, &mut frontier, Category::Obstacle, 500.0, 500.0, &cfg, &mut rng), 0);
    assert_eq!(extend(&mut world, &mut frontier, Category::Obstacle, 900.0, 500.0, &cfg, &mut rng), 0);

    assert!(world.obstacles.is_empty());
    assert_eq!(frontier, Frontier::default());
    // No random numbers were drawn.
    assert_eq!(rng.clone().gen::<u64>(), before_rng.clone().gen::<u64>());
}

#[test]
fn extend_spaces_entities_by_configured_gap() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let placed = extend(&mut world, &mut frontier, Category::Obstacle, 1000.0, 5000.0, &cfg, &mut seeded_rng());

    assert_eq!(placed, world.obstacles.len());
    assert!(placed >= 5);
    for pair in world.obstacles.windows(2) {
        let gap = pair[1].bounds.x - pair[0].right();
        assert!(gap >= 350.0 - 0.01 && gap <= 700.0 + 0.01, "gap {gap}");
    }
    assert!(world.obstacles.iter().all(|o| o.bounds.x >= 1000.0 && o.bounds.x < 5000.0));
    assert!(frontier.get(Category::Obstacle) >= 5000.0);
}

#[test]
fn extend_picks_heights_from_table() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let mut rng = seeded_rng();
    extend(&mut world, &mut frontier, Category::Obstacle, 0.0, 8000.0, &cfg, &mut rng);
    extend(&mut world, &mut frontier, Category::Hazard, 0.0, 8000.0, &cfg, &mut rng);

    assert!(world.obstacles.iter().all(|o| o.bounds.y == 0.0));
    assert!(world
        .hazards
        .iter()
        .all(|h| h.bounds.y == 100.0 || h.bounds.y == 190.0));
}

#[test]
fn extend_assigns_unique_ids() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let mut rng = seeded_rng();
    for category in Category::ALL {
        extend(&mut world, &mut frontier, category, 0.0, 6000.0, &cfg, &mut rng);
    }
    let mut ids: Vec<u64> = world.iter_active().map(|e| e.id).collect();
    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn collectibles_never_overlap_obstacles() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let mut rng = seeded_rng();
    extend(&mut world, &mut frontier, Category::Obstacle, 1000.0, 9000.0, &cfg, &mut rng);
    extend(&mut world, &mut frontier, Category::Collectible, 1000.0, 9000.0, &cfg, &mut rng);

    assert!(!world.collectibles.is_empty());
    for coin in &world.collectibles {
        assert!(world
            .obstacles
            .iter()
            .all(|o| !o.bounds.overlaps_span(&coin.bounds, 0.0)));
    }
}

#[test]
fn obstacles_never_overlap_collectibles() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let mut rng = seeded_rng();
    extend(&mut world, &mut frontier, Category::Collectible, 1000.0, 9000.0, &cfg, &mut rng);
    extend(&mut world, &mut frontier, Category::Obstacle, 1000.0, 9000.0, &cfg, &mut rng);

    assert!(!world.obstacles.is_empty());
    for obstacle in &world.obstacles {
        assert!(world
            .collectibles
            .iter()
            .all(|c| !c.bounds.overlaps_span(&obstacle.bounds, 0.0)));
    }
}

#[test]
fn platforms_never_overlap_hazards() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let mut rng = seeded_rng();
    extend(&mut world, &mut frontier, Category::Hazard, 1000.0, 9000.0, &cfg, &mut rng);
    extend(&mut world, &mut frontier, Category::Platform, 1000.0, 9000.0, &cfg, &mut rng);

    for platform in &world.platforms {
        assert!(world
            .hazards
            .iter()
            .all(|h| !h.bounds.overlaps_span(&platform.bounds, 0.0)));
    }
}

#[test]
fn collectibles_are_plain_without_power_ups() {
    let cfg = GameConfig {
        features: Features {
            power_ups: false,
            ..Features::default()
        },
        ..GameConfig::default()
    };
    let (mut world, mut frontier) = empty(&cfg);
    extend(&mut world, &mut frontier, Category::Collectible, 0.0, 20000.0, &cfg, &mut seeded_rng());
    assert!(world
        .collectibles
        .iter()
        .all(|c| c.kind == EntityKind::Collectible(CollectibleKind::Plain)));
}

#[test]
fn collectible_kinds_follow_weights() {
    let cfg = GameConfig {
        world: WorldConfig {
            collectible_weights: CollectibleWeights {
                plain: 0,
                special: 0,
                shield: 1,
                multiplier: 0,
            },
            ..WorldConfig::default()
        },
        ..GameConfig::default()
    };
    let (mut world, mut frontier) = empty(&cfg);
    extend(&mut world, &mut frontier, Category::Collectible, 0.0, 5000.0, &cfg, &mut seeded_rng());
    assert!(!world.collectibles.is_empty());
    assert!(world
        .collectibles
        .iter()
        .all(|c| c.kind == EntityKind::Collectible(CollectibleKind::Shield)));
}

// ── rightmost / top_up ────────────────────────────────────────────────────────

#[test]
fn rightmost_of_empty_category_is_zero() {
    assert_eq!(rightmost(&[]), 0.0);
}

#[test]
fn rightmost_ignores_inactive() {
    let mut far = Entity::new(1, EntityKind::Obstacle, Rect::new(900.0, 0.0, 40.0, 60.0));
    far.active = false;
    let near = Entity::new(0, EntityKind::Obstacle, Rect::new(100.0, 0.0, 40.0, 60.0));
    assert_eq!(rightmost(&[near, far]), 140.0);
}

#[test]
fn top_up_fills_every_enabled_category() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    top_up(&mut world, &mut frontier, 5000.0, &cfg, &mut seeded_rng());
    for category in Category::ALL {
        assert!(rightmost(world.entities(category)) >= 6000.0, "{}", category.name());
    }
}

#[test]
fn top_up_skips_disabled_categories() {
    let cfg = GameConfig {
        features: Features::minimal(),
        ..GameConfig::default()
    };
    let (mut world, mut frontier) = empty(&cfg);
    top_up(&mut world, &mut frontier, 0.0, &cfg, &mut seeded_rng());
    assert!(world.obstacles.is_empty());
    assert!(world.hazards.is_empty());
    assert!(world.platforms.is_empty());
    assert!(rightmost(&world.collectibles) >= cfg.world.spawn_distance);
}

#[test]
fn top_up_leaves_satisfied_categories_alone() {
    let cfg = GameConfig::default();
    let (mut world, mut frontier) = empty(&cfg);
    let mut rng = seeded_rng();
    top_up(&mut world, &mut frontier, 0.0, &cfg, &mut rng);
    let before = world.clone();
    top_up(&mut world, &mut frontier, 0.0, &cfg, &mut rng);
    assert_eq!(world, before);
}

#[test]
fn generation_is_deterministic_per_seed() {
    let cfg = GameConfig::default();
    let a = init_state(&cfg, &mut StdRng::seed_from_u64(7));
    let b = init_state(&cfg, &mut StdRng::seed_from_u64(7));
    let c = init_state(&cfg, &mut StdRng::seed_from_u64(8));
    assert_eq!(a.world, b.world);
    assert_ne!(a.world, c.world);
}

#[test]
fn frontier_holds_over_a_long_run() {
    // No damage, so the run never ends.
    let cfg = GameConfig {
        player: PlayerConfig {
            hazard_damage: 0,
            ..PlayerConfig::default()
        },
        ..GameConfig::default()
    };
    let mut rng = seeded_rng();
    let mut dt_rng = StdRng::seed_from_u64(7);
    let mut s = init_state(&cfg, &mut rng);
    s = press(&s, Action::Jump, &cfg);
    s = release(&s, Action::Jump, &cfg);

    for frame in 0..3000 {
        // Occasional long stalls alongside normal frames.
        let dt = if frame % 500 == 499 {
            2.0
        } else {
            dt_rng.gen_range(0.0..0.05)
        };
        s = tick(&s, &cfg, dt, &mut rng);
        assert_eq!(s.session.status, GameStatus::Playing);
        for category in Category::ALL {
            assert!(
                rightmost(s.world.entities(category)) >= s.player.x + cfg.world.spawn_distance,
                "{} behind at frame {frame}",
                category.name()
            );
        }
    }
}

// ── horizon & culling ─────────────────────────────────────────────────────────

#[test]
fn new_world_lays_contiguous_ground() {
    let cfg = GameConfig::default();
    let world = new_world(&cfg);
    assert_eq!(world.horizon.len(), 6);
    assert_eq!(world.horizon[0].x, 0.0);
    for i in 1..world.horizon.len() {
        assert_eq!(world.horizon[i].x, world.horizon[i - 1].right());
    }
}

#[test]
fn recycle_moves_passed_segments_to_the_front() {
    let cfg = GameConfig::default();
    let mut world = new_world(&cfg);
    recycle_horizon(&mut world, 700.0);

    assert_eq!(world.horizon.len(), 6);
    assert_eq!(world.horizon.front().map(|s| s.x), Some(600.0));
    assert_eq!(world.horizon.back().map(|s| s.x), Some(3600.0));
    for i in 1..world.horizon.len() {
        assert_eq!(world.horizon[i].x, world.horizon[i - 1].right());
    }
}

#[test]
fn recycle_keeps_segment_under_camera() {
    let cfg = GameConfig::default();
    let mut world = new_world(&cfg);
    let before = world.horizon.clone();
    recycle_horizon(&mut world, 599.0);
    assert_eq!(world.horizon, before);
}

#[test]
fn cull_drops_entities_behind_camera() {
    let cfg = GameConfig::default();
    let mut world = new_world(&cfg);
    world
        .obstacles
        .push(Entity::new(0, EntityKind::Obstacle, Rect::new(0.0, 0.0, 40.0, 60.0)));
    world
        .hazards
        .push(Entity::new(1, EntityKind::Hazard, Rect::new(80.0, 100.0, 60.0, 40.0)));
    cull(&mut world, 100.0);
    assert!(world.obstacles.is_empty());
    assert_eq!(world.hazards.len(), 1);
}
