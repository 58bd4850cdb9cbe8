/// All game entity types — plain data plus geometry helpers, no game rules.

use std::collections::VecDeque;

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box.  `x, y` is the bottom-left corner; y grows upward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// Overlap of the horizontal spans only, widened by `margin` on each side.
    pub fn overlaps_span(&self, other: &Rect, margin: f32) -> bool {
        self.x - margin < other.right() && other.x < self.right() + margin
    }
}

// ── Kinds ────────────────────────────────────────────────────────────────────

/// Entity collections, in the order the generator tops them up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Obstacle,
    Collectible,
    Hazard,
    Platform,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Obstacle,
        Category::Collectible,
        Category::Hazard,
        Category::Platform,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Obstacle => "obstacles",
            Category::Collectible => "collectibles",
            Category::Hazard => "hazards",
            Category::Platform => "platforms",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Coin: score and a little health.
    Plain,
    /// Grants flight (surfing).
    Special,
    /// Grants damage immunity.
    Shield,
    /// Doubles coin score.
    Multiplier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Obstacle,
    Collectible(CollectibleKind),
    /// Flying creature.
    Hazard,
    Platform,
}

impl EntityKind {
    pub fn category(&self) -> Category {
        match self {
            EntityKind::Obstacle => Category::Obstacle,
            EntityKind::Collectible(_) => Category::Collectible,
            EntityKind::Hazard => Category::Hazard,
            EntityKind::Platform => Category::Platform,
        }
    }
}

// ── World objects ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: u64,
    pub kind: EntityKind,
    pub bounds: Rect,
    /// Platforms only: crumbled after the player stepped off.
    pub broken: bool,
    pub active: bool,
}

impl Entity {
    pub fn new(id: u64, kind: EntityKind, bounds: Rect) -> Self {
        Entity {
            id,
            kind,
            bounds,
            broken: false,
            active: true,
        }
    }

    pub fn right(&self) -> f32 {
        self.bounds.right()
    }
}

/// One tile of the recycled ground strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundSegment {
    pub x: f32,
    pub width: f32,
}

impl GroundSegment {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub obstacles: Vec<Entity>,
    pub collectibles: Vec<Entity>,
    pub hazards: Vec<Entity>,
    pub platforms: Vec<Entity>,
    /// Ground ring, leftmost segment first.
    pub horizon: VecDeque<GroundSegment>,
    pub next_id: u64,
}

impl World {
    pub fn entities(&self, category: Category) -> &Vec<Entity> {
        match category {
            Category::Obstacle => &self.obstacles,
            Category::Collectible => &self.collectibles,
            Category::Hazard => &self.hazards,
            Category::Platform => &self.platforms,
        }
    }

    pub fn entities_mut(&mut self, category: Category) -> &mut Vec<Entity> {
        match category {
            Category::Obstacle => &mut self.obstacles,
            Category::Collectible => &mut self.collectibles,
            Category::Hazard => &mut self.hazards,
            Category::Platform => &mut self.platforms,
        }
    }

    /// Active entities across every category, in top-up order.
    pub fn iter_active(&self) -> impl Iterator<Item = &Entity> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.entities(c).iter())
            .filter(|e| e.active)
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// Before the run starts.
    Idling,
    Running,
    /// Airborne under gravity, rising or falling.
    Jumping,
    /// One-frame pulse on a damaging hit.
    Crashing,
    /// Flight power-up active: no gravity, steered vertically.
    Surfing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    Flight,
    Immunity,
    ScoreMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Flight,
        PowerUpKind::Immunity,
        PowerUpKind::ScoreMultiplier,
    ];
}

/// Remaining seconds per power-up; 0 means inactive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerUps {
    pub flight: f32,
    pub immunity: f32,
    pub multiplier: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub state: MotionState,
    pub health: u32,
    pub max_health: u32,
    pub score: u32,
    pub power_ups: PowerUps,
    pub anim_frame: usize,
    pub anim_timer: f32,
    pub jump_held: bool,
    /// Surf steering: -1 down, 0 none, +1 up.
    pub vertical_input: i8,
    /// Platform id the player is standing on.
    pub standing_on: Option<u64>,
    /// Set for the update in which a crash happened.
    pub crashed: bool,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Rightmost x each category has been generated up to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frontier {
    pub obstacles: f32,
    pub collectibles: f32,
    pub hazards: f32,
    pub platforms: f32,
}

impl Frontier {
    pub fn get(&self, category: Category) -> f32 {
        match category {
            Category::Obstacle => self.obstacles,
            Category::Collectible => self.collectibles,
            Category::Hazard => self.hazards,
            Category::Platform => self.platforms,
        }
    }

    /// Raises the frontier; never moves it back.
    pub fn advance(&mut self, category: Category, x: f32) {
        let slot = match category {
            Category::Obstacle => &mut self.obstacles,
            Category::Collectible => &mut self.collectibles,
            Category::Hazard => &mut self.hazards,
            Category::Platform => &mut self.platforms,
        };
        *slot = slot.max(x);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub elapsed: f32,
    pub status: GameStatus,
    pub frontier: Frontier,
    pub exit_requested: bool,
}

// ── Input / output ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Up,
    Down,
    Exit,
    Restart,
}

/// Cues for the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    CoinPickup,
    PowerPickup,
    ShieldPickup,
    HazardHit,
    GameOver,
}

// ── Master game state ────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so the frame pipeline can return a
/// new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub session: Session,
    pub world: World,
    /// Sound cues emitted by the most recent update.
    pub events: Vec<SoundEvent>,
}
