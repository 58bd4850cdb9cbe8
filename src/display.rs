/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `Snapshot`.  No
/// game logic is performed; this module only projects world coordinates onto
/// terminal cells and translates them into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use jungle_dash::animation::Variant;
use jungle_dash::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use jungle_dash::entities::{CollectibleKind, EntityKind, GameStatus, MotionState, Rect};
use jungle_dash::snapshot::{EntityView, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGreen;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_INFO: Color = Color::Grey;
const C_GROUND_A: Color = Color::DarkYellow;
const C_GROUND_B: Color = Color::Yellow;
const C_OBSTACLE: Color = Color::Green;
const C_HAZARD: Color = Color::Red;
const C_PLATFORM: Color = Color::DarkYellow;
const C_PLATFORM_BROKEN: Color = Color::DarkGrey;
const C_COIN: Color = Color::Yellow;
const C_FLIGHT: Color = Color::Cyan;
const C_SHIELD: Color = Color::Blue;
const C_MULTIPLIER: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;
const C_POWERUP_ACTIVE: Color = Color::Cyan;

// ── Projection ───────────────────────────────────────────────────────────────

/// Maps world units to terminal cells for the current terminal size.
struct Viewport {
    camera_x: f32,
    width: u16,
    height: u16,
    px_per_col: f32,
    px_per_row: f32,
}

impl Viewport {
    fn new(camera_x: f32, width: u16, height: u16) -> Self {
        let cols = width.saturating_sub(2).max(1) as f32;
        let rows = height.saturating_sub(4).max(1) as f32;
        Viewport {
            camera_x,
            width,
            height,
            px_per_col: SCREEN_WIDTH / cols,
            px_per_row: SCREEN_HEIGHT / rows,
        }
    }

    /// Row holding world y = 0, just above the bottom border.
    fn ground_row(&self) -> i32 {
        self.height as i32 - 3
    }

    fn col(&self, x: f32) -> i32 {
        1 + ((x - self.camera_x) / self.px_per_col).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        self.ground_row() - (y / self.px_per_row).floor() as i32
    }

    fn in_play_area(&self, col: i32, row: i32) -> bool {
        col >= 1 && col < self.width as i32 - 1 && row >= 2 && row <= self.ground_row()
    }

    /// Cell rectangle covered by `bounds`, at least one cell in each direction.
    fn cells(&self, bounds: &Rect) -> (i32, i32, i32, i32) {
        let left = self.col(bounds.x);
        let right = self.col(bounds.right() - 0.01).max(left);
        let bottom = self.row(bounds.y);
        let top = self.row(bounds.top() - 0.01).min(bottom);
        (left, right, top, bottom)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `toast` is a short message shown in the HUD.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot, toast: Option<&str>) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(snap.camera_x, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_ground(out, snap, &view)?;
    for entity in &snap.entities {
        draw_entity(out, entity, &view)?;
    }
    draw_player(out, snap, &view)?;
    draw_hud(out, snap, &view, toast)?;
    draw_controls_hint(out, &view)?;

    if snap.player.state == MotionState::Idling {
        draw_centered(out, &view, &[("Press SPACE to run", Color::White)])?;
    }
    if snap.status == GameStatus::GameOver {
        draw_game_over(out, snap, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    bounds: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let (left, right, top, bottom) = view.cells(bounds);
    out.queue(style::SetForegroundColor(color))?;
    for row in top..=bottom {
        for col in left..=right {
            if view.in_play_area(col, row) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    Ok(())
}

/// Alternating shading shows each recycled segment scrolling past.
fn draw_ground<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let row = view.ground_row() + 1;
    for segment in &snap.ground {
        let (glyph, color) = if (segment.x / segment.width).round() as i64 % 2 == 0 {
            ("▀", C_GROUND_A)
        } else {
            ("▔", C_GROUND_B)
        };
        let left = view.col(segment.x).max(1);
        let right = view.col(segment.right()).min(view.width as i32 - 1);
        if left >= right {
            continue;
        }
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(left as u16, row as u16))?;
        out.queue(Print(glyph.repeat((right - left) as usize)))?;
    }
    Ok(())
}

fn draw_entity<W: Write>(out: &mut W, entity: &EntityView, view: &Viewport) -> std::io::Result<()> {
    match entity.kind {
        EntityKind::Obstacle => fill(out, view, &entity.bounds, "█", C_OBSTACLE),
        EntityKind::Hazard => fill(out, view, &entity.bounds, "v", C_HAZARD),
        EntityKind::Platform if entity.broken => {
            fill(out, view, &entity.bounds, "╍", C_PLATFORM_BROKEN)
        }
        EntityKind::Platform => fill(out, view, &entity.bounds, "▬", C_PLATFORM),
        EntityKind::Collectible(kind) => {
            let (glyph, color) = match kind {
                CollectibleKind::Plain => ("●", C_COIN),
                CollectibleKind::Special => ("★", C_FLIGHT),
                CollectibleKind::Shield => ("◆", C_SHIELD),
                CollectibleKind::Multiplier => ("✚", C_MULTIPLIER),
            };
            fill(out, view, &entity.bounds, glyph, color)
        }
    }
}

fn draw_player<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let p = &snap.player;
    let color = if p.crashed {
        Color::Red
    } else {
        match p.variant {
            Variant::Base => Color::White,
            Variant::Flight => C_FLIGHT,
            Variant::Shield => C_SHIELD,
            Variant::FlightShield => Color::Magenta,
        }
    };
    let glyph = match p.state {
        MotionState::Surfing => "≈",
        MotionState::Jumping => "▲",
        _ => "█",
    };
    fill(out, view, &p.bounds, glyph, color)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    view: &Viewport,
    toast: Option<&str>,
) -> std::io::Result<()> {
    let p = &snap.player;

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", p.score)))?;

    // Health bar
    const BAR: u32 = 10;
    let filled = (p.health * BAR).div_ceil(p.max_health.max(1));
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(format!(
        "  HP[{}{}]{:>4}",
        "█".repeat(filled as usize),
        "░".repeat((BAR - filled.min(BAR)) as usize),
        p.health
    )))?;

    out.queue(style::SetForegroundColor(C_HUD_INFO))?;
    out.queue(Print(format!(
        "  {:>5.1}s  {:>4.0}u/s",
        snap.elapsed, snap.speed
    )))?;

    if let Some(msg) = toast {
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("  {}", msg)))?;
    }

    // Active power-ups — right side
    let mut tags = String::new();
    for (label, remaining) in [
        ("FLY", p.flight_remaining),
        ("SHIELD", p.immunity_remaining),
        ("x2", p.multiplier_remaining),
    ] {
        if remaining > 0.0 {
            tags.push_str(&format!("[{} {:.0}s] ", label, remaining.ceil()));
        }
    }
    if !tags.is_empty() {
        let rx = view.width.saturating_sub(tags.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&tags))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE : Jump   ↑ ↓ : Steer while surfing   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", snap.player.score);
    let time_line = format!("Survived: {:>6.1}s", snap.elapsed);

    draw_centered(
        out,
        view,
        &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            (time_line.as_str(), Color::DarkGrey),
            ("R - Play Again  M - Menu  Q - Quit", Color::White),
        ],
    )
}
