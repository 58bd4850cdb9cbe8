mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};

use jungle_dash::config::Features;
use jungle_dash::entities::{Action, GameStatus, SoundEvent};
use jungle_dash::{Game, GameConfig, GameResult};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Frames a pickup/hit message stays in the HUD.
const TOAST_FRAMES: u32 = 30;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn toast_for(event: SoundEvent) -> &'static str {
    match event {
        SoundEvent::CoinPickup => "+coin",
        SoundEvent::PowerPickup => "POWER UP!",
        SoundEvent::ShieldPickup => "SHIELD!",
        SoundEvent::HazardHit => "OUCH!",
        SoundEvent::GameOver => "",
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Features),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "🌴  JUNGLE  DASH  🌴";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select level set:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Classic", Color::Green, "Obstacles and coins"),
        ("2", "Wild   ", Color::Yellow, "+ birds and floating platforms"),
        ("3", "Full   ", Color::Cyan, "+ flight, shield and x2 pickups"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("SPACE : Jump   ↑ ↓ : Steer while surfing   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let code = match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => code,
            Ok(_) => continue,
            // Input thread gone.
            Err(_) => return Ok(MenuResult::Quit),
        };
        let features = match code {
            KeyCode::Char('1') => Features {
                obstacles: true,
                ..Features::minimal()
            },
            KeyCode::Char('2') => Features {
                power_ups: false,
                ..Features::default()
            },
            KeyCode::Char('3') => Features::default(),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => continue,
        };
        return Ok(MenuResult::Start(features));
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event per key.  Each frame the set of live keys is compared against the
/// previous frame's and the differences become `on_press` / `on_release`
/// calls, so the core sees clean edges on every kind of terminal.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    fixed_seed: bool,
) -> std::io::Result<bool> {
    let bindings: [(Action, &[KeyCode]); 3] = [
        (Action::Jump, &[KeyCode::Char(' '), KeyCode::Char('w'), KeyCode::Char('W')]),
        (Action::Up, &[KeyCode::Up]),
        (Action::Down, &[KeyCode::Down]),
    ];

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut held: HashMap<Action, bool> = HashMap::new();
    let mut toast: Option<(&'static str, u32)> = None;
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            game.on_press(Action::Exit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            game.on_press(Action::Exit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if game.status() == GameStatus::GameOver =>
                        {
                            if fixed_seed {
                                game.on_press(Action::Restart);
                            } else {
                                game.restart_with_seed(rand::random());
                            }
                            held.clear();
                            toast = None;
                        }
                        KeyCode::Char('m') | KeyCode::Char('M')
                            if game.status() == GameStatus::GameOver =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        if game.exit_requested() {
            return Ok(true);
        }

        // ── Turn held keys into press/release edges ───────────────────────────
        for (action, keys) in &bindings {
            let now = keys.iter().any(|k| is_held(&key_frame, k, frame));
            let before = held.insert(*action, now).unwrap_or(false);
            match (before, now) {
                (false, true) => game.on_press(*action),
                (true, false) => game.on_release(*action),
                _ => {}
            }
        }

        let dt = last.elapsed().as_secs_f32();
        last = Instant::now();
        game.update(dt);

        for event in game.drain_events() {
            log::debug!("sound cue {:?}", event);
            if event != SoundEvent::GameOver {
                toast = Some((toast_for(event), TOAST_FRAMES));
            }
        }
        toast = toast.and_then(|(msg, left)| (left > 0).then_some((msg, left - 1)));

        display::render(out, &game.snapshot(), toast.map(|(msg, _)| msg))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> GameResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    jungle_dash::logging::init_log(&config.logging)?;
    log::info!("starting jungle dash");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    if let Err(e) = with_terminal(&mut out, |out, rx| run(out, rx, &config)) {
        log::error!("terminal error: {}", e);
        return Err(e.into());
    }
    Ok(())
}

/// Sets up raw mode and the input thread, runs `body`, and always restores the
/// terminal afterwards.
fn with_terminal<W: Write>(
    out: &mut W,
    body: impl FnOnce(&mut W, &mpsc::Receiver<Event>) -> std::io::Result<()>,
) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = body(out, &rx);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, base: &GameConfig) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start(features) => {
                let config = GameConfig {
                    features,
                    ..base.clone()
                };
                let seed = config.seed.unwrap_or_else(rand::random);
                log::info!("new run: {:?}, seed {}", config.features, seed);

                let mut game = Game::new(config, seed);
                let quit = game_loop(out, &mut game, rx, base.seed.is_some())?;
                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
