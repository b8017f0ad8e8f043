mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use shmup::compute::{init_state, tick};
use shmup::config::TPS;
use shmup::entities::GameState;
use shmup::input::InputSnapshot;

use display::TerminalSink;

/// One simulation tick.
const FRAME: Duration = Duration::from_nanos(1_000_000_000 / TPS as u64);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 ticks (≈133 ms) at 60 TPS is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Key bindings ──────────────────────────────────────────────────────────────

const LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const SHOOT: &[KeyCode] = &[KeyCode::Char(' '), KeyCode::Char('z'), KeyCode::Char('Z')];
const FOCUS: &[KeyCode] = &[
    KeyCode::Char('x'),
    KeyCode::Char('X'),
    KeyCode::Modifier(ModifierKeyCode::LeftShift),
    KeyCode::Modifier(ModifierKeyCode::RightShift),
];

/// Sample the held keys into this tick's input.
fn snapshot(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputSnapshot {
    InputSnapshot {
        left: any_held(key_frame, LEFT, frame),
        right: any_held(key_frame, RIGHT, frame),
        up: any_held(key_frame, UP, frame),
        down: any_held(key_frame, DOWN, frame),
        shoot: any_held(key_frame, SHOOT, frame),
        focus: any_held(key_frame, FOCUS, frame),
        ..Default::default()
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run fixed-rate ticks until the player quits.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the tick of the last press/repeat event for
/// every key. Each tick we check which keys are still "fresh" and build one
/// `InputSnapshot` from them, so Space, Shift and the arrows can all be held
/// at once. Terminals with keyboard enhancement send proper release events;
/// on the rest, keys expire after `HOLD_WINDOW` ticks of silence.
///
/// Quit keys are only looked at between ticks.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let (width, height) = terminal::size()?;
    let mut sink = TerminalSink::new(width, height);

    // Maps each held key → the tick it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();

    loop {
        let frame_start = Instant::now();
        let frame = state.tick + 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            _ => {}
                        }
                        key_frame.insert(code, frame);
                        // Classic terminals only report Shift as a modifier.
                        if modifiers.contains(KeyModifiers::SHIFT) {
                            key_frame.insert(KeyCode::Modifier(ModifierKeyCode::LeftShift), frame);
                        }
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(w, h) => sink = TerminalSink::new(w, h),
                _ => {}
            }
        }

        let input = snapshot(&key_frame, frame);
        tick(state, &input, &mut sink);
        sink.present(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; redirect it to keep them off the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut state = init_state(&mut thread_rng()).context("failed to build the playfield")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enter raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut state, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    tracing::info!(
        ticks = state.tick,
        score = state.score,
        hits = state.player_hits,
        "session over"
    );
    result
}
