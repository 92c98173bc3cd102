mod cli;
mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ink_duel::commands::{Command, CommandSet};
use ink_duel::compute::{advance_tick, init_state, pause, resume};
use ink_duel::config::MatchConfig;
use ink_duel::entities::{Difficulty, MatchState, Outcome};
use ink_duel::progress::{default_progress_path, Progress};
use ink_duel::telemetry;

const FRAME: Duration = Duration::from_micros(16_667); // 60 Hz

// ── Held-key model ────────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// many frames (≈133 ms). Terminals without release events rely on OS key
/// repeat to keep it fresh.
const HOLD_WINDOW: u64 = 8;

/// Two fresh presses of a direction within this many frames make a dash.
const DOUBLE_TAP_WINDOW: u64 = 15;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const UP_KEYS: [KeyCode; 4] = [
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
    KeyCode::Char(' '),
];
const DOWN_KEYS: [KeyCode; 3] = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const ATTACK_KEYS: [KeyCode; 2] = [KeyCode::Char('j'), KeyCode::Char('J')];
const HEAL_KEYS: [KeyCode; 2] = [KeyCode::Char('q'), KeyCode::Char('Q')];

/// Direction a key steers, for double-tap detection.
fn direction_of(code: &KeyCode) -> Option<Command> {
    if LEFT_KEYS.contains(code) {
        Some(Command::Left)
    } else if RIGHT_KEYS.contains(code) {
        Some(Command::Right)
    } else {
        None
    }
}

/// Tracks fresh presses of each direction and reports a dash on the second
/// tap inside the window.
#[derive(Default)]
struct DashDetector {
    last_tap: HashMap<Command, u64>,
}

impl DashDetector {
    fn tap(&mut self, direction: Command, frame: u64) -> Option<Command> {
        let previous = self.last_tap.insert(direction, frame);
        match previous {
            Some(last) if frame.saturating_sub(last) <= DOUBLE_TAP_WINDOW => {
                self.last_tap.remove(&direction);
                match direction {
                    Command::Left => Some(Command::DashLeft),
                    Command::Right => Some(Command::DashRight),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

fn held_commands(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> CommandSet {
    let mut commands = CommandSet::new();
    let bindings: [(&[KeyCode], Command); 6] = [
        (&LEFT_KEYS[..], Command::Left),
        (&RIGHT_KEYS[..], Command::Right),
        (&UP_KEYS[..], Command::Up),
        (&DOWN_KEYS[..], Command::Down),
        (&ATTACK_KEYS[..], Command::Attack),
        (&HEAL_KEYS[..], Command::Heal),
    ];
    for (keys, command) in bindings {
        if any_held(key_frame, keys, frame) {
            commands.insert(command);
        }
    }
    commands
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Blue,
        Difficulty::Hard => Color::Red,
        Difficulty::Grandmaster => Color::Yellow,
    }
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    progress: &Progress,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "墨  INK  DUEL  墨";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(Print("Choose your opponent:"))?;

    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        let available = progress.is_available(*difficulty);
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        let color = if available {
            difficulty_color(*difficulty)
        } else {
            Color::DarkGrey
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{:<12}", difficulty.profile().name)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        if !available {
            out.queue(Print("locked: clear the other three"))?;
        } else if progress.is_cleared(*difficulty) {
            out.queue(Print("cleared"))?;
        }
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 5))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("A/D move  W jump  S block  J attack  Q heal   Esc : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let Ok(event) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            let picked = match code {
                KeyCode::Char(c @ '1'..='4') => {
                    let index = c as usize - '1' as usize;
                    Difficulty::ALL.get(index).copied()
                }
                KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => None,
            };
            if let Some(difficulty) = picked {
                if progress.is_available(difficulty) {
                    return Ok(MenuResult::Start(difficulty));
                }
            }
        }
    }
}

// ── Match loop ────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → back to menu.
///
/// Same held-key model as a keyboard-enhanced terminal would give: Press and
/// Repeat refresh a key, Release drops it, and silence longer than
/// `HOLD_WINDOW` expires it.
fn match_loop<W: Write>(
    out: &mut W,
    state: &mut MatchState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut dashes = DashDetector::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut dash: Option<Command> = None;

        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                KeyEventKind::Press => {
                    let fresh = !is_held(&key_frame, &code, frame);
                    key_frame.insert(code, frame);
                    if fresh {
                        if let Some(direction) = direction_of(&code) {
                            dash = dash.or(dashes.tap(direction, frame));
                        }
                    }
                    match code {
                        KeyCode::Char('x') | KeyCode::Char('X') => return Ok(true),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Esc if !state.is_over() => {
                            if state.is_paused() {
                                resume(state);
                            } else {
                                pause(state);
                            }
                        }
                        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
                            if state.is_over() =>
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

        let mut commands = held_commands(&key_frame, frame);
        if let Some(dash) = dash {
            commands.insert(dash);
        }

        advance_tick(state, &commands, rng);
        display::render(out, state)?;
        if state.is_over() && state.game_speed <= 0.0 {
            draw_result_hint(out)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn draw_result_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let hint = "Enter : menu   X : quit";
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(hint.chars().count() as u16 / 2),
        height / 2 + 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Entry point ───────────────────────────────────────────────────────────────

struct Session {
    config: MatchConfig,
    progress: Progress,
    progress_path: PathBuf,
    first_pick: Option<Difficulty>,
    rng: StdRng,
}

fn main() -> Result<()> {
    let args = cli::parse_args();
    telemetry::init(&args.log_file)?;

    let config = match &args.config {
        Some(path) => MatchConfig::load_from_file(path)
            .with_context(|| format!("loading match config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    let first_pick = match &args.difficulty {
        Some(name) => match Difficulty::from_name(name) {
            Some(difficulty) => Some(difficulty),
            None => bail!("unknown difficulty '{}'", name),
        },
        None => None,
    };
    let progress_path = args.progress.clone().unwrap_or_else(default_progress_path);
    let progress = Progress::load(&progress_path)?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, ?first_pick, "starting ink_duel");

    let mut session = Session {
        config,
        progress,
        progress_path,
        first_pick,
        rng,
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release events; terminals without the protocol fall back to
    // the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &mut session);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, session: &mut Session) -> Result<()> {
    loop {
        let pick = match session.first_pick.take() {
            Some(difficulty) if session.progress.is_available(difficulty) => {
                MenuResult::Start(difficulty)
            }
            Some(difficulty) => {
                tracing::warn!(?difficulty, "difficulty is locked, showing menu");
                show_menu(out, rx, &session.progress)?
            }
            None => show_menu(out, rx, &session.progress)?,
        };
        let difficulty = match pick {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => difficulty,
        };

        tracing::info!(?difficulty, "match start");
        let mut state = init_state(difficulty, &session.config);
        let quit = match_loop(out, &mut state, rx, &mut session.rng)?;
        tracing::info!(outcome = ?state.outcome(), "match end");

        if state.outcome() == Some(Outcome::PlayerWon) {
            session.progress.record_win(difficulty);
            if let Err(e) = session.progress.save(&session.progress_path) {
                tracing::warn!(error = %e, "could not save progress");
            }
        }

        if quit {
            break;
        }
    }
    Ok(())
}
