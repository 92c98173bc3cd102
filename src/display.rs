//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! match.  No game logic is performed; this module only translates state
//! into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use ink_duel::entities::{
    ActionState, Entity, MatchState, Outcome, Particle, ParticleColor, ParticleKind, Projectile,
    ScarfColor, ARENA_WIDTH, GROUND_Y,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGrey;
const C_HUD_HP: Color = Color::Red;
const C_HUD_MP: Color = Color::Blue;
const C_HUD_CLOCK: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_PROJECTILE: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;

const BAR_WIDTH: usize = 20;

/// Terminal size and the mapping from arena units to cells.
struct Frame {
    width: u16,
    height: u16,
}

impl Frame {
    fn ground_row(&self) -> u16 {
        self.height.saturating_sub(4)
    }

    fn col(&self, x: f32) -> u16 {
        let inner = self.width.saturating_sub(2) as f32;
        let col = 1.0 + (x / ARENA_WIDTH) * inner;
        (col.max(1.0) as u16).min(self.width.saturating_sub(2))
    }

    /// Row of an arena y coordinate (y grows downward, `GROUND_Y` is the floor).
    fn row(&self, y: f32) -> u16 {
        let top = 3.0;
        let ground = self.ground_row() as f32;
        let span = (ground - top).max(1.0);
        let row = ground - ((GROUND_Y - y) / GROUND_Y) * span;
        row.clamp(top, ground) as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &MatchState) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let frame = Frame { width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &frame, state.camera_shake)?;
    draw_hud(out, &frame, state)?;

    for particle in &state.particles {
        draw_particle(out, &frame, particle)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, &frame, projectile)?;
    }
    draw_fighter(out, &frame, &state.enemy, scarf_color(state.enemy.scarf))?;
    draw_fighter(out, &frame, &state.player, C_PLAYER)?;

    draw_controls_hint(out, &frame)?;

    if state.is_paused() {
        draw_banner(out, &frame, "PAUSED  (Esc to resume)", Color::Yellow)?;
    } else if let Some(outcome) = state.outcome() {
        match outcome {
            Outcome::PlayerWon => draw_banner(out, &frame, "VICTORY", Color::Red)?,
            Outcome::PlayerLost => draw_banner(out, &frame, "DEFEAT", Color::DarkGrey)?,
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn scarf_color(scarf: ScarfColor) -> Color {
    match scarf {
        ScarfColor::Gold | ScarfColor::GoldCape => Color::Yellow,
        ScarfColor::Silver => Color::Grey,
        ScarfColor::Azure => Color::Blue,
        ScarfColor::Crimson => Color::Red,
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, frame: &Frame, shake: u32) -> std::io::Result<()> {
    let w = frame.width as usize;
    // shake nudges the floor line sideways
    let offset = if shake % 2 == 1 { 1 } else { 0 };

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 2))?;
    out.queue(Print("─".repeat(w)))?;
    out.queue(cursor::MoveTo(offset, frame.ground_row() + 1))?;
    out.queue(Print("▀".repeat(w.saturating_sub(offset as usize))))?;
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

fn bar(value: f32, max: f32) -> String {
    let filled = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f32).round() as usize
    } else {
        0
    };
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn draw_hud<W: Write>(out: &mut W, frame: &Frame, state: &MatchState) -> std::io::Result<()> {
    let p = &state.player;
    let e = &state.enemy;

    // Player, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!("{} {:>4}", bar(p.hp, p.max_hp), p.hp.ceil())))?;
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_MP))?;
    out.queue(Print(format!("{} potions:{}", bar(p.mp, p.max_mp), p.heal_potions)))?;

    // Clock and difficulty, centre
    let clock = format!(
        "{:>2}  [{}]",
        state.time_remaining_secs().ceil(),
        state.difficulty.profile().name
    );
    let cx = (frame.width / 2).saturating_sub(clock.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_CLOCK))?;
    out.queue(Print(&clock))?;

    // Enemy, right
    let hp_str = format!("{:>4} {}", e.hp.ceil(), bar(e.hp, e.max_hp));
    let rx = frame
        .width
        .saturating_sub(hp_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(&hp_str))?;
    let mp_str = bar(e.mp, e.max_mp);
    let rx = frame
        .width
        .saturating_sub(mp_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 1))?;
    out.queue(style::SetForegroundColor(C_HUD_MP))?;
    out.queue(Print(&mp_str))?;

    Ok(())
}

// ── Fighters ──────────────────────────────────────────────────────────────────

/// Torso glyph for a pose; anything unexpected falls back to standing.
fn pose(entity: &Entity) -> &'static str {
    let right = entity.facing.sign() > 0.0;
    match entity.state {
        ActionState::Attack1 | ActionState::Attack2 | ActionState::Attack3 => {
            if right {
                "|=-"
            } else {
                "-=|"
            }
        }
        ActionState::SkillProjectile => {
            if right {
                "|~~"
            } else {
                "~~|"
            }
        }
        ActionState::SkillOmniSlash => "*X*",
        ActionState::SkillUppercut => "/|\\",
        ActionState::Block => "[|]",
        ActionState::Hit => "\\|/",
        ActionState::Dash => "=|=",
        ActionState::AirSlash => "(|)",
        ActionState::AirDive => "\\V/",
        ActionState::Dead => "___",
        _ => "/|\\",
    }
}

fn draw_fighter<W: Write>(
    out: &mut W,
    frame: &Frame,
    entity: &Entity,
    color: Color,
) -> std::io::Result<()> {
    let col = frame.col(entity.x).saturating_sub(1);
    let feet = frame.row(entity.y);

    // afterimages
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    for ghost in &entity.trail {
        out.queue(cursor::MoveTo(frame.col(ghost.x), frame.row(ghost.y).saturating_sub(1)))?;
        out.queue(Print("·"))?;
    }

    out.queue(style::SetForegroundColor(color))?;
    if entity.is_dead() {
        out.queue(cursor::MoveTo(col, feet))?;
        out.queue(Print("o__"))?;
        return Ok(());
    }
    let blink = entity.is_invulnerable && entity.invulnerable_timer % 4 < 2;
    if blink {
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    }
    out.queue(cursor::MoveTo(col + 1, feet.saturating_sub(2)))?;
    out.queue(Print("o"))?;
    out.queue(cursor::MoveTo(col, feet.saturating_sub(1)))?;
    out.queue(Print(pose(entity)))?;
    out.queue(cursor::MoveTo(col, feet))?;
    out.queue(Print("/ \\"))?;
    Ok(())
}

// ── Hazards & effects ─────────────────────────────────────────────────────────

fn draw_projectile<W: Write>(
    out: &mut W,
    frame: &Frame,
    projectile: &Projectile,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(frame.col(projectile.x), frame.row(projectile.y)))?;
    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    out.queue(Print(if projectile.vx >= 0.0 { ")))" } else { "(((" }))?;
    Ok(())
}

fn draw_particle<W: Write>(out: &mut W, frame: &Frame, particle: &Particle) -> std::io::Result<()> {
    let color = match particle.color {
        ParticleColor::Black => Color::DarkGrey,
        ParticleColor::Grey => Color::Grey,
        ParticleColor::White => Color::White,
        ParticleColor::Jade => Color::Green,
        ParticleColor::Azure => Color::Blue,
    };
    out.queue(cursor::MoveTo(frame.col(particle.x), frame.row(particle.y)))?;
    out.queue(style::SetForegroundColor(color))?;
    match (&particle.kind, &particle.text) {
        (ParticleKind::Text, Some(text)) => out.queue(Print(text))?,
        (ParticleKind::Spark, _) => out.queue(Print("*"))?,
        (ParticleKind::Mist, _) => out.queue(Print("~"))?,
        _ => out.queue(Print("."))?,
    };
    Ok(())
}

// ── Controls hint & banners ───────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, frame.height.saturating_sub(2)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "A/D move  AA/DD dash  W jump  S block  J attack  S+J ink wave  W+J uppercut  Q heal  Esc pause  X quit",
    ))?;
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, frame: &Frame, text: &str, color: Color) -> std::io::Result<()> {
    let row = frame.height / 2;
    let col = (frame.width / 2).saturating_sub(text.chars().count() as u16 / 2 + 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(format!("  {}  ", text)))?;
    Ok(())
}
