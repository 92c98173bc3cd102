//! All match entity types: plain data with small accessors.

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;

// ── Arena & body constants ────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 960.0;
pub const ARENA_HEIGHT: f32 = 540.0;
pub const GROUND_Y: f32 = 450.0;
/// Closest a body centre may get to either side wall.
pub const WALL_MARGIN: f32 = 20.0;

pub const BODY_WIDTH: f32 = 50.0;
pub const BODY_HEIGHT: f32 = 100.0;

pub const BASE_MAX_HP: f32 = 1000.0;
pub const MAX_MP: f32 = 100.0;

/// Ghost samples kept for the renderer.
pub const TRAIL_LEN: usize = 5;

// ── Enumerations ──────────────────────────────────────────────────────────────

/// Identity tag of a combatant. The player is always human-driven, the enemy
/// is always driven by the AI controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// +1.0 for right, −1.0 for left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Grandmaster,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Grandmaster,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionState {
    Idle,
    Run,
    Jump,
    Dash,
    Attack1,
    Attack2,
    Attack3,
    Block,
    Hit,
    Dead,
    /// Ink wave (down + attack).
    SkillProjectile,
    /// Rising slash (up + attack).
    SkillUppercut,
    /// Five-cut lunge chained out of the ink wave.
    SkillOmniSlash,
    AirSlash,
    AirDive,
}

impl ActionState {
    pub fn is_light_attack(self) -> bool {
        matches!(
            self,
            ActionState::Attack1 | ActionState::Attack2 | ActionState::Attack3
        )
    }
}

/// Scarf / cape tint. The core only carries it; the renderer picks the colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScarfColor {
    Gold,
    Silver,
    Azure,
    Crimson,
    GoldCape,
}

// ── Combatant ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub state: ActionState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub side: Side,
    pub x: f32,
    /// Feet position; the body extends `height` upward from here.
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    pub width: f32,
    pub height: f32,

    pub hp: f32,
    pub max_hp: f32,
    pub mp: f32,
    pub max_mp: f32,

    pub state: ActionState,
    /// Frames spent in `state`; zeroed by every transition.
    pub state_timer: u32,

    pub is_grounded: bool,
    pub jump_count: u8,
    /// Cleared by a jump, re-armed once up is released.
    pub can_jump: bool,

    pub is_blocking: bool,
    pub is_invulnerable: bool,
    pub invulnerable_timer: u32,

    pub heal_potions: u32,
    pub heal_active: bool,
    pub heal_timer: u32,
    pub heal_cooldown: u32,

    pub trail: Vec<TrailPoint>,
    pub scarf: ScarfColor,
}

impl Entity {
    pub fn new(side: Side, x: f32, facing: Facing, max_hp: f32) -> Self {
        Entity {
            side,
            x,
            y: GROUND_Y,
            vx: 0.0,
            vy: 0.0,
            facing,
            width: BODY_WIDTH,
            height: BODY_HEIGHT,
            hp: max_hp,
            max_hp,
            mp: MAX_MP,
            max_mp: MAX_MP,
            state: ActionState::Idle,
            state_timer: 0,
            is_grounded: true,
            jump_count: 0,
            can_jump: true,
            is_blocking: false,
            is_invulnerable: false,
            invulnerable_timer: 0,
            heal_potions: 0,
            heal_active: false,
            heal_timer: 0,
            heal_cooldown: 0,
            trail: Vec::new(),
            scarf: ScarfColor::Gold,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == ActionState::Dead
    }

    /// Vertical centre of the body.
    pub fn mid_y(&self) -> f32 {
        self.y - self.height / 2.0
    }

    /// Switch to `next`, zeroing the timer. Staying in the current state is not
    /// a transition. Nothing leaves DEAD.
    pub fn enter(&mut self, next: ActionState) {
        if self.is_dead() || self.state == next {
            return;
        }
        self.force(next);
    }

    /// Like `enter`, but re-arms the timer even when `next` is the current
    /// state (hit-stun refresh).
    pub fn force(&mut self, next: ActionState) {
        if self.is_dead() {
            return;
        }
        self.state = next;
        self.state_timer = 0;
        if next != ActionState::Block {
            self.is_blocking = false;
        }
    }

    /// Deduct `cost` MP if available. Returns whether it was paid.
    pub fn spend_mp(&mut self, cost: f32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        self.clamp_pools();
        true
    }

    pub fn gain_mp(&mut self, amount: f32) {
        self.mp += amount;
        self.clamp_pools();
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.hp -= amount;
        self.clamp_pools();
    }

    pub fn restore_hp(&mut self, amount: f32) {
        self.hp += amount;
        self.clamp_pools();
    }

    pub fn grant_invulnerability(&mut self, frames: u32) {
        self.is_invulnerable = true;
        self.invulnerable_timer = frames;
    }

    /// Keep `hp` and `mp` inside `[0, max]`.
    pub fn clamp_pools(&mut self) {
        self.hp = self.hp.clamp(0.0, self.max_hp);
        self.mp = self.mp.clamp(0.0, self.max_mp);
    }
}

// ── Hazards & effects ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Side,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub damage: f32,
    /// Frames left before it dissipates.
    pub life: u32,
    /// Set once the projectile connects; it never connects again.
    pub hit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Ink,
    Spark,
    Heal,
    Text,
    Mist,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Black,
    Grey,
    White,
    Jade,
    Azure,
}

/// Visual-only record. The simulation spawns and expires these; it never
/// reads their payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub kind: ParticleKind,
    pub color: ParticleColor,
    pub text: Option<String>,
}

// ── Match state ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWon,
    PlayerLost,
}

/// The entire match. One writer: `compute::advance_tick`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub player: Entity,
    pub enemy: Entity,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub difficulty: Difficulty,
    /// Remaining match clock in ticks (60 per second).
    pub clock_ticks: u32,
    pub camera_shake: u32,
    /// Global speed multiplier. 0 freezes the match, < 1 is slow motion.
    pub game_speed: f32,
    /// Fractional ticks owed at the current speed.
    pub speed_carry: f32,
    /// Speed to restore after a pause.
    pub resume_speed: Option<f32>,
    /// Pipeline ticks simulated since the KO.
    pub finish_ticks: u32,
    pub config: MatchConfig,
}

impl MatchState {
    pub fn entity(&self, side: Side) -> &Entity {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn entity_mut(&mut self, side: Side) -> &mut Entity {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn time_remaining_secs(&self) -> f32 {
        self.clock_ticks as f32 / crate::compute::TICKS_PER_SECOND as f32
    }

    pub fn is_over(&self) -> bool {
        self.player.is_dead() || self.enemy.is_dead()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.enemy.is_dead() {
            Some(Outcome::PlayerWon)
        } else if self.player.is_dead() {
            Some(Outcome::PlayerLost)
        } else {
            None
        }
    }

    pub fn is_paused(&self) -> bool {
        self.resume_speed.is_some()
    }
}
