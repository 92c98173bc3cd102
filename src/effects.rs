//! Projectiles and particles: spawning, advancing, culling.
//!
//! Particles are advisory. The simulation guarantees when they appear and
//! when they disappear; their look belongs to the renderer.

use rand::Rng;

use crate::entities::{
    Entity, Particle, ParticleColor, ParticleKind, Projectile, ARENA_WIDTH,
};

pub const PROJECTILE_DAMAGE: f32 = 60.0;
pub const PROJECTILE_SPEED: f32 = 15.0;
pub const PROJECTILE_LIFE: u32 = 100;
pub const PROJECTILE_SIZE: f32 = 60.0;
/// Horizontal offset of the spawn point in front of the caster.
const PROJECTILE_MUZZLE: f32 = 40.0;

const INK_GRAVITY: f32 = 0.2;
const INK_TERMINAL_VY: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Burst {
    /// Ink splash on a clean hit.
    InkHit,
    /// Trail puff behind a dash or a lunge.
    InkDash,
    /// White sparks on a blocked hit.
    Spark,
    /// Small cloud under a double jump.
    Mist,
}

/// Write access to the hazard and effect collections for one tick, plus the
/// random source used for effect spread and AI rolls.
pub struct Emitter<'a, R: Rng> {
    pub projectiles: &'a mut Vec<Projectile>,
    pub particles: &'a mut Vec<Particle>,
    rng: &'a mut R,
}

impl<'a, R: Rng> Emitter<'a, R> {
    pub fn new(
        projectiles: &'a mut Vec<Projectile>,
        particles: &'a mut Vec<Particle>,
        rng: &'a mut R,
    ) -> Self {
        Emitter {
            projectiles,
            particles,
            rng,
        }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut *self.rng
    }

    /// Fire the ink wave from `caster`.
    pub fn spawn_projectile(&mut self, caster: &Entity) {
        let dir = caster.facing.sign();
        self.projectiles.push(Projectile {
            owner: caster.side,
            x: caster.x + dir * PROJECTILE_MUZZLE,
            y: caster.mid_y(),
            vx: dir * PROJECTILE_SPEED,
            vy: 0.0,
            width: PROJECTILE_SIZE,
            height: PROJECTILE_SIZE,
            damage: PROJECTILE_DAMAGE,
            life: PROJECTILE_LIFE,
            hit: false,
        });
    }

    /// Floating label rising from a point.
    pub fn float_text(&mut self, x: f32, y: f32, text: String, color: ParticleColor, life: u32) {
        self.particles.push(Particle {
            x,
            y,
            vx: 0.0,
            vy: -1.0,
            life,
            max_life: life,
            size: 14.0,
            kind: ParticleKind::Text,
            color,
            text: Some(text),
        });
    }

    pub fn burst(&mut self, kind: Burst, x: f32, y: f32) {
        match kind {
            Burst::InkHit => {
                for _ in 0..12 {
                    let life = self.rng.gen_range(40..60);
                    let p = Particle {
                        x,
                        y,
                        vx: self.spread(15.0),
                        vy: self.spread(15.0),
                        life,
                        max_life: 60,
                        size: self.rng.gen_range(4.0..12.0),
                        kind: ParticleKind::Ink,
                        color: ParticleColor::Black,
                        text: None,
                    };
                    self.particles.push(p);
                }
                // drips
                for _ in 0..5 {
                    let p = Particle {
                        x: x + self.spread(20.0),
                        y,
                        vx: self.spread(2.0),
                        vy: self.rng.gen_range(0.0..2.0),
                        life: 60,
                        max_life: 60,
                        size: self.rng.gen_range(2.0..6.0),
                        kind: ParticleKind::Ink,
                        color: ParticleColor::Black,
                        text: None,
                    };
                    self.particles.push(p);
                }
            }
            Burst::InkDash | Burst::Mist => {
                let lift = if kind == Burst::Mist { 0.0 } else { 20.0 };
                for _ in 0..5 {
                    let p = Particle {
                        x: x + self.spread(20.0),
                        y: y + lift,
                        vx: self.spread(5.0),
                        vy: self.spread(2.0),
                        life: 20,
                        max_life: 20,
                        size: self.rng.gen_range(2.0..12.0),
                        kind: ParticleKind::Mist,
                        color: ParticleColor::Grey,
                        text: None,
                    };
                    self.particles.push(p);
                }
            }
            Burst::Spark => {
                for _ in 0..8 {
                    let p = Particle {
                        x,
                        y,
                        vx: self.spread(12.0),
                        vy: self.spread(12.0),
                        life: 20,
                        max_life: 20,
                        size: self.rng.gen_range(1.0..4.0),
                        kind: ParticleKind::Spark,
                        color: ParticleColor::White,
                        text: None,
                    };
                    self.particles.push(p);
                }
            }
        }
    }

    /// Uniform in `[-width / 2, width / 2)`.
    fn spread(&mut self, width: f32) -> f32 {
        (self.rng.gen::<f32>() - 0.5) * width
    }
}

// ── Per-tick advance ─────────────────────────────────────────────────────────

/// Move every projectile, drop ink behind it, and cull the ones that are
/// spent, have connected, or have left the arena.
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, particles: &mut Vec<Particle>) {
    projectiles.retain_mut(|p| {
        p.x += p.vx;
        p.y += p.vy;
        p.life = p.life.saturating_sub(1);
        if p.life % 2 == 0 {
            particles.push(Particle {
                x: p.x,
                y: p.y,
                vx: 0.0,
                vy: 0.0,
                life: 10,
                max_life: 10,
                size: 4.0,
                kind: ParticleKind::Ink,
                color: ParticleColor::Black,
                text: None,
            });
        }
        p.life > 0 && !p.hit && p.x > 0.0 && p.x < ARENA_WIDTH
    });
}

pub fn advance_particles(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| {
        p.x += p.vx;
        p.y += p.vy;
        p.life = p.life.saturating_sub(1);
        if p.kind == ParticleKind::Ink && p.vy < INK_TERMINAL_VY {
            p.vy += INK_GRAVITY;
        }
        p.life > 0
    });
}
