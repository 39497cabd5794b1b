//! Game state and the per-step world update
//!
//! One `GameState` is one round. Restarting a round builds a fresh state, so
//! nothing physical carries over and bug ids start at 2 again.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::{Body, BodyId};
use super::entities;
use super::physics::{PhysicsEngine, PlainPhysics};
use crate::consts::*;
use crate::tuning::Tuning;

/// Run time rounded to tenths of a second
///
/// Rounds the exact decimal value of the seconds, ties away from zero. Times
/// such as 12.35 s are stored slightly below the tie in binary and round down.
/// Kept as an integer so "did this round beat the last one" and the score
/// never depend on float formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RunTime {
    tenths: u64,
}

impl RunTime {
    pub const ZERO: Self = Self { tenths: 0 };

    pub fn from_secs(secs: f64) -> Self {
        if secs.is_nan() || secs <= 0.0 {
            return Self::ZERO;
        }
        // First guess; the scaled product may itself round onto a tie
        let mut tenths = (secs * 10.0).round();
        // Sign of secs * 20 - odd is exact with a fused multiply-add, so
        // compare against the true midpoints around the guess
        if secs.mul_add(20.0, -(2.0 * tenths + 1.0)) >= 0.0 {
            tenths += 1.0;
        } else if secs.mul_add(20.0, -(2.0 * tenths - 1.0)) < 0.0 {
            tenths -= 1.0;
        }
        Self {
            tenths: tenths.max(0.0) as u64,
        }
    }

    pub const fn from_tenths(tenths: u64) -> Self {
        Self { tenths }
    }

    pub fn tenths(self) -> u64 {
        self.tenths
    }
}

impl fmt::Display for RunTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

/// Decide whether two bodies collide
///
/// 1. The chicken collides with everything.
/// 2. The landing bar does not collide with bugs.
/// 3. Bugs collide with each other.
pub fn collide_bodies(a: &Body, b: &Body) -> bool {
    if a.id.is_chicken() || b.id.is_chicken() {
        return true;
    }
    if a.id.is_landing_bar() || b.id.is_landing_bar() {
        return false;
    }
    true
}

/// Whether a body has fully left the field through the left, right or bottom
/// edge. Bodies above the top edge are kept; gravity pulls them back.
pub fn out_of_bounds(body: &Body) -> bool {
    let half = body.half_extents();
    body.origin.x + half.x < -CANVAS_WIDTH / 2.0
        || body.origin.x - half.x > CANVAS_WIDTH / 2.0
        || body.origin.y + half.y < -CANVAS_HEIGHT / 2.0
}

/// The live simulation of one round
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    tuning: Tuning,
    physics: Box<dyn PhysicsEngine>,
    /// The player-influenced body
    pub chicken: Body,
    /// The bar the chicken balances on
    pub landing_bar: Body,
    /// End of the line, controlled by the player (no physics)
    pub handle: Vec2,
    /// Bugs in spawn order
    pub bugs: Vec<Body>,
    start_time_ms: Option<f64>,
    run_time_secs: f64,
    last_jump_time_ms: Option<f64>,
    next_bug_time_secs: f64,
    next_bug_id: u32,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("seed", &self.seed)
            .field("chicken", &self.chicken.origin)
            .field("landing_bar", &self.landing_bar.origin)
            .field("handle", &self.handle)
            .field("bugs", &self.bugs.len())
            .field("run_time_secs", &self.run_time_secs)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Create a new round with the built-in physics engine
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self::with_engine(seed, tuning, Box::new(PlainPhysics::from_tuning(tuning)))
    }

    /// Create a new round driven by the given physics engine
    pub fn with_engine(seed: u64, tuning: &Tuning, physics: Box<dyn PhysicsEngine>) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let chicken = entities::chicken(&mut rng, tuning);
        let landing_bar = entities::landing_bar(tuning);
        let next_bug_time_secs =
            entities::uniform(&mut rng, tuning.bug_delay_min, tuning.bug_delay_max) as f64;

        Self {
            seed,
            rng,
            tuning: tuning.clone(),
            physics,
            chicken,
            landing_bar,
            handle: Vec2::new(0.0, HANDLE_START_Y),
            bugs: Vec::new(),
            start_time_ms: None,
            run_time_secs: 0.0,
            last_jump_time_ms: None,
            next_bug_time_secs,
            next_bug_id: FIRST_BUG_ID,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Seconds since the first step of the round
    pub fn run_time_secs(&self) -> f64 {
        self.run_time_secs
    }

    /// Run time as shown to the player and used for scoring
    pub fn run_time(&self) -> RunTime {
        RunTime::from_secs(self.run_time_secs)
    }

    pub fn start_time_ms(&self) -> Option<f64> {
        self.start_time_ms
    }

    pub fn last_jump_time_ms(&self) -> Option<f64> {
        self.last_jump_time_ms
    }

    pub fn next_bug_time_secs(&self) -> f64 {
        self.next_bug_time_secs
    }

    /// Id the next bug will get
    pub fn next_bug_id(&self) -> u32 {
        self.next_bug_id
    }

    /// All moving bodies: chicken, landing bar, then bugs
    pub fn moving_bodies(&self) -> impl Iterator<Item = &Body> {
        [&self.chicken, &self.landing_bar]
            .into_iter()
            .chain(self.bugs.iter())
    }

    /// Round is over once the chicken drops below the fall limit
    pub fn has_fallen(&self) -> bool {
        self.chicken.origin.y < self.tuning.fall_limit
    }

    /// Advance the world by one fixed step
    pub fn advance(&mut self, dt: f32, now_ms: f64) {
        self.pre_advance(now_ms);
        self.step(dt);
        self.post_advance(now_ms);
    }

    /// Latch the start time and move the landing bar's target a quarter of
    /// the way toward the handle
    pub fn pre_advance(&mut self, now_ms: f64) {
        if self.start_time_ms.is_none() {
            self.start_time_ms = Some(now_ms);
        }
        self.landing_bar.target = Some(self.handle * self.tuning.bar_follow);
    }

    fn step(&mut self, dt: f32) {
        let mut bodies: Vec<&mut Body> = Vec::with_capacity(2 + self.bugs.len());
        bodies.push(&mut self.chicken);
        bodies.push(&mut self.landing_bar);
        bodies.extend(self.bugs.iter_mut());
        self.physics.advance(&mut bodies, collide_bodies, dt);
    }

    /// Spawn and cull bugs, point the eyes, update the run time
    pub fn post_advance(&mut self, now_ms: f64) {
        if self.next_bug_time_secs < self.run_time_secs {
            self.add_bug();
        }

        let before = self.bugs.len();
        self.bugs.retain(|bug| !out_of_bounds(bug));
        if self.bugs.len() < before {
            log::debug!("Removed {} bug(s) out of bounds", before - self.bugs.len());
        }

        // Chicken looks at the handle
        self.chicken.eyes_dir = self.handle - self.chicken.origin;

        // Bugs look at the chicken (absolute point)
        let chicken_origin = self.chicken.origin;
        for bug in &mut self.bugs {
            bug.eyes_dir = chicken_origin;
        }

        let start = self.start_time_ms.unwrap_or(now_ms);
        let elapsed = (now_ms - start) / 1000.0;
        self.run_time_secs = self.run_time_secs.max(elapsed);
    }

    /// Spawn a bug at the left or right edge and schedule the next one
    pub fn add_bug(&mut self) {
        let id = BodyId(self.next_bug_id);
        self.next_bug_id += 1;

        let bug = entities::bug(id, &mut self.rng, self.chicken.origin, &self.tuning);
        log::debug!(
            "Bug {} spawned at ({:.2}, {:.2})",
            id.0,
            bug.origin.x,
            bug.origin.y
        );
        self.bugs.push(bug);

        let delay = entities::uniform(
            &mut self.rng,
            self.tuning.bug_delay_min,
            self.tuning.bug_delay_max,
        );
        self.next_bug_time_secs = self.run_time_secs + delay as f64;
    }

    /// Whether the chicken sits close enough to the bar to push off it
    ///
    /// The origin distance is scaled by the reach factor and compared with the
    /// sum of both body heights (touching boxes are a sum of half heights
    /// apart, so this leaves some slack).
    pub fn chicken_on_bar(&self) -> bool {
        let dist = self.chicken.origin.distance(self.landing_bar.origin)
            * self.tuning.jump_reach_factor;
        dist < self.chicken.dimension().y + self.landing_bar.dimension().y
    }

    /// Jump the chicken. `secs` is how long the pointer was held down; the
    /// impulse is clamped so short taps and long holds stay within bounds.
    ///
    /// Returns whether the jump happened. Presses while the chicken is away
    /// from the bar or within the cooldown are ignored.
    pub fn jump(&mut self, secs: f32, now_ms: f64) -> bool {
        if !self.chicken_on_bar() {
            return false;
        }
        if let Some(last) = self.last_jump_time_ms {
            if now_ms - last <= self.tuning.jump_cooldown_ms {
                return false;
            }
        }

        let press = secs.clamp(self.tuning.jump_min_press, self.tuning.jump_max_press);
        let impulse = press * self.tuning.jump_impulse_scale;
        self.chicken.velocity.y += impulse;
        self.last_jump_time_ms = Some(now_ms);
        log::debug!("Jump with impulse {impulse:.2} (press {secs:.3}s)");
        true
    }
}
