//! Data-driven game balance
//!
//! Every number that shapes how the game feels lives here so it can be
//! tweaked from a JSON file without a rebuild. Missing fields fall back to
//! the shipped defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Downward force on the chicken
    pub gravity: f32,
    /// 1 = elastic collision, <1 inelastic collision
    pub restitution: f32,
    /// Linear damping on chicken and landing bar
    pub lateral_friction: f32,
    /// Angular damping on chicken and landing bar
    pub rotational_friction: f32,
    /// Spring constant pulling a body toward its target point
    pub target_stiffness: f32,
    /// Spring constant pulling a body toward its target angle
    pub target_angle_stiffness: f32,
    /// Landing bar target = handle * this
    pub bar_follow: f32,

    // === Loop ===
    /// Fixed simulation step (ms)
    pub fixed_step_ms: f64,
    /// Maximum fixed steps per animation frame
    pub max_steps_per_frame: u32,

    // === Player ===
    /// Handle never goes above this y
    pub handle_ceiling: f32,
    /// Round ends when the chicken drops below this y
    pub fall_limit: f32,
    /// Minimum time between two jumps (ms)
    pub jump_cooldown_ms: f64,
    /// Slack factor applied to the chicken/bar distance
    pub jump_reach_factor: f32,
    /// Press duration is clamped into this window (seconds)
    pub jump_min_press: f32,
    pub jump_max_press: f32,
    /// Clamped press duration * this = vertical velocity added
    pub jump_impulse_scale: f32,

    // === Bugs ===
    pub bug_speed: f32,
    /// Bugs enter at x = ±this
    pub bug_spawn_x: f32,
    /// Bugs enter at y in [-this, this]
    pub bug_spawn_y: f32,
    /// Delay until the next bug, uniform in [min, max) seconds
    pub bug_delay_min: f32,
    pub bug_delay_max: f32,
    /// Bug spin, uniform in [min, max) radians per second
    pub bug_spin_min: f32,
    pub bug_spin_max: f32,

    // === Scoring ===
    /// Cumulative score above this wins the game
    pub win_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.2,
            restitution: 0.5,
            lateral_friction: 1.5,
            rotational_friction: 7.5,
            target_stiffness: 60.0,
            target_angle_stiffness: 40.0,
            bar_follow: 0.25,

            fixed_step_ms: 10.0,
            max_steps_per_frame: 25,

            handle_ceiling: -0.25,
            fall_limit: -0.5,
            jump_cooldown_ms: 200.0,
            jump_reach_factor: 1.6,
            jump_min_press: 0.2,
            jump_max_press: 0.3,
            jump_impulse_scale: 6.0,

            bug_speed: 0.4,
            bug_spawn_x: 0.55,
            bug_spawn_y: 0.2,
            bug_delay_min: 1.5,
            bug_delay_max: 2.5,
            bug_spin_min: 2.0,
            bug_spin_max: 6.0,

            win_score: 2000,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.fixed_step_ms.is_nan() || self.fixed_step_ms <= 0.0 {
            return Err(TuningError::Invalid(format!(
                "fixed_step_ms must be positive, got {}",
                self.fixed_step_ms
            )));
        }
        if self.max_steps_per_frame == 0 {
            return Err(TuningError::Invalid(
                "max_steps_per_frame must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(TuningError::Invalid(format!(
                "restitution must be in [0, 1], got {}",
                self.restitution
            )));
        }
        if self.lateral_friction < 0.0 || self.rotational_friction < 0.0 {
            return Err(TuningError::Invalid("friction must not be negative".to_string()));
        }
        let ranges = [
            ("jump press", self.jump_min_press, self.jump_max_press),
            ("bug delay", self.bug_delay_min, self.bug_delay_max),
            ("bug spin", self.bug_spin_min, self.bug_spin_max),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(TuningError::Invalid(format!(
                    "{name} range is inverted ({min} > {max})"
                )));
            }
        }
        Ok(())
    }

    /// Fixed step in seconds, as handed to the physics engine
    pub fn fixed_step_secs(&self) -> f32 {
        (self.fixed_step_ms / 1000.0) as f32
    }
}
