//! Chicken On A Line - a balancing arcade game
//!
//! Core modules:
//! - `sim`: Fixed timestep simulation (bodies, physics step, game state)
//! - `session`: Run loop, scoring and the screen state machine
//! - `render`: Read-only view handed to whatever draws the game
//! - `tuning`: Data-driven game balance

pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;

pub use render::{Frame, Overlay, Renderer};
pub use session::{Screen, Session};
pub use sim::GameState;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (unit space, origin at the center)
    pub const CANVAS_WIDTH: f32 = 1.0;
    pub const CANVAS_HEIGHT: f32 = 1.0;

    /// Reserved body ids; bugs count up from `FIRST_BUG_ID`
    pub const CHICKEN_ID: u32 = 0;
    pub const LANDING_BAR_ID: u32 = 1;
    pub const FIRST_BUG_ID: u32 = 2;

    /// Chicken defaults
    pub const CHICKEN_START_Y: f32 = 0.55;
    pub const CHICKEN_START_JITTER: f32 = 0.002;
    pub const CHICKEN_SIZE: f32 = 0.15;
    pub const CHICKEN_MASS: f32 = 1.0;

    /// Landing bar defaults
    pub const LANDING_BAR_START_Y: f32 = -0.1;
    pub const LANDING_BAR_WIDTH: f32 = 0.07;
    pub const LANDING_BAR_HEIGHT: f32 = 0.03;
    pub const LANDING_BAR_MASS: f32 = 2.0;

    /// Bug defaults
    pub const BUG_SIZE: f32 = 0.1;
    pub const BUG_MASS: f32 = 0.5;

    /// Handle rest position at the start of a round
    pub const HANDLE_START_Y: f32 = -0.3;

    /// Where the eyes look before the first tick
    pub const EYES_START: (f32, f32) = (-1.0, 3.0);
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// 2D cross product (z component of the 3D cross product)
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Cross product of a scalar angular velocity with a vector
#[inline]
pub fn cross_scalar(w: f32, v: Vec2) -> Vec2 {
    Vec2::new(-w * v.y, w * v.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cross_scalar_matches_cross() {
        // w x r is perpendicular to r
        let r = Vec2::new(0.3, -0.2);
        let v = cross_scalar(2.0, r);
        assert!(v.dot(r).abs() < 1e-6);
        assert!((cross(r, v) - 2.0 * r.length_squared()).abs() < 1e-6);
    }
}
