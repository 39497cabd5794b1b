//! Rigid bodies as seen by the physics engine
//!
//! Bodies are oriented rectangles. `dimension` holds the FULL width and height;
//! the engine works with `half_extents()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::rotate;

/// Unique body id within one game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    pub const CHICKEN: Self = Self(CHICKEN_ID);
    pub const LANDING_BAR: Self = Self(LANDING_BAR_ID);

    pub fn is_chicken(self) -> bool {
        self == Self::CHICKEN
    }

    pub fn is_landing_bar(self) -> bool {
        self == Self::LANDING_BAR
    }
}

/// Everything needed to construct a body in one go
#[derive(Debug, Clone)]
pub struct BodyConfig {
    pub origin: Vec2,
    /// Full width and height
    pub dimension: Vec2,
    pub mass: f32,
    /// Constant force applied every step (gravity)
    pub force: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub angular_velocity: f32,
    pub lateral_friction: f32,
    pub rotational_friction: f32,
    /// Point the body is elastically pulled toward
    pub target: Option<Vec2>,
    /// Angle the body is elastically rotated toward
    pub target_angle: Option<f32>,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            dimension: Vec2::ONE,
            mass: 1.0,
            force: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            lateral_friction: 0.0,
            rotational_friction: 0.0,
            target: None,
            target_angle: None,
        }
    }
}

/// A moving body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub origin: Vec2,
    dimension: Vec2,
    mass: f32,
    pub force: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub angular_velocity: f32,
    pub lateral_friction: f32,
    pub rotational_friction: f32,
    pub target: Option<Vec2>,
    pub target_angle: Option<f32>,
    /// Where the eyes look; only the renderer reads it
    pub eyes_dir: Vec2,
}

impl Body {
    pub fn new(id: BodyId, config: &BodyConfig) -> Self {
        Self {
            id,
            origin: config.origin,
            dimension: config.dimension,
            mass: config.mass.max(f32::EPSILON),
            force: config.force,
            velocity: config.velocity,
            angle: config.angle,
            angular_velocity: config.angular_velocity,
            lateral_friction: config.lateral_friction.max(0.0),
            rotational_friction: config.rotational_friction.max(0.0),
            target: config.target,
            target_angle: config.target_angle,
            eyes_dir: Vec2::new(EYES_START.0, EYES_START.1),
        }
    }

    /// Full width and height
    #[inline]
    pub fn dimension(&self) -> Vec2 {
        self.dimension
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.dimension * 0.5
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Moment of inertia of a solid rectangle about its center
    pub fn moment_of_inertia(&self) -> f32 {
        self.mass * self.dimension.length_squared() / 12.0
    }

    /// Body-space x and y axes in world space
    pub fn axes(&self) -> [Vec2; 2] {
        let x = Vec2::from_angle(self.angle);
        [x, x.perp()]
    }

    /// Corner points, counter-clockwise from the upper right
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_extents();
        [
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
        ]
        .map(|c| self.origin + rotate(c, self.angle))
    }

    /// Whether a world-space point lies inside the rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        let local = rotate(point - self.origin, -self.angle);
        let h = self.half_extents();
        local.x.abs() <= h.x && local.y.abs() <= h.y
    }

    /// Velocity of a world-space point attached to the body
    pub fn point_velocity(&self, point: Vec2) -> Vec2 {
        self.velocity + crate::cross_scalar(self.angular_velocity, point - self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn square() -> Body {
        Body::new(
            BodyId(7),
            &BodyConfig {
                origin: Vec2::new(1.0, 2.0),
                dimension: Vec2::new(0.4, 0.2),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_corners_axis_aligned() {
        let body = square();
        let c = body.corners();
        assert!((c[0] - Vec2::new(1.2, 2.1)).length() < 1e-6);
        assert!((c[2] - Vec2::new(0.8, 1.9)).length() < 1e-6);
    }

    #[test]
    fn test_corners_rotated() {
        let mut body = square();
        body.angle = FRAC_PI_2;
        // Upper right corner (0.2, 0.1) rotates to (-0.1, 0.2)
        let c = body.corners();
        assert!((c[0] - Vec2::new(0.9, 2.2)).length() < 1e-5);
    }

    #[test]
    fn test_contains() {
        let body = square();
        assert!(body.contains(Vec2::new(1.15, 2.05)));
        assert!(!body.contains(Vec2::new(1.15, 2.15)));
    }

    #[test]
    fn test_reserved_ids() {
        assert!(BodyId(0).is_chicken());
        assert!(BodyId(1).is_landing_bar());
        assert!(!BodyId(2).is_chicken() && !BodyId(2).is_landing_bar());
    }

    #[test]
    fn test_eyes_start_position() {
        assert_eq!(square().eyes_dir, Vec2::new(-1.0, 3.0));
    }
}
