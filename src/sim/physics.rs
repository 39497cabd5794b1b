//! Physics engine contract and the built-in rectangle engine
//!
//! The game only needs a handful of moving rectangles, so the built-in engine
//! is a plain impulse solver: detect contacts on the pairs the game allows,
//! apply forces, push colliding bodies apart, integrate.

use glam::Vec2;

use super::body::Body;
use crate::cross;
use crate::tuning::Tuning;

/// Per-pair hook deciding whether two bodies may collide
pub type CollisionFilter = fn(&Body, &Body) -> bool;

/// Anything that can advance a set of moving bodies by one step
pub trait PhysicsEngine {
    /// Apply forces, resolve collisions between eligible pairs and integrate
    fn advance(&mut self, bodies: &mut [&mut Body], filter: CollisionFilter, dt: f32);
}

/// Result of a box/box overlap test
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Contact point in world space
    pub point: Vec2,
    /// Unit normal pointing from the first body toward the second
    pub normal: Vec2,
    /// Overlap along the normal
    pub penetration: f32,
}

/// Penetration that is tolerated without correction
const SLOP: f32 = 0.001;
/// Share of the remaining penetration corrected per step
const CORRECTION_PERCENT: f32 = 0.6;

fn project(corners: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    corners.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), c| {
        let d = c.dot(axis);
        (min.min(d), max.max(d))
    })
}

/// Separating axis test between two oriented rectangles
///
/// The axis with the smallest overlap becomes the contact normal. The contact
/// point is the mean of all corners that lie inside the other rectangle, or the
/// midpoint between both origins when edges cross without a corner inside.
pub fn box_box_collision(a: &Body, b: &Body) -> Option<CollisionResult> {
    let corners_a = a.corners();
    let corners_b = b.corners();

    let mut penetration = f32::INFINITY;
    let mut normal = Vec2::ZERO;
    for axis in a.axes().into_iter().chain(b.axes()) {
        let (min_a, max_a) = project(&corners_a, axis);
        let (min_b, max_b) = project(&corners_b, axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap <= 0.0 {
            return None;
        }
        if overlap < penetration {
            penetration = overlap;
            normal = axis;
        }
    }

    if (b.origin - a.origin).dot(normal) < 0.0 {
        normal = -normal;
    }

    let inside: Vec<Vec2> = corners_b
        .iter()
        .filter(|c| a.contains(**c))
        .chain(corners_a.iter().filter(|c| b.contains(**c)))
        .copied()
        .collect();
    let point = if inside.is_empty() {
        (a.origin + b.origin) * 0.5
    } else {
        inside.iter().copied().sum::<Vec2>() / inside.len() as f32
    };

    Some(CollisionResult {
        point,
        normal,
        penetration,
    })
}

/// Apply an impulse along the contact normal and push the bodies apart
pub fn resolve_collision(a: &mut Body, b: &mut Body, contact: &CollisionResult, restitution: f32) {
    let n = contact.normal;
    let ra = contact.point - a.origin;
    let rb = contact.point - b.origin;

    let relative = b.point_velocity(contact.point) - a.point_velocity(contact.point);
    let approach = relative.dot(n);

    let inv_mass_a = 1.0 / a.mass();
    let inv_mass_b = 1.0 / b.mass();

    // Only bodies moving into each other exchange momentum
    if approach < 0.0 {
        let ra_n = cross(ra, n);
        let rb_n = cross(rb, n);
        let denom = inv_mass_a
            + inv_mass_b
            + ra_n * ra_n / a.moment_of_inertia()
            + rb_n * rb_n / b.moment_of_inertia();
        let j = -(1.0 + restitution) * approach / denom;
        let impulse = n * j;

        a.velocity -= impulse * inv_mass_a;
        a.angular_velocity -= cross(ra, impulse) / a.moment_of_inertia();
        b.velocity += impulse * inv_mass_b;
        b.angular_velocity += cross(rb, impulse) / b.moment_of_inertia();
    }

    let depth = (contact.penetration - SLOP).max(0.0);
    let correction = n * (depth / (inv_mass_a + inv_mass_b) * CORRECTION_PERCENT);
    a.origin -= correction * inv_mass_a;
    b.origin += correction * inv_mass_b;
}

/// The built-in engine
#[derive(Debug, Clone)]
pub struct PlainPhysics {
    pub restitution: f32,
    pub target_stiffness: f32,
    pub target_angle_stiffness: f32,
}

impl PlainPhysics {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            restitution: tuning.restitution,
            target_stiffness: tuning.target_stiffness,
            target_angle_stiffness: tuning.target_angle_stiffness,
        }
    }

    /// Constant force, target springs and friction
    pub fn apply_forces(&self, body: &mut Body, dt: f32) {
        let mut accel = body.force / body.mass();
        if let Some(target) = body.target {
            accel += (target - body.origin) * self.target_stiffness;
        }
        accel -= body.velocity * body.lateral_friction;
        body.velocity += accel * dt;

        let mut angular_accel = -body.angular_velocity * body.rotational_friction;
        if let Some(target_angle) = body.target_angle {
            angular_accel += (target_angle - body.angle) * self.target_angle_stiffness;
        }
        body.angular_velocity += angular_accel * dt;
    }

    fn integrate(body: &mut Body, dt: f32) {
        body.origin += body.velocity * dt;
        body.angle += body.angular_velocity * dt;
    }
}

impl PhysicsEngine for PlainPhysics {
    fn advance(&mut self, bodies: &mut [&mut Body], filter: CollisionFilter, dt: f32) {
        // Contacts are found on the positions before this step
        let mut contacts = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (a, b) = (&*bodies[i], &*bodies[j]);
                if !filter(a, b) {
                    continue;
                }
                if let Some(contact) = box_box_collision(a, b) {
                    contacts.push((i, j, contact));
                }
            }
        }

        for body in bodies.iter_mut() {
            self.apply_forces(body, dt);
        }

        for (i, j, contact) in &contacts {
            let (left, right) = bodies.split_at_mut(*j);
            resolve_collision(&mut *left[*i], &mut *right[0], contact, self.restitution);
        }

        for body in bodies.iter_mut() {
            Self::integrate(body, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{BodyConfig, BodyId};

    fn rect(id: u32, x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(
            BodyId(id),
            &BodyConfig {
                origin: Vec2::new(x, y),
                dimension: Vec2::new(w, h),
                ..Default::default()
            },
        )
    }

    fn always(_: &Body, _: &Body) -> bool {
        true
    }

    fn never(_: &Body, _: &Body) -> bool {
        false
    }

    fn engine() -> PlainPhysics {
        PlainPhysics::from_tuning(&Tuning::default())
    }

    #[test]
    fn test_separated_boxes_miss() {
        let a = rect(0, 0.0, 0.0, 0.2, 0.2);
        let b = rect(1, 0.5, 0.0, 0.2, 0.2);
        assert!(box_box_collision(&a, &b).is_none());
    }

    #[test]
    fn test_stacked_boxes_hit() {
        // b rests slightly inside the top of a
        let a = rect(0, 0.0, 0.0, 0.4, 0.2);
        let b = rect(1, 0.0, 0.18, 0.2, 0.2);
        let hit = box_box_collision(&a, &b).unwrap();
        assert!((hit.normal - Vec2::Y).length() < 1e-5);
        assert!((hit.penetration - 0.02).abs() < 1e-5);
        assert!(a.contains(hit.point));
    }

    #[test]
    fn test_normal_points_from_first_to_second() {
        let a = rect(0, 0.0, 0.18, 0.2, 0.2);
        let b = rect(1, 0.0, 0.0, 0.4, 0.2);
        let hit = box_box_collision(&a, &b).unwrap();
        assert!(hit.normal.y < 0.0);
    }

    #[test]
    fn test_rotated_box_clears_corner() {
        // A diamond next to a box: axis-aligned bounds overlap, shapes do not
        let a = rect(0, 0.0, 0.0, 0.2, 0.2);
        let mut b = rect(1, 0.23, 0.23, 0.2, 0.2);
        b.angle = std::f32::consts::FRAC_PI_4;
        assert!(box_box_collision(&a, &b).is_none());
    }

    #[test]
    fn test_falling_box_bounces() {
        let mut floor = Body::new(
            BodyId(0),
            &BodyConfig {
                dimension: Vec2::new(1.0, 0.2),
                mass: 10.0,
                ..Default::default()
            },
        );
        let mut ball = rect(1, 0.0, 0.14, 0.1, 0.1);
        ball.velocity = Vec2::new(0.0, -1.0);
        let contact = box_box_collision(&floor, &ball).unwrap();
        resolve_collision(&mut floor, &mut ball, &contact, 0.5);
        assert!(ball.velocity.y > 0.0, "ball should move up after impact");
        assert!(floor.velocity.y < 0.0, "floor should be pushed down");
        // Momentum is conserved along the normal
        let momentum = floor.velocity.y * floor.mass() + ball.velocity.y * ball.mass();
        assert!((momentum + 1.0 * ball.mass()).abs() < 1e-4);
    }

    #[test]
    fn test_filter_blocks_collision() {
        let mut a = rect(0, 0.0, 0.0, 0.2, 0.2);
        let mut b = rect(1, 0.1, 0.0, 0.2, 0.2);
        a.velocity = Vec2::new(1.0, 0.0);
        {
            let mut bodies = [&mut a, &mut b];
            engine().advance(&mut bodies, never, 0.01);
        }
        assert!((a.velocity.x - 1.0).abs() < 1e-6);
        assert_eq!(b.velocity, Vec2::ZERO);

        {
            let mut bodies = [&mut a, &mut b];
            engine().advance(&mut bodies, always, 0.01);
        }
        assert!(b.velocity.x > 0.0);
    }

    #[test]
    fn test_gravity_integration() {
        let mut body = rect(0, 0.0, 0.0, 0.1, 0.1);
        body.force = Vec2::new(0.0, -1.2);
        {
            let mut bodies = [&mut body];
            engine().advance(&mut bodies, always, 0.01);
        }
        assert!((body.velocity.y + 0.012).abs() < 1e-6);
        assert!(body.origin.y < 0.0);
    }

    #[test]
    fn test_target_spring_pulls_toward_target() {
        let mut body = rect(0, 0.0, 0.0, 0.1, 0.1);
        body.target = Some(Vec2::new(0.2, -0.1));
        body.lateral_friction = 1.5;
        let mut physics = engine();
        for _ in 0..600 {
            let mut bodies = [&mut body];
            physics.advance(&mut bodies, always, 0.01);
        }
        assert!((body.origin - Vec2::new(0.2, -0.1)).length() < 0.05);
    }

    #[test]
    fn test_target_angle_restores_rotation() {
        let mut body = rect(0, 0.0, 0.0, 0.1, 0.1);
        body.angle = 0.5;
        body.target_angle = Some(0.0);
        body.rotational_friction = 7.5;
        let mut physics = engine();
        for _ in 0..300 {
            let mut bodies = [&mut body];
            physics.advance(&mut bodies, always, 0.01);
        }
        assert!(body.angle.abs() < 0.05);
    }
}
