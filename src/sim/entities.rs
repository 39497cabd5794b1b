//! Entity factory: chicken, landing bar and bugs

use glam::Vec2;
use rand::Rng;

use super::body::{Body, BodyConfig, BodyId};
use crate::consts::*;
use crate::tuning::Tuning;

/// The chicken starts above the bar with a tiny horizontal jitter so no two
/// rounds balance identically.
pub fn chicken(rng: &mut impl Rng, tuning: &Tuning) -> Body {
    let jitter = rng.random_range(-CHICKEN_START_JITTER..CHICKEN_START_JITTER);
    Body::new(
        BodyId::CHICKEN,
        &BodyConfig {
            origin: Vec2::new(jitter, CHICKEN_START_Y),
            dimension: Vec2::splat(CHICKEN_SIZE),
            mass: CHICKEN_MASS,
            force: Vec2::new(0.0, -tuning.gravity),
            lateral_friction: tuning.lateral_friction,
            rotational_friction: tuning.rotational_friction,
            ..Default::default()
        },
    )
}

/// The bar the chicken lands on. It has no gravity; a spring holds it at its
/// target, which the game state moves with the handle.
pub fn landing_bar(tuning: &Tuning) -> Body {
    let origin = Vec2::new(0.0, LANDING_BAR_START_Y);
    Body::new(
        BodyId::LANDING_BAR,
        &BodyConfig {
            origin,
            dimension: Vec2::new(LANDING_BAR_WIDTH, LANDING_BAR_HEIGHT),
            mass: LANDING_BAR_MASS,
            lateral_friction: tuning.lateral_friction,
            rotational_friction: tuning.rotational_friction,
            target: Some(origin),
            target_angle: Some(0.0),
            ..Default::default()
        },
    )
}

/// A bug entering from the left or right edge, flying straight at the chicken.
/// Bugs have no friction so they drift until they leave the field.
pub fn bug(id: BodyId, rng: &mut impl Rng, chicken_origin: Vec2, tuning: &Tuning) -> Body {
    let x = if rng.random_bool(0.5) {
        -tuning.bug_spawn_x
    } else {
        tuning.bug_spawn_x
    };
    let y = if tuning.bug_spawn_y > 0.0 {
        rng.random_range(-tuning.bug_spawn_y..=tuning.bug_spawn_y)
    } else {
        0.0
    };
    let start = Vec2::new(x, y);
    let velocity = (chicken_origin - start).normalize_or_zero() * tuning.bug_speed;
    let spin = uniform(rng, tuning.bug_spin_min, tuning.bug_spin_max);

    Body::new(
        id,
        &BodyConfig {
            origin: start,
            dimension: Vec2::splat(BUG_SIZE),
            mass: BUG_MASS,
            velocity,
            angular_velocity: spin,
            lateral_friction: 0.0,
            rotational_friction: 0.0,
            ..Default::default()
        },
    )
}

/// Uniform in [min, max), or `min` when the range is empty
pub fn uniform(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_chicken_starts_above_bar() {
        let mut rng = Pcg32::seed_from_u64(1);
        let tuning = Tuning::default();
        let chicken = chicken(&mut rng, &tuning);
        let bar = landing_bar(&tuning);
        assert_eq!(chicken.id, BodyId::CHICKEN);
        assert_eq!(bar.id, BodyId::LANDING_BAR);
        assert!(chicken.origin.x.abs() <= CHICKEN_START_JITTER);
        assert!(chicken.origin.y > bar.origin.y);
        assert_eq!(chicken.force, Vec2::new(0.0, -1.2));
        assert_eq!(bar.force, Vec2::ZERO);
        assert_eq!(bar.target_angle, Some(0.0));
    }

    #[test]
    fn test_bug_spawn_parameters() {
        let tuning = Tuning::default();
        let chicken_origin = Vec2::new(0.0, 0.3);
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let bug = bug(BodyId(9), &mut rng, chicken_origin, &tuning);
            assert_eq!(bug.id, BodyId(9));
            assert!((bug.origin.x.abs() - 0.55).abs() < 1e-6);
            assert!(bug.origin.y >= -0.2 && bug.origin.y <= 0.2);
            assert!((bug.velocity.length() - 0.4).abs() < 1e-5);
            // Heads toward the chicken
            assert!(bug.velocity.dot(chicken_origin - bug.origin) > 0.0);
            assert!(bug.angular_velocity >= 2.0 && bug.angular_velocity < 6.0);
            assert_eq!(bug.dimension(), Vec2::splat(0.1));
            assert_eq!(bug.mass(), 0.5);
            assert_eq!(bug.lateral_friction, 0.0);
            assert_eq!(bug.rotational_friction, 0.0);
        }
    }

    #[test]
    fn test_bugs_spawn_on_both_sides() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let sides: Vec<bool> = (0..64)
            .map(|i| bug(BodyId(i + 2), &mut rng, Vec2::ZERO, &tuning).origin.x > 0.0)
            .collect();
        assert!(sides.iter().any(|s| *s));
        assert!(sides.iter().any(|s| !*s));
    }
}
