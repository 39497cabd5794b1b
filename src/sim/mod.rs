//! Fixed timestep simulation module
//!
//! All gameplay physics lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (chicken, landing bar, bugs in spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod entities;
pub mod physics;
pub mod state;

pub use body::{Body, BodyConfig, BodyId};
pub use physics::{CollisionFilter, CollisionResult, PhysicsEngine, PlainPhysics, box_box_collision};
pub use state::{GameState, RunTime, collide_bodies, out_of_bounds};
