//! Screen-space picking.
//!
//! [`ObjectPicker`] unprojects a screen point through the inverse
//! view-projection into a world ray, then asks a [`SceneQuery`] for the
//! nearest object along it, or intersects it with the field plane.

mod picker;
mod ray;
mod scene;

pub use picker::ObjectPicker;
pub use ray::{intersect_aabb, intersect_sphere, Aabb, Ray};
pub use scene::{
    RayHit, Scene, SceneObject, SceneQuery, Shape, AGENT_HALF_WIDTH,
    AGENT_HEIGHT, BALL_RADIUS,
};
