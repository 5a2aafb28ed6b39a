//! Scene query interface consumed by the picker, and a reference scene of
//! pickable shapes.

use glam::Vec3;

use super::ray::{intersect_aabb, intersect_sphere, Aabb, Ray};
use crate::game::{EntityId, EntityKind, GameState};

/// One ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Object that was hit.
    pub id: EntityId,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Ray query over pickable scene objects.
pub trait SceneQuery {
    /// Append every object `ray` hits to `hits`, in any order.
    fn intersect(&self, ray: &Ray, hits: &mut Vec<RayHit>);
}

/// Pickable bounding shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere.
    Sphere {
        /// Center.
        center: Vec3,
        /// Radius.
        radius: f32,
    },
    /// Axis-aligned box.
    Box(Aabb),
}

impl Shape {
    /// Nearest non-negative hit distance.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match self {
            Self::Sphere { center, radius } => {
                intersect_sphere(ray, *center, *radius)
            }
            Self::Box(aabb) => intersect_aabb(ray, aabb),
        }
    }
}

/// A pickable object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// Identifier reported on a hit.
    pub id: EntityId,
    /// Bounding shape.
    pub shape: Shape,
}

/// Ball radius in metres.
pub const BALL_RADIUS: f32 = 0.042;
/// Half of an agent's footprint in metres.
pub const AGENT_HALF_WIDTH: f32 = 0.15;
/// Agent height in metres.
pub const AGENT_HEIGHT: f32 = 0.58;

/// Flat list of pickable objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounding shapes for every entity in `state`: a sphere for the ball,
    /// an upright box standing on the entity position for agents.
    #[must_use]
    pub fn from_game_state(state: &GameState) -> Self {
        let mut scene = Self::new();
        for entity in state.entities() {
            let shape = match entity.kind {
                EntityKind::Ball => Shape::Sphere {
                    center: entity.position,
                    radius: BALL_RADIUS,
                },
                EntityKind::Agent { .. } => {
                    let half =
                        Vec3::new(AGENT_HALF_WIDTH, 0.0, AGENT_HALF_WIDTH);
                    Shape::Box(Aabb::new(
                        entity.position - half,
                        entity.position + half + Vec3::Y * AGENT_HEIGHT,
                    ))
                }
            };
            scene.insert(entity.id, shape);
        }
        scene
    }

    /// Add an object, replacing any existing object with the same id.
    pub fn insert(&mut self, id: EntityId, shape: Shape) {
        if let Some(object) = self.objects.iter_mut().find(|o| o.id == id) {
            object.shape = shape;
        } else {
            self.objects.push(SceneObject { id, shape });
        }
    }

    /// Remove an object. Returns `false` if it was not present.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }

    /// Objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneQuery for Scene {
    fn intersect(&self, ray: &Ray, hits: &mut Vec<RayHit>) {
        hits.extend(self.objects.iter().filter_map(|object| {
            object
                .shape
                .intersect(ray)
                .map(|distance| RayHit {
                    id: object.id,
                    distance,
                })
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{FieldDimensions, Team};

    #[test]
    fn game_state_entities_become_shapes() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let ball =
            state.spawn(EntityKind::Ball, Vec3::new(0.0, BALL_RADIUS, 0.0));
        let agent = state.spawn(
            EntityKind::Agent {
                team: Team::Left,
                number: 2,
            },
            Vec3::new(-3.0, 0.0, 1.0),
        );
        let scene = Scene::from_game_state(&state);
        assert_eq!(scene.len(), 2);

        let down = Ray::new(Vec3::new(-3.0, 5.0, 1.0), Vec3::NEG_Y).unwrap();
        let mut hits = Vec::new();
        scene.intersect(&down, &mut hits);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, agent);
        assert!((hits[0].distance - (5.0 - AGENT_HEIGHT)).abs() < 1e-5);

        let at_ball = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y).unwrap();
        hits.clear();
        scene.intersect(&at_ball, &mut hits);
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), [ball]);
    }

    #[test]
    fn insert_replaces_and_remove_deletes() {
        let mut scene = Scene::new();
        let id = EntityId(4);
        scene.insert(
            id,
            Shape::Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
            },
        );
        scene.insert(id, Shape::Box(Aabb::from_center(Vec3::X, Vec3::ONE)));
        assert_eq!(scene.len(), 1);
        assert!(matches!(scene.objects()[0].shape, Shape::Box(_)));
        assert!(scene.remove(id));
        assert!(!scene.remove(id));
        assert!(scene.is_empty());
    }
}
