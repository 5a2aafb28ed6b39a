use glam::Vec3;

use super::ray::Ray;
use super::scene::{RayHit, SceneQuery};
use crate::camera::ProjectionCamera;
use crate::game::EntityId;
use crate::viewport::Viewport;

/// Maps screen coordinates to scene objects and field positions.
///
/// A short-lived view over the camera, the viewport as of the call and a
/// scene. Picking never edits any of them and caches nothing, so results
/// always reflect the current pose.
#[derive(Debug)]
pub struct ObjectPicker<'a, S: SceneQuery + ?Sized> {
    camera: &'a ProjectionCamera,
    viewport: Viewport,
    scene: &'a S,
}

impl<'a, S: SceneQuery + ?Sized> ObjectPicker<'a, S> {
    /// Create a picker.
    #[must_use]
    pub fn new(
        camera: &'a ProjectionCamera,
        viewport: Viewport,
        scene: &'a S,
    ) -> Self {
        Self {
            camera,
            viewport,
            scene,
        }
    }

    /// World-space ray from the eye through the screen point `(x, y)`
    /// (pixels, origin top-left). `None` off-screen or for an empty
    /// viewport.
    #[must_use]
    pub fn ray_at(&self, x: f32, y: f32) -> Option<Ray> {
        if self.viewport.is_empty() || !self.viewport.contains(x, y) {
            return None;
        }
        let (ndc_x, ndc_y) = self.viewport.to_ndc(x, y);
        let inverse = self
            .camera
            .view_projection(self.viewport.aspect())
            .inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray::new(self.camera.position(), far - near)
    }

    /// All objects under the screen point, nearest first. Equal distances
    /// are ordered by ascending id.
    #[must_use]
    pub fn hits(&self, x: f32, y: f32) -> Vec<RayHit> {
        let Some(ray) = self.ray_at(x, y) else {
            return Vec::new();
        };
        let mut hits = Vec::new();
        self.scene.intersect(&ray, &mut hits);
        hits.retain(|hit| hit.distance.is_finite() && hit.distance >= 0.0);
        hits.sort_by(|a, b| {
            a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id))
        });
        hits
    }

    /// Nearest object under the screen point.
    #[must_use]
    pub fn pick(&self, x: f32, y: f32) -> Option<EntityId> {
        self.hits(x, y).first().map(|hit| hit.id)
    }

    /// Point on the field plane (`y = 0`) under the screen point.
    #[must_use]
    pub fn pick_field(&self, x: f32, y: f32) -> Option<Vec3> {
        let ray = self.ray_at(x, y)?;
        ray.intersect_plane_y(0.0).map(|t| ray.at(t))
    }
}
