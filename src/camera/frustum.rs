//! View frustum for visibility tests.
//!
//! Planes are extracted from a view-projection matrix (Gribb/Hartmann) for
//! the [0, 1] depth range produced by [`ProjectionCamera`]. The tracking
//! overlay uses it to confirm that a framed target is actually on screen.
//!
//! [`ProjectionCamera`]: super::ProjectionCamera

use glam::{Mat4, Vec3, Vec4};

/// Plane `normal · p + distance = 0` with a unit normal pointing inward.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal pointing into the frustum.
    pub normal: Vec3,
    /// Signed offset from the origin.
    pub distance: f32,
}

impl Plane {
    fn from_row(row: Vec4) -> Self {
        let len = row.truncate().length();
        if len > 0.0 {
            Self {
                normal: row.truncate() / len,
                distance: row.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance from `point`; positive on the inside.
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Six inward-facing planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Clipping planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the planes of `view_proj`.
    #[must_use]
    pub fn from_view_projection(view_proj: Mat4) -> Self {
        let rows = [
            view_proj.row(0),
            view_proj.row(1),
            view_proj.row(2),
            view_proj.row(3),
        ];
        Self {
            planes: [
                Plane::from_row(rows[3] + rows[0]),
                Plane::from_row(rows[3] - rows[0]),
                Plane::from_row(rows[3] + rows[1]),
                Plane::from_row(rows[3] - rows[1]),
                Plane::from_row(rows[2]),
                Plane::from_row(rows[3] - rows[2]),
            ],
        }
    }

    /// Whether `point` lies inside all six planes.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Whether a sphere at least touches the frustum.
    #[inline]
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }

    /// Whether a sphere lies entirely inside the frustum.
    #[inline]
    #[must_use]
    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= radius)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::camera::{CameraPose, ProjectionCamera};

    fn sideline_camera() -> ProjectionCamera {
        ProjectionCamera::new(CameraPose::new(
            Vec3::new(0.0, 7.0, -10.0),
            Vec2::new(-40.0, 180.0),
            45.0,
            0.1,
            200.0,
        ))
        .unwrap()
    }

    #[test]
    fn field_center_is_visible_from_sideline() {
        let frustum = sideline_camera().frustum(16.0 / 9.0);
        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(frustum.contains_sphere(Vec3::ZERO, 0.5));
    }

    #[test]
    fn points_behind_or_beyond_far_are_culled() {
        let frustum = sideline_camera().frustum(16.0 / 9.0);
        assert!(!frustum.contains_point(Vec3::new(0.0, 7.0, -20.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, -150.0, 300.0)));
    }

    #[test]
    fn narrow_window_culls_wide_points() {
        let camera = sideline_camera();
        let wide_point = Vec3::new(12.0, 0.0, 0.0);
        assert!(camera.frustum(3.0).contains_point(wide_point));
        assert!(!camera.frustum(0.5).contains_point(wide_point));
        assert!(camera.frustum(0.5).intersects_sphere(wide_point, 10.0));
    }
}
