//! Ray primitives: construction, slab ray/box test, ray/sphere test and
//! ground-plane intersection.

use glam::Vec3;

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. `None` for a zero or
    /// non-finite direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        if !origin.is_finite() {
            return None;
        }
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at distance `t` along the ray.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to where the ray crosses the horizontal plane at `height`,
    /// if it does so in front of the origin.
    #[must_use]
    pub fn intersect_plane_y(&self, height: f32) -> Option<f32> {
        if self.direction.y.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then_some(t)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two corners in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box centered at `center`.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents.abs(), center + half_extents.abs())
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

const PARALLEL_EPSILON: f32 = 1e-8;

/// Slab test. Returns the distance to the nearest non-negative crossing,
/// which is the exit distance when the origin is inside the box.
#[must_use]
pub fn intersect_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    // Near-zero components get a huge inverse so their slab never clips.
    let inv = |d: f32| {
        if d.abs() < PARALLEL_EPSILON {
            1.0 / PARALLEL_EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    let inv_dir = Vec3::new(
        inv(ray.direction.x),
        inv(ray.direction.y),
        inv(ray.direction.z),
    );

    let t_min = (aabb.min - ray.origin) * inv_dir;
    let t_max = (aabb.max - ray.origin) * inv_dir;
    let t_near = t_min.min(t_max).max_element();
    let t_far = t_min.max(t_max).min_element();

    if t_near > t_far || t_far < 0.0 {
        None
    } else if t_near >= 0.0 {
        Some(t_near)
    } else {
        Some(t_far)
    }
}

/// Ray/sphere test. Returns the nearest non-negative distance.
#[must_use]
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}
