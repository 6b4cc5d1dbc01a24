// Pointer ray hit-testing against the three stage markers.
//
// Pickables carry an explicit [`StageId`] tag assigned when the scene is
// built, so selection never inspects node names.

use glam::Vec3;
use smallvec::SmallVec;

/// The three festival stages, in selection-preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageId {
    Main,
    Second,
    Third,
}

impl StageId {
    pub const ALL: [StageId; 3] = [StageId::Main, StageId::Second, StageId::Third];

    pub fn index(self) -> usize {
        match self {
            StageId::Main => 0,
            StageId::Second => 1,
            StageId::Third => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StageId::Main => "main-stage",
            StageId::Second => "second-stage",
            StageId::Third => "third-stage",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum PickShape {
    Sphere { center: Vec3, radius: f32 },
    Aabb { min: Vec3, max: Vec3 },
}

/// A raycast target bound to a stage.
#[derive(Clone, Copy, Debug)]
pub struct Pickable {
    pub stage: StageId,
    pub shape: PickShape,
}

/// Ray/sphere intersection; returns the near hit distance along the ray.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Ray/AABB slab intersection; returns the entry distance along the ray.
#[inline]
pub fn ray_aabb(ray_origin: Vec3, ray_dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let o = ray_origin[axis];
        let d = ray_dir[axis];
        if d.abs() < 1e-8 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far || t_far < 0.0 {
            return None;
        }
    }
    Some(t_near.max(0.0))
}

/// Cast a ray against the pickables and return the selected stage.
///
/// The nearest hit wins; at equal distance the Main → Second → Third
/// preference order decides.
pub fn pick_stage(ray_origin: Vec3, ray_dir: Vec3, pickables: &[Pickable]) -> Option<StageId> {
    let mut hits: SmallVec<[(f32, StageId); 8]> = SmallVec::new();
    for p in pickables {
        let t = match p.shape {
            PickShape::Sphere { center, radius } => ray_sphere(ray_origin, ray_dir, center, radius),
            PickShape::Aabb { min, max } => ray_aabb(ray_origin, ray_dir, min, max),
        };
        if let Some(t) = t {
            hits.push((t, p.stage));
        }
    }
    hits.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    hits.first().map(|&(_, stage)| stage)
}
