// Camera rig: named focus states, the lerped parameter record that eases
// between them, and the orbit primitive the renderer reads each frame.

use super::constants::*;
use glam::{Mat4, Vec3, Vec4};

#[inline]
pub fn lerp(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

/// Named camera destinations. Stage focuses carry a lineup-UI binding and
/// are announced on the page-level `stagestate` event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageFocus {
    ZoomOut,
    MainStage,
    SecondStage,
    ThirdStage,
}

impl StageFocus {
    /// Event payload name, as exposed on the `stagestate` event.
    pub fn as_str(self) -> &'static str {
        match self {
            StageFocus::ZoomOut => "zoomOut",
            StageFocus::MainStage => "mainStage",
            StageFocus::SecondStage => "secondStage",
            StageFocus::ThirdStage => "thirdStage",
        }
    }
}

/// A requestable camera state: focus point plus orbit bounds.
#[derive(Clone, Copy, Debug)]
pub struct CameraPose {
    pub focus: StageFocus,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

/// Build the preset for a focus. Targets come from the scene vectors
/// captured at load time, so they are passed in rather than baked here.
pub fn pose_for(focus: StageFocus, target: Vec3) -> CameraPose {
    let (distance, polar) = match focus {
        StageFocus::ZoomOut => (ZOOM_OUT_DISTANCE, ZOOM_OUT_POLAR),
        StageFocus::MainStage => (MAIN_STAGE_DISTANCE, MAIN_STAGE_POLAR),
        StageFocus::SecondStage => (SECOND_STAGE_DISTANCE, SECOND_STAGE_POLAR),
        StageFocus::ThirdStage => (THIRD_STAGE_DISTANCE, THIRD_STAGE_POLAR),
    };
    CameraPose {
        focus,
        target,
        min_distance: distance.0,
        max_distance: distance.1,
        min_polar: polar.0,
        max_polar: polar.1,
    }
}

/// The lerped camera parameter record.
///
/// `current_*` fields converge toward their `new_*` counterparts while
/// `lerping` is set; only [`CameraParams::request_state`] writes the
/// `new_*` side, and only [`CameraParams::step`] advances the `current_*`
/// side. When `lerp_amount` rounds to 1.00 (two decimals) the lerp
/// deactivates and the amount resets.
#[derive(Clone, Debug)]
pub struct CameraParams {
    pub focus: StageFocus,
    pub current_target: Vec3,
    pub new_target: Vec3,
    pub current_min_distance: f32,
    pub new_min_distance: f32,
    pub current_max_distance: f32,
    pub new_max_distance: f32,
    pub current_min_polar: f32,
    pub new_min_polar: f32,
    pub current_max_polar: f32,
    pub new_max_polar: f32,
    pub lerping: bool,
    pub lerp_amount: f32,
}

impl CameraParams {
    /// Start at the zoom-out preset with no lerp pending.
    pub fn new() -> Self {
        let p = pose_for(StageFocus::ZoomOut, Vec3::ZERO);
        CameraParams {
            focus: p.focus,
            current_target: Vec3::ZERO,
            new_target: Vec3::ZERO,
            current_min_distance: p.min_distance,
            new_min_distance: p.min_distance,
            current_max_distance: p.max_distance,
            new_max_distance: p.max_distance,
            current_min_polar: p.min_polar,
            new_min_polar: p.min_polar,
            current_max_polar: p.max_polar,
            new_max_polar: p.max_polar,
            lerping: false,
            lerp_amount: 0.0,
        }
    }

    /// Arm a transition toward `pose`. Writes only the target side.
    pub fn request_state(&mut self, pose: &CameraPose) {
        self.focus = pose.focus;
        self.new_target = pose.target;
        self.new_min_distance = pose.min_distance;
        self.new_max_distance = pose.max_distance;
        self.new_min_polar = pose.min_polar;
        self.new_max_polar = pose.max_polar;
        self.lerping = true;
        self.lerp_amount = 0.0;
    }

    /// Advance the lerp by `dt` seconds. Returns true on the single frame
    /// the lerp converges and deactivates.
    pub fn step(&mut self, dt: f32) -> bool {
        if !self.lerping {
            return false;
        }
        let a = (dt / CAMERA_LERP_SECONDS).clamp(0.0, 1.0);
        self.current_target = self.current_target.lerp(self.new_target, a);
        self.lerp_amount = lerp(self.lerp_amount, 1.0, a);
        self.current_min_distance = lerp(self.current_min_distance, self.new_min_distance, a);
        self.current_max_distance = lerp(self.current_max_distance, self.new_max_distance, a);
        self.current_min_polar = lerp(self.current_min_polar, self.new_min_polar, a);
        self.current_max_polar = lerp(self.current_max_polar, self.new_max_polar, a);

        // Two-decimal convergence heuristic, not exact equality.
        if (self.lerp_amount * 100.0).round() as i32 == 100 {
            self.lerping = false;
            self.lerp_amount = 0.0;
            return true;
        }
        false
    }
}

impl Default for CameraParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Orbit camera primitive: spherical coordinates around a focus target
/// with clamped distance and polar bounds. Auto-rotates slowly; pointer
/// drag and wheel feed [`OrbitCamera::rotate`] / [`OrbitCamera::zoom`].
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub fov_y_radians: f32,
    pub aspect: f32,
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        let fov = if aspect < 1.0 {
            FOV_PORTRAIT_DEG
        } else {
            FOV_LANDSCAPE_DEG
        };
        OrbitCamera {
            target: Vec3::ZERO,
            azimuth: std::f32::consts::FRAC_PI_4,
            polar: std::f32::consts::FRAC_PI_4,
            distance: ZOOM_OUT_DISTANCE.1,
            min_distance: ZOOM_OUT_DISTANCE.0,
            max_distance: ZOOM_OUT_DISTANCE.1,
            min_polar: ZOOM_OUT_POLAR.0,
            max_polar: ZOOM_OUT_POLAR.1,
            fov_y_radians: fov.to_radians(),
            aspect,
        }
    }

    /// Copy the lerped bounds onto the orbit. Applied every frame whether
    /// or not the lerp is active.
    pub fn apply_params(&mut self, p: &CameraParams) {
        self.target = p.current_target;
        self.min_distance = p.current_min_distance;
        self.max_distance = p.current_max_distance;
        self.min_polar = p.current_min_polar;
        self.max_polar = p.current_max_polar;
    }

    /// Advance auto-rotation and re-clamp into the current bounds.
    pub fn update(&mut self, dt: f32) {
        // Matches an orbit-controls auto-rotate speed of 0.5 (one full
        // revolution in two minutes).
        self.azimuth += AUTO_ROTATE_SPEED * std::f32::consts::TAU / 60.0 * dt;
        if self.azimuth > std::f32::consts::TAU {
            self.azimuth -= std::f32::consts::TAU;
        }
        self.clamp();
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * ROTATE_SPEED;
        self.polar -= dy * ROTATE_SPEED;
        self.clamp();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 + delta * ZOOM_SPEED;
        self.clamp();
    }

    fn clamp(&mut self) {
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.polar = self.polar.clamp(self.min_polar.max(1e-3), self.max_polar);
    }

    /// World-space eye position from the spherical coordinates.
    pub fn eye(&self) -> Vec3 {
        let sp = self.polar.sin();
        self.target
            + self.distance * Vec3::new(sp * self.azimuth.cos(), self.polar.cos(), sp * self.azimuth.sin())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_radians, self.aspect, CAMERA_NEAR, CAMERA_FAR)
    }
}

/// Compute a world-space ray through normalized device coordinates.
///
/// Returns `(ray_origin, ray_direction)`; the origin is the camera eye.
pub fn screen_ray(camera: &OrbitCamera, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
    let inv = (camera.projection_matrix() * camera.view_matrix()).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    let ro = camera.eye();
    let rd = (p1 - ro).normalize();
    (ro, rd)
}
