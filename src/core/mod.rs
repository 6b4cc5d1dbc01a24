pub mod bus;
pub mod camera;
pub mod constants;
pub mod countdown;
pub mod picking;
pub mod scene;
pub mod shading;
pub mod sprite;

pub use bus::{AppEvent, EventBus};
pub use camera::{pose_for, screen_ray, CameraParams, CameraPose, OrbitCamera, StageFocus};
pub use countdown::{format_countdown, FestivalDate, FESTIVAL_DATES};
pub use picking::{pick_stage, Pickable, StageId};
pub use scene::{
    build_variants, make_intersectors, pickables, MaterialKind, NodeTag, SceneNode, SceneVariant,
    SceneVectors,
};
pub use shading::{PassConfig, ShadingMachine, ShadingMode, ShadingStep};
pub use sprite::StageSprite;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static SPRITE_WGSL: &str = include_str!("../shaders/sprite.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
