// Shading-state transition engine.
//
// The venue map keeps four parallel representations of the loaded site
// model (map, basic, CAD, textured). Switching between them is masked by
// a pixelation dissolve: the outgoing variant's pixel size ramps up to a
// maximum, the logical mode flips behind the blocks, then the incoming
// variant ramps back down. The ramp is advanced from the frame tick by
// elapsed time; re-requesting a transition replaces the in-flight ramp so
// two ramps can never fight over the same passes.

use super::constants::*;

/// The four scene representations, cycled in a fixed ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingMode {
    Map,
    Basic,
    Cad,
    Textured,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 4] = [
        ShadingMode::Map,
        ShadingMode::Basic,
        ShadingMode::Cad,
        ShadingMode::Textured,
    ];

    /// Fixed successor: map -> basic -> cad -> textured -> map.
    pub fn next(self) -> ShadingMode {
        match self {
            ShadingMode::Map => ShadingMode::Basic,
            ShadingMode::Basic => ShadingMode::Cad,
            ShadingMode::Cad => ShadingMode::Textured,
            ShadingMode::Textured => ShadingMode::Map,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ShadingMode::Map => 0,
            ShadingMode::Basic => 1,
            ShadingMode::Cad => 2,
            ShadingMode::Textured => 3,
        }
    }

    /// Event payload name, as exposed on the page-level `shaderstate` event.
    pub fn as_str(self) -> &'static str {
        match self {
            ShadingMode::Map => "map",
            ShadingMode::Basic => "basic",
            ShadingMode::Cad => "cad",
            ShadingMode::Textured => "textured",
        }
    }
}

/// Per-variant render pass switches, consumed by the GPU state each frame.
///
/// Indexed by `ShadingMode::index()`. At most one plain pass and one
/// pixelated pass are enabled at any time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassConfig {
    pub plain_enabled: [bool; 4],
    pub pixel_enabled: [bool; 4],
    pub pixel_size: f32,
}

impl PassConfig {
    fn steady(mode: ShadingMode) -> Self {
        let mut plain = [false; 4];
        plain[mode.index()] = true;
        PassConfig {
            plain_enabled: plain,
            pixel_enabled: [false; 4],
            pixel_size: 1.0,
        }
    }
}

struct Transition {
    from: ShadingMode,
    to: ShadingMode,
    pixelation: f32,
    reached_max: bool,
    step_accum: f32,
}

/// Progress markers produced by [`ShadingMachine::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingStep {
    /// The ramp hit maximum pixelation: the logical mode flipped and the
    /// stage sprites now belong to the incoming scene.
    Switched(ShadingMode),
    /// The incoming ramp finished; the transition slot is cleared.
    Completed(ShadingMode),
}

pub struct ShadingMachine {
    current: ShadingMode,
    transition: Option<Transition>,
}

impl Default for ShadingMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadingMachine {
    pub fn new() -> Self {
        ShadingMachine {
            current: ShadingMode::Map,
            transition: None,
        }
    }

    pub fn current(&self) -> ShadingMode {
        self.current
    }

    pub fn in_transition(&self) -> bool {
        self.transition.is_some()
    }

    /// The mode the machine is settling toward (equals `current` once the
    /// ramp has passed its maximum, or when idle).
    pub fn target(&self) -> ShadingMode {
        self.transition.as_ref().map(|t| t.to).unwrap_or(self.current)
    }

    /// Advance to the ring successor of the current mode. Any in-flight
    /// ramp is dropped before the new one is armed. Returns the new target.
    pub fn request_next(&mut self) -> ShadingMode {
        let from = self.current;
        let to = from.next();
        self.transition = Some(Transition {
            from,
            to,
            pixelation: 1.0,
            reached_max: false,
            step_accum: 0.0,
        });
        to
    }

    /// Advance the ramp by `dt` seconds. Returns the most recent progress
    /// marker crossed this frame, if any.
    pub fn step(&mut self, dt: f32) -> Option<ShadingStep> {
        let t = self.transition.as_mut()?;
        t.step_accum += dt.max(0.0) * PIXELATION_STEPS_PER_SEC;
        let whole = t.step_accum.floor();
        t.step_accum -= whole;
        let mut event = None;
        for _ in 0..whole as u32 {
            if !t.reached_max {
                t.pixelation += 1.0;
                if t.pixelation >= MAX_PIXELATION {
                    t.pixelation = MAX_PIXELATION;
                    t.reached_max = true;
                    self.current = t.to;
                    event = Some(ShadingStep::Switched(t.to));
                }
            } else {
                t.pixelation -= 1.0;
                if t.pixelation <= 1.0 {
                    let done = t.to;
                    self.transition = None;
                    return Some(ShadingStep::Completed(done));
                }
            }
        }
        event
    }

    /// Pass switches for the renderer. Applied every frame whether or not
    /// a transition is running.
    pub fn pass_config(&self) -> PassConfig {
        match &self.transition {
            None => PassConfig::steady(self.current),
            Some(t) if !t.reached_max => {
                // Outgoing variant dissolves; its plain pass is held off.
                let mut pixel = [false; 4];
                pixel[t.from.index()] = true;
                PassConfig {
                    plain_enabled: [false; 4],
                    pixel_enabled: pixel,
                    pixel_size: t.pixelation,
                }
            }
            Some(t) => {
                // Incoming variant resolves out of the blocks.
                let mut pixel = [false; 4];
                pixel[t.to.index()] = true;
                PassConfig {
                    plain_enabled: [false; 4],
                    pixel_enabled: pixel,
                    pixel_size: t.pixelation,
                }
            }
        }
    }
}
