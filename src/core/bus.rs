// Typed event bus.
//
// A fixed, enumerated set of page-level events replaces ad-hoc DOM
// CustomEvent pub/sub internally; the web layer installs one subscriber
// that bridges each event onto the document for external listeners.

use super::camera::StageFocus;
use super::shading::ShadingMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// The camera was requested toward a named state.
    StageState(StageFocus),
    /// A shading transition was requested toward a mode.
    ShaderState(ShadingMode),
    /// The site model finished loading and all four variants are built.
    SceneLoaded,
}

impl AppEvent {
    /// DOM event name used by the bridge.
    pub fn dom_name(&self) -> &'static str {
        match self {
            AppEvent::StageState(_) => "stagestate",
            AppEvent::ShaderState(_) => "shaderstate",
            AppEvent::SceneLoaded => "gltfloaded",
        }
    }

    /// `state` payload field carried on the DOM event, if any.
    pub fn payload(&self) -> Option<&'static str> {
        match self {
            AppEvent::StageState(f) => Some(f.as_str()),
            AppEvent::ShaderState(m) => Some(m.as_str()),
            AppEvent::SceneLoaded => None,
        }
    }
}

type Listener = Box<dyn FnMut(&AppEvent)>;

/// Single-threaded observer list. Emission order follows subscription
/// order; listeners run to completion before `emit` returns.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AppEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, event: AppEvent) {
        for l in &mut self.listeners {
            l(&event);
        }
    }
}
