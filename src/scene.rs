use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::LayoutConfig;
use crate::layout::{ActiveInteraction, GeometryError, TimeWindow, ViewState};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid visible range: {0}")]
    Window(#[from] GeometryError),
    #[error("viewport width must be positive, got {0}")]
    Width(f64),
    #[error("canvas buffer must be a positive number of viewports, got {0}")]
    Buffer(f64),
}

/// Everything a single layout pass needs, as read from a JSON document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub visible_time_start: f64,
    pub visible_time_end: f64,
    /// Viewport width in pixels.
    pub width: f64,
    #[serde(default)]
    pub groups: Vec<Value>,
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub interaction: Option<ActiveInteraction>,
}

impl Scene {
    pub fn from_json(input: &str) -> Result<Self, SceneError> {
        let scene: Scene = serde_json::from_str(input)?;
        scene.visible_window()?;
        if !(scene.width > 0.0) {
            return Err(SceneError::Width(scene.width));
        }
        Ok(scene)
    }

    pub fn visible_window(&self) -> Result<TimeWindow, GeometryError> {
        TimeWindow::checked(self.visible_time_start, self.visible_time_end)
    }

    pub fn view(&self, config: &LayoutConfig) -> Result<ViewState, SceneError> {
        if !(config.buffer.is_finite() && config.buffer > 0.0) {
            return Err(SceneError::Buffer(config.buffer));
        }
        let view = ViewState::from_visible(self.visible_window()?, self.width, config.buffer);
        Ok(match self.interaction.clone() {
            Some(active) => view.with_interaction(active),
            None => view,
        })
    }
}
