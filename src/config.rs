use crate::calendar::TimeSteps;
use crate::ir::ItemKeys;
use crate::layout::StackMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Height of one lane in pixels.
    pub line_height: f64,
    /// Item height as a fraction of `line_height`.
    pub item_height_ratio: f64,
    pub stack_mode: StackMode,
    /// Minimum time width of an item, and the snapping unit while dragging.
    pub drag_snap: f64,
    /// Canvas width in multiples of the visible viewport.
    pub buffer: f64,
    pub keys: ItemKeys,
    pub time_steps: TimeSteps,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_height: 30.0,
            item_height_ratio: 0.65,
            stack_mode: StackMode::NoStack,
            drag_snap: 15.0 * 60.0 * 1000.0,
            buffer: 3.0,
            keys: ItemKeys::default(),
            time_steps: TimeSteps::default(),
        }
    }
}

impl LayoutConfig {
    pub fn item_height(&self) -> f64 {
        self.line_height * self.item_height_ratio
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Emit grid cells alongside the item layout.
    pub axis: bool,
    pub pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            axis: false,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    line_height: Option<f64>,
    item_height_ratio: Option<f64>,
    #[serde(alias = "stackItems")]
    stack_mode: Option<StackModeFile>,
    drag_snap: Option<f64>,
    buffer: Option<f64>,
    keys: Option<ItemKeys>,
    time_steps: Option<TimeSteps>,
    axis: Option<bool>,
    pretty: Option<bool>,
}

/// `stackItems: true` is accepted next to the named modes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StackModeFile {
    Flag(bool),
    Mode(StackMode),
}

impl From<StackModeFile> for StackMode {
    fn from(value: StackModeFile) -> Self {
        match value {
            StackModeFile::Flag(true) => StackMode::Stack,
            StackModeFile::Flag(false) => StackMode::NoStack,
            StackModeFile::Mode(mode) => mode,
        }
    }
}

/// Reads a JSON (or JSON5) config file over the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents, config)
}

fn parse_config(contents: &str, mut config: Config) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(contents)?,
    };

    if let Some(v) = parsed.line_height {
        config.layout.line_height = v;
    }
    if let Some(v) = parsed.item_height_ratio {
        config.layout.item_height_ratio = v;
    }
    if let Some(v) = parsed.stack_mode {
        config.layout.stack_mode = v.into();
    }
    if let Some(v) = parsed.drag_snap {
        config.layout.drag_snap = v;
    }
    if let Some(v) = parsed.buffer {
        config.layout.buffer = v;
    }
    if let Some(v) = parsed.keys {
        config.layout.keys = v;
    }
    if let Some(v) = parsed.time_steps {
        config.layout.time_steps = v;
    }
    if let Some(v) = parsed.axis {
        config.render.axis = v;
    }
    if let Some(v) = parsed.pretty {
        config.render.pretty = v;
    }
    Ok(config)
}
