mod collision;
mod coords;
mod dimensions;
mod groups;
mod stacking;
pub(crate) mod types;
mod visibility;
pub use collision::*;
pub use coords::*;
pub use dimensions::*;
pub use groups::*;
pub use stacking::*;
pub use types::*;
pub use visibility::*;

use crate::config::LayoutConfig;
use crate::ir::{Record, field_bool, field_id, field_time};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gesture applied to one item, identified by its id field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveInteraction {
    pub item_id: String,
    #[serde(flatten)]
    pub interaction: Interaction,
}

/// Canvas geometry and gesture state for a single layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub canvas: TimeWindow,
    pub canvas_width: f64,
    pub interaction: Option<ActiveInteraction>,
}

impl ViewState {
    pub fn new(canvas: TimeWindow, canvas_width: f64) -> Self {
        Self {
            canvas,
            canvas_width,
            interaction: None,
        }
    }

    /// View whose canvas extends `buffer` viewports around what is visible.
    pub fn from_visible(visible: TimeWindow, viewport_width: f64, buffer: f64) -> Self {
        Self::new(
            canvas_window(&visible, buffer),
            canvas_width(viewport_width, buffer),
        )
    }

    pub fn with_interaction(mut self, interaction: ActiveInteraction) -> Self {
        self.interaction = Some(interaction);
        self
    }

    fn interaction_for(&self, item_id: Option<&str>) -> Interaction {
        match (&self.interaction, item_id) {
            (Some(active), Some(id)) if active.item_id == id => active.interaction,
            _ => Interaction::Idle,
        }
    }
}

/// Lays out every item visible on the canvas.
///
/// Items outside the canvas window, or without readable times, are left out
/// of the result. Items whose group is unknown keep their geometry but are
/// never placed (`top` stays `None`).
pub fn compute_layout<I: Record, G: Record>(
    items: &[I],
    groups: &[G],
    view: &ViewState,
    config: &LayoutConfig,
) -> Layout {
    let keys = &config.keys;
    let visible = visible_items(items, &view.canvas, keys);
    let group_order = build_group_order(groups, keys);
    let item_height = config.item_height();

    let mut placed = Vec::with_capacity(visible.len());
    for index in visible {
        let item = &items[index];
        let (Some(start), Some(end)) = (
            field_time(item, &keys.item_time_start_key),
            field_time(item, &keys.item_time_end_key),
        ) else {
            continue;
        };
        let id = field_id(item, &keys.item_id_key);
        let geometry = calculate_dimensions(&DimensionInput {
            item_time_start: start,
            item_time_end: end,
            interaction: view.interaction_for(id.as_deref()),
            window: view.canvas,
            canvas_width: view.canvas_width,
            drag_snap: config.drag_snap,
        });
        let order = field_id(item, &keys.item_group_key).and_then(|group| group_order.get(&group));
        let stack = !field_bool(item, &keys.item_overlay_key).unwrap_or(false);
        placed.push(ItemLayout {
            id,
            index,
            dimensions: Dimensions::new(geometry, item_height, stack, order),
        });
    }

    debug!(
        items = items.len(),
        visible = placed.len(),
        groups = group_order.len(),
        "computing timeline layout"
    );

    let mut layout = Layout {
        items: placed,
        group_count: group_order.len(),
        stack: StackResult::default(),
    };
    layout.restack(config.stack_mode, config.line_height, true);
    layout
}

impl Layout {
    /// Runs the stacking engine again over this layout's items. Without
    /// `force`, items that already have a `top` stay where they are.
    pub fn restack(&mut self, mode: StackMode, line_height: f64, force: bool) -> &StackResult {
        self.stack = apply_stack_mode(mode, &mut self.items, self.group_count, line_height, force);
        &self.stack
    }

    pub fn item(&self, id: &str) -> Option<&ItemLayout> {
        self.items.iter().find(|item| item.id.as_deref() == Some(id))
    }
}
