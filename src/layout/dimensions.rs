use serde::{Deserialize, Serialize};

use super::coords::{TimeWindow, time_to_pixel_ratio};

/// Rendered bars never get narrower than this, in pixels.
pub const MIN_ITEM_WIDTH: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEdge {
    Left,
    Right,
}

/// Gesture in progress on an item, as seen by a single layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Interaction {
    #[default]
    Idle,
    #[serde(rename_all = "camelCase")]
    Dragging { drag_time: f64 },
    #[serde(rename_all = "camelCase")]
    Resizing { edge: ResizeEdge, resize_time: f64 },
}

impl Interaction {
    fn resized_start(&self, start: f64) -> f64 {
        match *self {
            Interaction::Resizing {
                edge: ResizeEdge::Left,
                resize_time,
            } => resize_time,
            _ => start,
        }
    }

    fn resized_end(&self, end: f64) -> f64 {
        match *self {
            Interaction::Resizing {
                edge: ResizeEdge::Right,
                resize_time,
            } => resize_time,
            _ => end,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DimensionInput {
    pub item_time_start: f64,
    pub item_time_end: f64,
    pub interaction: Interaction,
    pub window: TimeWindow,
    pub canvas_width: f64,
    pub drag_snap: f64,
}

/// Horizontal geometry of one item.
///
/// `left` and `width` are pixels. The collision box is kept in time units so
/// overlap tests do not depend on zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemGeometry {
    pub left: f64,
    pub width: f64,
    pub collision_left: f64,
    pub collision_width: f64,
    pub original_left: f64,
}

pub fn calculate_dimensions(input: &DimensionInput) -> ItemGeometry {
    let DimensionInput {
        item_time_start,
        item_time_end,
        interaction,
        window,
        canvas_width,
        drag_snap,
    } = *input;

    let start = interaction.resized_start(item_time_start);
    let end = interaction.resized_end(item_time_end);
    let width = (end - start).max(drag_snap);

    let (x, collision_left, collision_width) = match interaction {
        Interaction::Dragging { drag_time } if item_time_start >= drag_time => (
            drag_time,
            drag_time,
            (item_time_end - drag_time).max(drag_snap),
        ),
        // Dragged later: the box spans from the original start to the
        // dragged end so neighbours are pushed while the gesture runs.
        Interaction::Dragging { drag_time } => (
            drag_time,
            item_time_start,
            (drag_time - item_time_start + width).max(drag_snap),
        ),
        _ => (start, start, width),
    };

    let ratio = 1.0 / time_to_pixel_ratio(&window, canvas_width);
    ItemGeometry {
        left: (x - window.start) * ratio,
        width: (width * ratio).max(MIN_ITEM_WIDTH),
        collision_left,
        collision_width,
        original_left: item_time_start,
    }
}

/// Time range an item would occupy if the gesture ended now.
pub fn interaction_new_times(
    item_time_start: f64,
    item_time_end: f64,
    interaction: &Interaction,
) -> (f64, f64) {
    match *interaction {
        Interaction::Dragging { drag_time } => {
            (drag_time, drag_time + (item_time_end - item_time_start))
        }
        _ => (
            interaction.resized_start(item_time_start),
            interaction.resized_end(item_time_end),
        ),
    }
}
