use crate::ir::{ItemKeys, Record, field_time};

use super::coords::TimeWindow;

/// Indices of items whose time range touches `window`, both ends inclusive.
/// Items without readable start and end times are never visible.
pub fn visible_items<R: Record>(items: &[R], window: &TimeWindow, keys: &ItemKeys) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            let start = field_time(*item, &keys.item_time_start_key);
            let end = field_time(*item, &keys.item_time_end_key);
            matches!(
                (start, end),
                (Some(start), Some(end)) if start <= window.end && end >= window.start
            )
        })
        .map(|(idx, _)| idx)
        .collect()
}
