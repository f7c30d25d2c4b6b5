use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::collision::{EPSILON, overlaps};
use super::groups::partition_by_group;
use super::types::{Dimensions, StackResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackMode {
    /// Colliding items are pushed into separate lanes.
    Stack,
    /// Every item is centered in a single lane per group.
    #[default]
    NoStack,
}

pub fn apply_stack_mode<T: AsRef<Dimensions> + AsMut<Dimensions>>(
    mode: StackMode,
    dims: &mut [T],
    group_count: usize,
    line_height: f64,
    force: bool,
) -> StackResult {
    match mode {
        StackMode::Stack => stack_items(dims, group_count, line_height, force),
        StackMode::NoStack => nostack_items(dims, group_count, line_height, force),
    }
}

fn reset_tops<T: AsMut<Dimensions>>(dims: &mut [T]) {
    for item in dims.iter_mut() {
        item.as_mut().top = None;
    }
}

/// Greedy lane packing.
///
/// Items are bottom-aligned in their lane. An item that collides with an
/// already placed stackable item of its group moves one lane below it, and
/// the scan restarts until the item is clear. Items placed by an earlier
/// pass keep their `top` unless `force` is set.
pub fn stack_items<T: AsRef<Dimensions> + AsMut<Dimensions>>(
    dims: &mut [T],
    group_count: usize,
    line_height: f64,
    force: bool,
) -> StackResult {
    if force {
        reset_tops(dims);
    }
    let buckets = partition_by_group(dims, group_count);

    let mut result = StackResult::default();
    let mut total_height = 0.0;
    for bucket in &buckets {
        result.group_tops.push(total_height);

        let mut group_height = 0.0_f64;
        let mut vertical_margin = 0.0;
        let mut pending = VecDeque::new();
        for &idx in bucket {
            let item = dims[idx].as_ref();
            vertical_margin = line_height - item.height;
            if !item.stack {
                continue;
            }
            match item.top {
                None => pending.push_back(idx),
                // Lanes kept from an earlier pass still occupy the group.
                Some(top) => group_height = group_height.max(top + item.height - total_height),
            }
        }

        while let Some(idx) = pending.pop_front() {
            let height = dims[idx].as_ref().height;
            let top = settle(dims, bucket, idx, total_height + line_height - height, line_height);
            group_height = group_height
                .max(line_height)
                .max(top + height - total_height);
        }

        let height = (group_height + vertical_margin).max(line_height);
        result.group_heights.push(height);
        total_height += height;
    }
    result.height = total_height;
    debug!(
        groups = group_count,
        items = dims.len(),
        height = total_height,
        "stacked timeline items"
    );
    result
}

/// Places `idx` at `top` and walks it down until it collides with nothing.
///
/// Invariant: every move sets `top` to one lane below the item it hit, which
/// is strictly lower than before and clear of that item for good, so each
/// other item of the bucket causes at most one move.
fn settle<T: AsRef<Dimensions> + AsMut<Dimensions>>(
    dims: &mut [T],
    bucket: &[usize],
    idx: usize,
    mut top: f64,
    line_height: f64,
) -> f64 {
    dims[idx].as_mut().top = Some(top);
    for _ in 0..=bucket.len() {
        let Some(hit) = first_collision(dims, bucket, idx, line_height) else {
            break;
        };
        let Some(hit_top) = dims[hit].as_ref().top else {
            break;
        };
        trace!(item = idx, hit, top = hit_top + line_height, "lane collision");
        top = hit_top + line_height;
        dims[idx].as_mut().top = Some(top);
    }
    top
}

fn first_collision<T: AsRef<Dimensions>>(
    dims: &[T],
    bucket: &[usize],
    idx: usize,
    line_height: f64,
) -> Option<usize> {
    let item = dims[idx].as_ref();
    bucket.iter().copied().find(|&other| {
        let candidate = dims[other].as_ref();
        other != idx
            && candidate.top.is_some()
            && candidate.stack
            && overlaps(item, candidate, line_height, EPSILON)
    })
}

/// Centers every unplaced item in its group's single lane, ignoring overlaps.
pub fn nostack_items<T: AsRef<Dimensions> + AsMut<Dimensions>>(
    dims: &mut [T],
    group_count: usize,
    line_height: f64,
    force: bool,
) -> StackResult {
    if force {
        reset_tops(dims);
    }
    let buckets = partition_by_group(dims, group_count);

    let mut result = StackResult::default();
    let mut total_height = 0.0;
    for bucket in &buckets {
        result.group_tops.push(total_height);

        let mut group_height = 0.0_f64;
        for &idx in bucket {
            let item = dims[idx].as_mut();
            if item.top.is_none() {
                item.top = Some(total_height + (line_height - item.height) / 2.0);
                group_height = group_height.max(line_height);
            }
        }

        let height = group_height.max(line_height);
        result.group_heights.push(height);
        total_height += height;
    }
    result.height = total_height;
    debug!(
        groups = group_count,
        items = dims.len(),
        height = total_height,
        "laid out timeline items without stacking"
    );
    result
}
