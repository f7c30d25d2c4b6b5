use super::types::Dimensions;

/// Tolerance that keeps touching boxes from counting as overlapping.
pub const EPSILON: f64 = 0.001;

/// Axis-aligned overlap test on the collision boxes of two placed items.
///
/// Horizontal extent comes from `collision_left`/`collision_width`, vertical
/// extent from `top`/`height`. Unplaced items never overlap anything.
pub fn overlaps(a: &Dimensions, b: &Dimensions, _line_height: f64, epsilon: f64) -> bool {
    let (Some(a_top), Some(b_top)) = (a.top, b.top) else {
        return false;
    };
    let vertical_margin = 0.0;
    a.collision_left + epsilon < b.collision_left + b.collision_width
        && a.collision_left + a.collision_width - epsilon > b.collision_left
        && a_top - vertical_margin + epsilon < b_top + b.height
        && a_top + a.height + vertical_margin - epsilon > b_top
}
