use serde::Serialize;

use super::dimensions::ItemGeometry;

/// Geometry plus vertical placement of one item for one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub left: f64,
    pub width: f64,
    pub collision_left: f64,
    pub collision_width: f64,
    pub original_left: f64,
    /// Vertical offset from the top of the whole stack; `None` until placed.
    pub top: Option<f64>,
    pub height: f64,
    /// Whether the item takes part in collision stacking.
    pub stack: bool,
    /// Rank of the item's group, `None` when the group is unknown.
    pub order: Option<usize>,
}

impl Dimensions {
    pub fn new(geometry: ItemGeometry, height: f64, stack: bool, order: Option<usize>) -> Self {
        Self {
            left: geometry.left,
            width: geometry.width,
            collision_left: geometry.collision_left,
            collision_width: geometry.collision_width,
            original_left: geometry.original_left,
            top: None,
            height,
            stack,
            order,
        }
    }
}

impl AsRef<Dimensions> for Dimensions {
    fn as_ref(&self) -> &Dimensions {
        self
    }
}

impl AsMut<Dimensions> for Dimensions {
    fn as_mut(&mut self) -> &mut Dimensions {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLayout {
    pub id: Option<String>,
    /// Position of the item in the caller's item list.
    pub index: usize,
    pub dimensions: Dimensions,
}

impl AsRef<Dimensions> for ItemLayout {
    fn as_ref(&self) -> &Dimensions {
        &self.dimensions
    }
}

impl AsMut<Dimensions> for ItemLayout {
    fn as_mut(&mut self) -> &mut Dimensions {
        &mut self.dimensions
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackResult {
    pub height: f64,
    pub group_heights: Vec<f64>,
    pub group_tops: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub items: Vec<ItemLayout>,
    pub group_count: usize,
    pub stack: StackResult,
}
