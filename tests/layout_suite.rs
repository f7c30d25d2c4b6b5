use std::path::{Path, PathBuf};

use timeline_stack::layout::{EPSILON, Interaction, overlaps};
use timeline_stack::{Layout, LayoutConfig, Scene, StackMode, compute_layout, load_config};

fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn load_scene(rel: &str) -> Scene {
    let input = std::fs::read_to_string(fixture_path(rel)).expect("fixture read failed");
    Scene::from_json(&input).expect("scene parse failed")
}

fn config(mode: StackMode) -> LayoutConfig {
    LayoutConfig {
        stack_mode: mode,
        drag_snap: 1.0,
        ..LayoutConfig::default()
    }
}

fn layout_scene(scene: &Scene, config: &LayoutConfig) -> Layout {
    let view = scene.view(config).expect("scene view failed");
    compute_layout(&scene.items, &scene.groups, &view, config)
}

fn top_of(layout: &Layout, id: &str) -> Option<f64> {
    layout.item(id).expect("item missing from layout").dimensions.top
}

fn assert_consistent(layout: &Layout, mode: StackMode, fixture: &str) {
    let stack = &layout.stack;
    assert_eq!(stack.group_heights.len(), layout.group_count, "{fixture}: group heights");
    assert_eq!(stack.group_tops.len(), layout.group_count, "{fixture}: group tops");
    let mut running = 0.0;
    for (top, height) in stack.group_tops.iter().zip(&stack.group_heights) {
        assert_eq!(*top, running, "{fixture}: group top out of sequence");
        running += height;
    }
    assert_eq!(stack.height, running, "{fixture}: total height");

    for item in &layout.items {
        let dims = &item.dimensions;
        let should_place = dims.order.is_some() && (dims.stack || mode == StackMode::NoStack);
        assert_eq!(dims.top.is_some(), should_place, "{fixture}: item {:?}", item.id);
        assert!(dims.width >= 3.0, "{fixture}: item {:?} too narrow", item.id);
    }

    if mode == StackMode::Stack {
        for (i, a) in layout.items.iter().enumerate() {
            for b in &layout.items[i + 1..] {
                let (a, b) = (&a.dimensions, &b.dimensions);
                if a.order.is_some() && a.order == b.order && a.stack && b.stack {
                    assert!(!overlaps(a, b, 30.0, EPSILON), "{fixture}: stacked items overlap");
                }
            }
        }
    }
}

#[test]
fn lay_out_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "stack/overlapping.json",
        "stack/groups.json",
        "nostack/basic.json",
        "interaction/drag.json",
        "interaction/resize.json",
    ];

    for rel in candidates {
        assert!(fixture_path(rel).exists(), "fixture missing: {rel}");
        let scene = load_scene(rel);
        for mode in [StackMode::Stack, StackMode::NoStack] {
            let layout = layout_scene(&scene, &config(mode));
            assert_consistent(&layout, mode, rel);
        }
    }
}

#[test]
fn overlapping_items_take_one_lane_each() {
    let scene = load_scene("stack/overlapping.json");
    let layout = layout_scene(&scene, &config(StackMode::Stack));
    let tops: Vec<_> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|id| top_of(&layout, id))
        .collect();
    assert_eq!(
        tops,
        vec![Some(10.5), Some(40.5), Some(70.5), Some(100.5), Some(130.5)]
    );
    assert_eq!(layout.stack.height, 160.5);
}

#[test]
fn groups_stack_in_declared_order() {
    let scene = load_scene("stack/groups.json");
    let layout = layout_scene(&scene, &config(StackMode::Stack));

    assert_eq!(layout.stack.group_tops, vec![0.0, 70.5, 141.0]);
    assert_eq!(layout.stack.group_heights, vec![70.5, 70.5, 40.5]);
    assert_eq!(layout.stack.height, 181.5);

    assert_eq!(top_of(&layout, "3"), Some(10.5));
    assert_eq!(top_of(&layout, "6"), Some(40.5));
    assert_eq!(top_of(&layout, "1"), Some(81.0));
    assert_eq!(top_of(&layout, "2"), Some(111.0));
    assert_eq!(top_of(&layout, "4"), Some(81.0));
    assert_eq!(top_of(&layout, "5"), Some(151.5));

    // Unknown group, overlay and out-of-range items.
    assert_eq!(top_of(&layout, "7"), None);
    assert_eq!(top_of(&layout, "9"), None);
    assert!(layout.item("8").is_none());
}

#[test]
fn nostack_centers_every_item() {
    let scene = load_scene("nostack/basic.json");
    let layout = layout_scene(&scene, &config(StackMode::NoStack));
    assert_eq!(top_of(&layout, "x"), Some(5.25));
    assert_eq!(top_of(&layout, "y"), Some(5.25));
    assert_eq!(top_of(&layout, "z"), Some(35.25));
    assert_eq!(layout.stack.height, 60.0);
}

#[test]
fn drag_preview_pushes_neighbours() {
    let scene = load_scene("interaction/drag.json");
    let layout = layout_scene(&scene, &config(StackMode::Stack));
    let dragged = &layout.item("left").unwrap().dimensions;
    assert_eq!(dragged.left, 1450.0);
    assert_eq!(dragged.collision_left, 1000.0);
    assert_eq!(dragged.collision_width, 4500.0);
    assert_eq!(top_of(&layout, "left"), Some(10.5));
    assert_eq!(top_of(&layout, "right"), Some(40.5));

    let mut idle = scene.clone();
    idle.interaction = None;
    let layout = layout_scene(&idle, &config(StackMode::Stack));
    assert_eq!(top_of(&layout, "right"), Some(10.5));
}

#[test]
fn resize_preview_moves_one_edge() {
    let scene = load_scene("interaction/resize.json");
    assert!(matches!(
        scene.interaction.as_ref().map(|active| active.interaction),
        Some(Interaction::Resizing { .. })
    ));
    let layout = layout_scene(&scene, &config(StackMode::Stack));
    let resized = &layout.item("left").unwrap().dimensions;
    assert_eq!(resized.left, 1100.0);
    assert_eq!(resized.width, 450.0);
    assert_eq!(resized.collision_left, 1000.0);
    assert_eq!(resized.collision_width, 4500.0);
    assert_eq!(top_of(&layout, "right"), Some(40.5));
}

#[test]
fn configured_keys_read_nested_fields() {
    let config = load_config(Some(fixture_path("nested_keys.config.json5").as_path()))
        .expect("config load failed")
        .layout;
    assert_eq!(config.stack_mode, StackMode::Stack);

    let scene = load_scene("nested_keys.json");
    let layout = layout_scene(&scene, &config);
    assert_eq!(top_of(&layout, "r"), Some(20.0));
    assert_eq!(top_of(&layout, "p"), Some(80.0));
    assert_eq!(top_of(&layout, "q"), Some(120.0));
    assert_eq!(layout.stack.group_heights, vec![60.0, 100.0]);
    assert_eq!(layout.stack.height, 160.0);
}

#[test]
fn incremental_restack_is_stable() {
    let scene = load_scene("stack/groups.json");
    let mut layout = layout_scene(&scene, &config(StackMode::Stack));
    let before: Vec<_> = layout.items.iter().map(|item| item.dimensions.top).collect();

    layout.restack(StackMode::Stack, 30.0, false);
    let after: Vec<_> = layout.items.iter().map(|item| item.dimensions.top).collect();
    assert_eq!(before, after);

    for item in &mut layout.items {
        if item.dimensions.top.is_some() {
            item.dimensions.top = Some(1_000.0);
        }
    }
    layout.restack(StackMode::Stack, 30.0, true);
    let forced: Vec<_> = layout.items.iter().map(|item| item.dimensions.top).collect();
    assert_eq!(before, forced);
}
