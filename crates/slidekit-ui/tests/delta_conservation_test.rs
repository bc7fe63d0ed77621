//! Every delta is split between the layout, the list and nobody, and the
//! layout never leaves its bounds along the way, imperative expands
//! included.

mod common;

use common::Scene;
use slidekit_foundation::{ScrollableContent, StaticTarget};
use slidekit_ui::prelude::*;

const DELTAS: &[i32] = &[
    120, 300, -50, -400, -200, 80, 900, -1_500, 30, -7, 640, -90, -300, 2, -1,
];

fn sweep(scene: &mut Scene, list: &mut ScrollableContent) {
    for (step, &dy) in DELTAS.iter().enumerate() {
        if step % 4 == 0 {
            list.start_scroll(&mut scene.layout, ScrollKind::Touch);
        }
        let result = list.scroll_by(&mut scene.layout, dy, ScrollKind::Touch);
        assert_eq!(result.total_consumed() + result.unconsumed, dy, "step {step}");
        for part in [result.parent_pre, result.content, result.parent_post] {
            assert!(part == 0 || part.signum() == dy.signum(), "step {step}: {result:?}");
        }
        assert!(result.total_consumed().abs() <= dy.abs(), "step {step}");
        scene.assert_bounds();

        if step % 4 == 3 {
            list.stop_scroll(&mut scene.layout, ScrollKind::Touch);
            scene.run_frames();
            scene.assert_bounds();

            match step / 4 {
                0 => scene.layout.expand_header(Some(1_000)),
                1 => scene.layout.expand_slider(false),
                _ => scene.layout.expand_header(None),
            }
            scene.assert_bounds();
        }
    }
    list.stop_scroll(&mut scene.layout, ScrollKind::Touch);
    scene.layout.finish_refresh();
    scene.run_frames();
    scene.assert_bounds();
    assert_eq!(scene.layout.refresh_height(), 0);
}

#[test]
fn slide_mode_conserves_deltas() {
    let mut scene = Scene::new(SlideConfig::default());
    let mut list = ScrollableContent::new(2, SlideChildType::Slider, 1_200);
    sweep(&mut scene, &mut list);
}

#[test]
fn scroll_mode_conserves_deltas() {
    let mut scene = Scene::new(SlideConfig::default());
    scene
        .layout
        .set_header_content(Box::new(StaticTarget::new(3, SlideChildType::Header)));
    let mut list = ScrollableContent::new(2, SlideChildType::Slider, 1_200);
    sweep(&mut scene, &mut list);
}

#[test]
fn overlapping_header_without_slider_refresh_conserves_deltas() {
    let config = SlideConfig::default()
        .with_overlap_distance(60)
        .with_disable_slider_refresh(true);
    let mut scene = Scene::new(config);
    let mut list = ScrollableContent::new(2, SlideChildType::Slider, 1_200);
    sweep(&mut scene, &mut list);
    assert_eq!(scene.layout.refresh_phase(), slidekit_ui::RefreshPhase::Idle);
}
