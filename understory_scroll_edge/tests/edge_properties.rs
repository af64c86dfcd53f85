// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for scroll edge detection.

use kurbo::Rect;
use proptest::prelude::*;
use understory_scroll_edge::{EdgeConfig, EdgeEvent, ScrollEdgeDetector};

const CONTENT: f64 = 2000.0;
const VIEWPORT: f64 = 500.0;
const DEBOUNCE: u64 = 100;

fn frame(offset: f64) -> Rect {
    Rect::new(0.0, -offset, 320.0, CONTENT - offset)
}

fn detector() -> ScrollEdgeDetector {
    let config = EdgeConfig {
        debounce_ms: DEBOUNCE,
        ..EdgeConfig::default()
    };
    ScrollEdgeDetector::with_viewport(config, VIEWPORT)
}

/// Feeds `frames` as `(offset, gap_ms)` and polls whenever a deadline passes.
fn run(
    detector: &mut ScrollEdgeDetector,
    frames: &[(f64, u64)],
    mut now: u64,
) -> (Vec<EdgeEvent>, u64) {
    let mut events = Vec::new();
    for &(offset, gap) in frames {
        now += gap;
        if let Some(deadline) = detector.deadline().filter(|d| *d <= now) {
            events.extend(detector.poll(deadline));
        }
        detector.on_geometry(frame(offset), now);
    }
    now += DEBOUNCE;
    events.extend(detector.poll(now));
    (events, now)
}

proptest! {
    #[test]
    fn one_callback_per_approach(
        steps in prop::collection::vec((0.0_f64..40.0, 1_u64..DEBOUNCE, 0_usize..4), 1..100),
    ) {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);

        // Monotonic offsets ending past the threshold, with duplicate frames
        // arriving faster than the debounce window.
        let mut frames = Vec::new();
        let mut offset = 0.0;
        for (delta, gap, dups) in steps {
            offset += delta;
            for _ in 0..=dups {
                frames.push((offset, gap));
            }
        }
        frames.push((offset.max(CONTENT - VIEWPORT) + 1.0, 1));

        let (events, _) = run(&mut d, &frames, 0);
        prop_assert_eq!(events, vec![EdgeEvent::Reached]);
    }

    #[test]
    fn rearms_after_scrolling_back(back in 0.0_f64..1400.0, beyond in 1.0_f64..400.0) {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);
        let threshold = CONTENT - VIEWPORT;

        let (first, now) = run(&mut d, &[(threshold + beyond, 10)], 0);
        prop_assert_eq!(first, vec![EdgeEvent::Reached]);

        let (second, _) = run(
            &mut d,
            &[(back, DEBOUNCE + 1), (threshold + beyond, DEBOUNCE + 1)],
            now,
        );
        prop_assert_eq!(second, vec![EdgeEvent::Left, EdgeEvent::Reached]);
    }
}
