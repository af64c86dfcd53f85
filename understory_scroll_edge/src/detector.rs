// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge detection over a debounced stream of content frames.

use kurbo::Rect;

use crate::debounce::{DEFAULT_DEBOUNCE_MS, Debouncer};

/// The scroll axis a detector watches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    /// Watch the vertical offset and content height.
    #[default]
    Vertical,
    /// Watch the horizontal offset and content width.
    Horizontal,
}

impl ScrollAxis {
    /// Distance the content has been scrolled past the viewport origin.
    ///
    /// The content frame is expressed in viewport coordinates, so scrolling
    /// forward moves its leading edge into negative coordinates.
    #[must_use]
    pub fn scroll_offset(self, content: &Rect) -> f64 {
        match self {
            Self::Vertical => -content.y0,
            Self::Horizontal => -content.x0,
        }
    }

    /// Extent of the content frame along this axis.
    #[must_use]
    pub fn content_extent(self, content: &Rect) -> f64 {
        match self {
            Self::Vertical => content.height(),
            Self::Horizontal => content.width(),
        }
    }
}

/// Configuration for a [`ScrollEdgeDetector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeConfig {
    /// Axis to watch. Fixed for the lifetime of a detector.
    pub axis: ScrollAxis,
    /// Quiescence window in milliseconds before a frame is evaluated.
    pub debounce_ms: u64,
    /// Extra distance before the trailing edge at which the edge counts as reached.
    ///
    /// Positive values fire earlier, negative values require overscrolling.
    pub margin: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            axis: ScrollAxis::Vertical,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            margin: 0.0,
        }
    }
}

impl EdgeConfig {
    /// Default configuration watching `axis`.
    #[must_use]
    pub fn for_axis(axis: ScrollAxis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }
}

/// Whether the detector currently considers the trailing edge reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeState {
    /// Not at the edge; the next approach will notify.
    #[default]
    Idle,
    /// Already notified for the current approach.
    AtEdge,
}

/// Transition reported by [`ScrollEdgeDetector::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEvent {
    /// The trailing edge was reached. Hosts load the next page here.
    Reached,
    /// The content scrolled back away from the edge; the detector is rearmed.
    Left,
}

/// Debounced, one-shot-per-approach trailing edge detector.
///
/// Feed every content frame to [`on_geometry`](Self::on_geometry) and call
/// [`poll`](Self::poll) once [`deadline`](Self::deadline) has passed. The first
/// frame is treated as the initial layout measurement and never evaluated.
#[derive(Clone, Debug)]
pub struct ScrollEdgeDetector {
    config: EdgeConfig,
    viewport_extent: f64,
    debouncer: Debouncer<Rect>,
    last_rect: Option<Rect>,
    state: EdgeState,
}

impl ScrollEdgeDetector {
    /// Creates a detector. The viewport extent starts at zero, so nothing fires
    /// until [`set_viewport_extent`](Self::set_viewport_extent) is called.
    #[must_use]
    pub fn new(config: EdgeConfig) -> Self {
        Self {
            config,
            viewport_extent: 0.0,
            debouncer: Debouncer::with_skip_first(config.debounce_ms),
            last_rect: None,
            state: EdgeState::Idle,
        }
    }

    /// Creates a detector with an already measured viewport extent.
    #[must_use]
    pub fn with_viewport(config: EdgeConfig, viewport_extent: f64) -> Self {
        let mut detector = Self::new(config);
        detector.set_viewport_extent(viewport_extent);
        detector
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Returns the watched axis.
    #[must_use]
    pub const fn axis(&self) -> ScrollAxis {
        self.config.axis
    }

    /// Returns the viewport extent along the watched axis.
    #[must_use]
    pub const fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Sets the viewport extent along the watched axis.
    ///
    /// Negative and non-finite extents are stored as zero, which disables firing.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.viewport_extent = if extent.is_finite() && extent > 0.0 {
            extent
        } else {
            0.0
        };
    }

    /// Sets the edge margin.
    pub fn set_margin(&mut self, margin: f64) {
        self.config.margin = margin;
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> EdgeState {
        self.state
    }

    /// Returns `true` if the edge has been reached and not yet left.
    #[must_use]
    pub fn is_at_edge(&self) -> bool {
        self.state == EdgeState::AtEdge
    }

    /// Returns the most recent content frame received, settled or not.
    #[must_use]
    pub const fn last_rect(&self) -> Option<Rect> {
        self.last_rect
    }

    /// Returns when [`poll`](Self::poll) should next be called, if anything is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.debouncer.deadline()
    }

    /// Returns `true` after [`detach`](Self::detach).
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.debouncer.is_closed()
    }

    /// Records a new content frame observed at `now` (milliseconds).
    pub fn on_geometry(&mut self, content: Rect, now: u64) {
        if self.is_detached() {
            log::trace!("ignoring geometry after detach: {content:?}");
            return;
        }
        self.last_rect = Some(content);
        if !self.debouncer.push(content, now) {
            log::trace!("discarding initial geometry: {content:?}");
        }
    }

    /// Evaluates the settled frame, if its quiescence window has elapsed.
    ///
    /// Unusable geometry (non-finite values or an unmeasured viewport) leaves
    /// the state untouched.
    pub fn poll(&mut self, now: u64) -> Option<EdgeEvent> {
        let rect = self.debouncer.poll(now)?;
        let Some(at_edge) = self.classify(&rect) else {
            log::trace!("ignoring unusable geometry: {rect:?}");
            return None;
        };
        match (self.state, at_edge) {
            (EdgeState::Idle, true) => {
                log::debug!("scroll edge reached on {:?} axis", self.config.axis);
                self.state = EdgeState::AtEdge;
                Some(EdgeEvent::Reached)
            }
            (EdgeState::AtEdge, false) => {
                log::debug!("scroll edge left on {:?} axis", self.config.axis);
                self.state = EdgeState::Idle;
                Some(EdgeEvent::Left)
            }
            _ => None,
        }
    }

    /// Returns `true` if `content` places the trailing edge within reach.
    ///
    /// This requires a measured viewport, content at least as large as the
    /// viewport, and a strictly positive scroll offset past
    /// `content_extent - viewport_extent - margin`.
    #[must_use]
    pub fn evaluate(&self, content: &Rect) -> bool {
        self.classify(content).unwrap_or(false)
    }

    /// `None` when the geometry says nothing about the edge.
    fn classify(&self, content: &Rect) -> Option<bool> {
        let axis = self.config.axis;
        let offset = axis.scroll_offset(content);
        let content_extent = axis.content_extent(content);
        if !(offset.is_finite() && content_extent.is_finite() && self.config.margin.is_finite()) {
            return None;
        }
        if self.viewport_extent <= 0.0 {
            return None;
        }
        let remaining = content_extent - self.viewport_extent;
        if remaining < 0.0 {
            return Some(false);
        }
        Some(offset > 0.0 && offset + self.config.margin > remaining)
    }

    /// Returns to [`EdgeState::Idle`] and drops any pending frame.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.state = EdgeState::Idle;
    }

    /// Tears the detector down: the pending frame is dropped and every later
    /// frame or poll is ignored.
    pub fn detach(&mut self) {
        self.debouncer.close();
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeConfig, EdgeEvent, EdgeState, ScrollAxis, ScrollEdgeDetector};
    use kurbo::Rect;

    /// Content 1000 tall scrolled by `offset` inside a 400 tall viewport.
    fn frame(offset: f64) -> Rect {
        Rect::new(0.0, -offset, 300.0, 1000.0 - offset)
    }

    fn detector() -> ScrollEdgeDetector {
        ScrollEdgeDetector::with_viewport(EdgeConfig::default(), 400.0)
    }

    #[test]
    fn first_frame_is_never_evaluated() {
        let mut d = detector();
        d.on_geometry(frame(900.0), 0);
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(1_000), None);
        assert_eq!(d.state(), EdgeState::Idle);
        assert_eq!(d.last_rect(), Some(frame(900.0)));
    }

    #[test]
    fn fires_once_per_approach() {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);

        // A burst of frames walking past the threshold (600).
        let mut now = 10;
        for offset in (0..=700).step_by(20) {
            d.on_geometry(frame(f64::from(offset)), now);
            assert_eq!(d.poll(now), None);
            now += 16;
        }
        assert_eq!(d.poll(now + 100), Some(EdgeEvent::Reached));
        assert!(d.is_at_edge());

        // Staying at the edge does not fire again.
        for i in 0..10 {
            let t = now + 200 + i * 200;
            d.on_geometry(frame(650.0), t);
            assert_eq!(d.poll(t + 100), None);
        }
    }

    #[test]
    fn rearms_after_leaving_the_edge() {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);

        d.on_geometry(frame(650.0), 100);
        assert_eq!(d.poll(200), Some(EdgeEvent::Reached));

        d.on_geometry(frame(300.0), 300);
        assert_eq!(d.poll(400), Some(EdgeEvent::Left));
        assert_eq!(d.state(), EdgeState::Idle);

        d.on_geometry(frame(700.0), 500);
        assert_eq!(d.poll(600), Some(EdgeEvent::Reached));
    }

    #[test]
    fn non_finite_frame_does_not_rearm() {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);
        d.on_geometry(frame(700.0), 10);
        assert_eq!(d.poll(110), Some(EdgeEvent::Reached));

        d.on_geometry(Rect::new(0.0, f64::NAN, 300.0, f64::NAN), 200);
        assert_eq!(d.poll(300), None);
        assert_eq!(d.state(), EdgeState::AtEdge);

        d.on_geometry(frame(700.0), 400);
        assert_eq!(d.poll(500), None);
    }

    #[test]
    fn unmeasured_viewport_does_not_rearm() {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);
        d.on_geometry(frame(700.0), 10);
        assert_eq!(d.poll(110), Some(EdgeEvent::Reached));

        d.set_viewport_extent(0.0);
        d.on_geometry(frame(100.0), 200);
        assert_eq!(d.poll(300), None);
        assert!(d.is_at_edge());

        d.set_viewport_extent(400.0);
        d.on_geometry(frame(700.0), 400);
        assert_eq!(d.poll(500), None);

        // A real scroll back still rearms.
        d.on_geometry(frame(100.0), 600);
        assert_eq!(d.poll(700), Some(EdgeEvent::Left));
    }

    #[test]
    fn burst_that_returns_below_threshold_is_silent() {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);
        // Crosses 600 mid-burst, then settles back at 500 within the window.
        for (i, offset) in [300.0, 550.0, 650.0, 700.0, 620.0, 500.0].into_iter().enumerate() {
            let now = 10 + 16 * i as u64;
            d.on_geometry(frame(offset), now);
            assert_eq!(d.poll(now), None);
        }
        let wake = d.deadline().unwrap();
        assert_eq!(d.poll(wake), None);
        assert_eq!(d.state(), EdgeState::Idle);
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn threshold_is_strict() {
        let d = detector();
        assert!(!d.evaluate(&frame(600.0)));
        assert!(d.evaluate(&frame(600.5)));
    }

    #[test]
    fn margin_moves_the_threshold() {
        let mut d = detector();
        d.set_margin(96.0);
        assert!(d.evaluate(&frame(510.0)));
        d.set_margin(-32.0);
        assert!(!d.evaluate(&frame(620.0)));
        assert!(d.evaluate(&frame(640.0)));
    }

    #[test]
    fn unmeasured_viewport_never_fires() {
        let mut d = ScrollEdgeDetector::new(EdgeConfig::default());
        assert!(!d.evaluate(&frame(900.0)));
        d.set_viewport_extent(-5.0);
        assert_eq!(d.viewport_extent(), 0.0);
        assert!(!d.evaluate(&frame(900.0)));
        d.set_viewport_extent(f64::NAN);
        assert!(!d.evaluate(&frame(900.0)));
    }

    #[test]
    fn short_content_never_fires() {
        let d = ScrollEdgeDetector::with_viewport(EdgeConfig::default(), 2000.0);
        assert!(!d.evaluate(&frame(50.0)));
    }

    #[test]
    fn zero_offset_never_fires() {
        let mut d = detector();
        d.set_margin(1000.0);
        assert!(!d.evaluate(&frame(0.0)));
        assert!(!d.evaluate(&frame(-20.0)));
    }

    #[test]
    fn horizontal_axis_uses_x() {
        let d =
            ScrollEdgeDetector::with_viewport(EdgeConfig::for_axis(ScrollAxis::Horizontal), 400.0);
        // Scrolled vertically only: not at the horizontal edge.
        assert!(!d.evaluate(&frame(900.0)));
        let scrolled = Rect::new(-700.0, 0.0, 300.0, 200.0);
        assert!(d.evaluate(&scrolled));
    }

    #[test]
    fn detach_drops_pending_and_later_frames() {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);
        d.on_geometry(frame(700.0), 10);
        assert!(d.deadline().is_some());
        d.detach();
        assert!(d.is_detached());
        assert_eq!(d.poll(1_000), None);
        d.on_geometry(frame(800.0), 2_000);
        assert_eq!(d.poll(3_000), None);
        assert_eq!(d.state(), EdgeState::Idle);
    }

    #[test]
    fn reset_rearms_and_cancels() {
        let mut d = detector();
        d.on_geometry(frame(0.0), 0);
        d.on_geometry(frame(700.0), 10);
        assert_eq!(d.poll(110), Some(EdgeEvent::Reached));
        d.on_geometry(frame(710.0), 200);
        d.reset();
        assert_eq!(d.deadline(), None);
        assert_eq!(d.state(), EdgeState::Idle);
        d.on_geometry(frame(720.0), 300);
        assert_eq!(d.poll(400), Some(EdgeEvent::Reached));
    }
}
