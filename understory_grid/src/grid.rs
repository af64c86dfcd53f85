// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid component: partitioned state, cell rendering, and pagination.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use understory_scroll_edge::{
    DEFAULT_DEBOUNCE_MS, EdgeConfig, EdgeEvent, ScrollAxis, ScrollEdgeDetector,
};

use crate::{
    Cell, CrossAlignment, GridError, GridLayout, GridRenderer, GridState, Placement, Priority,
    ScrollConfig, StackAxis, make_grid_scrollable,
};

type EdgeCallback = Box<dyn FnMut()>;

/// Configures a [`Grid`].
///
/// Which of [`Grid::rows`] or [`Grid::columns`] starts the builder selects the
/// priority; the capacity is validated in [`build`](Self::build).
pub struct GridBuilder<T> {
    data: Vec<T>,
    priority: Priority,
    capacity: usize,
    alignment: CrossAlignment,
    row_spacing: f64,
    column_spacing: f64,
    edge_margin: f64,
    debounce_ms: u64,
    viewport_extent: f64,
    on_reach_edge: Option<EdgeCallback>,
}

impl<T> fmt::Debug for GridBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridBuilder")
            .field("len", &self.data.len())
            .field("priority", &self.priority)
            .field("capacity", &self.capacity)
            .field("alignment", &self.alignment)
            .field("row_spacing", &self.row_spacing)
            .field("column_spacing", &self.column_spacing)
            .field("edge_margin", &self.edge_margin)
            .field("debounce_ms", &self.debounce_ms)
            .field("viewport_extent", &self.viewport_extent)
            .finish_non_exhaustive()
    }
}

impl<T> GridBuilder<T> {
    fn new(data: impl IntoIterator<Item = T>, priority: Priority, capacity: usize) -> Self {
        Self {
            data: data.into_iter().collect(),
            priority,
            capacity,
            alignment: CrossAlignment::default(),
            row_spacing: 0.0,
            column_spacing: 0.0,
            edge_margin: 0.0,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            viewport_extent: 0.0,
            on_reach_edge: None,
        }
    }

    /// Cross-axis alignment of cells within each band.
    #[must_use]
    pub fn alignment(mut self, alignment: CrossAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Gap between adjacent rows.
    #[must_use]
    pub fn row_spacing(mut self, spacing: f64) -> Self {
        self.row_spacing = spacing;
        self
    }

    /// Gap between adjacent columns.
    #[must_use]
    pub fn column_spacing(mut self, spacing: f64) -> Self {
        self.column_spacing = spacing;
        self
    }

    /// Distance before the trailing edge at which pagination triggers.
    #[must_use]
    pub fn edge_margin(mut self, margin: f64) -> Self {
        self.edge_margin = margin;
        self
    }

    /// Quiescence window for scroll geometry, in milliseconds.
    #[must_use]
    pub fn debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Viewport extent along the growth axis, if already known.
    #[must_use]
    pub fn viewport_extent(mut self, extent: f64) -> Self {
        self.viewport_extent = extent;
        self
    }

    /// Called once each time scrolling reaches the trailing edge.
    #[must_use]
    pub fn on_reach_edge(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_reach_edge = Some(Box::new(callback));
        self
    }

    /// Validates the configuration and partitions the data.
    ///
    /// `render_cell` turns each [`Cell`] into a view when the grid is rendered.
    pub fn build<F>(self, render_cell: F) -> Result<Grid<T, F>, GridError> {
        let layout = GridLayout::new(self.priority, self.capacity)?;
        let axis = growth_axis(self.priority);
        let detector = ScrollEdgeDetector::with_viewport(
            EdgeConfig {
                axis,
                debounce_ms: self.debounce_ms,
                margin: self.edge_margin,
            },
            self.viewport_extent,
        );
        Ok(Grid {
            state: GridState::new(self.data, layout),
            version: 0,
            alignment: self.alignment,
            row_spacing: self.row_spacing,
            column_spacing: self.column_spacing,
            render_cell,
            on_reach_edge: self.on_reach_edge.unwrap_or_else(|| Box::new(|| {})),
            detector,
        })
    }
}

const fn growth_axis(priority: Priority) -> ScrollAxis {
    match priority {
        Priority::Row => ScrollAxis::Vertical,
        Priority::Column => ScrollAxis::Horizontal,
    }
}

/// A grid of cells over a flat data sequence.
///
/// The grid owns its [`GridState`], rebuilt wholesale by
/// [`update_data`](Self::update_data), and a [`ScrollEdgeDetector`] on the axis
/// the grid grows along: vertical for row priority, horizontal for column
/// priority. Hosts forward content frames to [`on_geometry`](Self::on_geometry)
/// and call [`poll`](Self::poll) at [`next_deadline`](Self::next_deadline); the
/// pagination callback runs from within `poll`.
pub struct Grid<T, F> {
    state: GridState<T>,
    version: u64,
    alignment: CrossAlignment,
    row_spacing: f64,
    column_spacing: f64,
    render_cell: F,
    on_reach_edge: EdgeCallback,
    detector: ScrollEdgeDetector,
}

impl<T: fmt::Debug, F> fmt::Debug for Grid<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("state", &self.state)
            .field("version", &self.version)
            .field("alignment", &self.alignment)
            .field("row_spacing", &self.row_spacing)
            .field("column_spacing", &self.column_spacing)
            .field("detector", &self.detector)
            .finish_non_exhaustive()
    }
}

impl<T> Grid<T, ()> {
    /// Starts a row-priority grid with at most `max_row_elements` cells per row.
    pub fn rows(data: impl IntoIterator<Item = T>, max_row_elements: usize) -> GridBuilder<T> {
        GridBuilder::new(data, Priority::Row, max_row_elements)
    }

    /// Starts a column-priority grid with at most `max_column_elements` cells per column.
    pub fn columns(
        data: impl IntoIterator<Item = T>,
        max_column_elements: usize,
    ) -> GridBuilder<T> {
        GridBuilder::new(data, Priority::Column, max_column_elements)
    }
}

impl<T, F> Grid<T, F> {
    /// Replaces the data and re-partitions it from scratch.
    pub fn update_data(&mut self, data: impl IntoIterator<Item = T>) {
        self.state.update(data);
        self.version = self.version.wrapping_add(1);
        log::debug!(
            "grid data updated to {} elements (version {})",
            self.state.len(),
            self.version
        );
    }

    /// Incremented by every [`update_data`](Self::update_data).
    ///
    /// Hosts compare it with the version they last rendered to decide whether
    /// to rebuild their view tree.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the partitioned state.
    #[must_use]
    pub const fn state(&self) -> &GridState<T> {
        &self.state
    }

    /// Iterates over the current bands.
    pub fn bands(&self) -> impl ExactSizeIterator<Item = &[Placement<T>]> + '_ {
        self.state.bands()
    }

    /// Number of bands.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.state.band_count()
    }

    /// Returns `true` if rows fill before wrapping.
    #[must_use]
    pub fn is_row_priority(&self) -> bool {
        self.state.priority() == Priority::Row
    }

    /// Returns `true` if columns fill before wrapping.
    #[must_use]
    pub fn is_column_priority(&self) -> bool {
        self.state.priority() == Priority::Column
    }

    /// Cross-axis alignment of cells within each band.
    #[must_use]
    pub const fn alignment(&self) -> CrossAlignment {
        self.alignment
    }

    /// Gap between adjacent rows.
    #[must_use]
    pub const fn row_spacing(&self) -> f64 {
        self.row_spacing
    }

    /// Gap between adjacent columns.
    #[must_use]
    pub const fn column_spacing(&self) -> f64 {
        self.column_spacing
    }

    /// Returns the edge detector.
    #[must_use]
    pub const fn detector(&self) -> &ScrollEdgeDetector {
        &self.detector
    }

    /// Sets the viewport extent along the growth axis.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.detector.set_viewport_extent(extent);
    }

    /// Forwards the content frame, in viewport coordinates, observed at `now`.
    pub fn on_geometry(&mut self, content: Rect, now: u64) {
        self.detector.on_geometry(content, now);
    }

    /// When [`poll`](Self::poll) should next be called.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.detector.deadline()
    }

    /// Evaluates settled geometry, running the pagination callback if the
    /// trailing edge was just reached.
    pub fn poll(&mut self, now: u64) -> Option<EdgeEvent> {
        let event = self.detector.poll(now);
        if event == Some(EdgeEvent::Reached) {
            (self.on_reach_edge)();
        }
        event
    }

    /// Stops edge detection for good. Call when the grid's view is torn down.
    pub fn detach(&mut self) {
        self.detector.detach();
    }

    /// Scroll wrapping for this grid.
    #[must_use]
    pub fn scroll_config(&self, disable_outer_scroll: bool, show_indicator: bool) -> ScrollConfig {
        make_grid_scrollable(
            growth_axis(self.state.priority()),
            disable_outer_scroll,
            show_indicator,
        )
    }

    /// Renders every cell and nests the bands.
    ///
    /// Row-priority grids become a vertical stack of horizontal rows; column
    /// priority grids a horizontal stack of vertical columns.
    pub fn render<R>(&mut self, renderer: &mut R) -> R::View
    where
        R: GridRenderer,
        F: FnMut(Cell<'_, T>) -> R::View,
    {
        let priority = self.state.priority();
        let (band_axis, band_spacing, outer_axis, outer_spacing) = match priority {
            Priority::Row => (
                StackAxis::Horizontal,
                self.column_spacing,
                StackAxis::Vertical,
                self.row_spacing,
            ),
            Priority::Column => (
                StackAxis::Vertical,
                self.row_spacing,
                StackAxis::Horizontal,
                self.column_spacing,
            ),
        };
        let render_cell = &mut self.render_cell;
        let bands = self
            .state
            .bands()
            .map(|band| {
                let cells = band
                    .iter()
                    .map(|p| render_cell(Cell::new(priority, p)))
                    .collect();
                renderer.stack(band_axis, cells, band_spacing, self.alignment)
            })
            .collect();
        renderer.stack(outer_axis, bands, outer_spacing, self.alignment)
    }

    /// Renders the grid and wraps it in a scroll container.
    pub fn render_scrollable<R>(
        &mut self,
        renderer: &mut R,
        disable_outer_scroll: bool,
        show_indicator: bool,
    ) -> R::View
    where
        R: GridRenderer,
        F: FnMut(Cell<'_, T>) -> R::View,
    {
        let config = self.scroll_config(disable_outer_scroll, show_indicator);
        let content = self.render(renderer);
        renderer.scroll(content, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::{
        Cell, CrossAlignment, GridError, GridRenderer, Priority, ScrollAxes, ScrollConfig,
        StackAxis,
    };
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::Cell as Counter;
    use kurbo::Rect;
    use understory_scroll_edge::EdgeEvent;

    /// Renders views as compact strings: `H[..]`, `V[..]`, `S(..)`.
    struct TextRenderer;

    impl GridRenderer for TextRenderer {
        type View = String;

        fn stack(
            &mut self,
            axis: StackAxis,
            children: Vec<String>,
            _spacing: f64,
            _alignment: CrossAlignment,
        ) -> String {
            let tag = match axis {
                StackAxis::Horizontal => 'H',
                StackAxis::Vertical => 'V',
            };
            format!("{tag}[{}]", children.join(","))
        }

        fn scroll(&mut self, content: String, config: &ScrollConfig) -> String {
            format!("S{:?}({content})", config.axes)
        }
    }

    fn label(cell: Cell<'_, u32>) -> String {
        match cell {
            Cell::InRow(p) => format!("r{}", p.data),
            Cell::InColumn(p) => format!("c{}", p.data),
        }
    }

    #[test]
    fn row_grid_renders_rows_of_cells() {
        let mut grid = Grid::rows(1..=5_u32, 2).build(label).unwrap();
        assert!(grid.is_row_priority());
        assert_eq!(grid.band_count(), 3);
        assert_eq!(grid.render(&mut TextRenderer), "V[H[r1,r2],H[r3,r4],H[r5]]");
    }

    #[test]
    fn column_grid_renders_columns_of_cells() {
        let mut grid = Grid::columns(1..=5_u32, 3).build(label).unwrap();
        assert!(grid.is_column_priority());
        assert_eq!(grid.render(&mut TextRenderer), "H[V[c1,c2,c3],V[c4,c5]]");
        assert_eq!(
            grid.render_scrollable(&mut TextRenderer, true, false),
            "SVertical(H[V[c1,c2,c3],V[c4,c5]])"
        );
        assert_eq!(grid.scroll_config(false, true).axes, ScrollAxes::Both);
    }

    #[test]
    fn zero_capacity_fails_to_build() {
        let err = Grid::rows([1_u32, 2], 0).build(label).unwrap_err();
        assert_eq!(
            err,
            GridError::ZeroCapacity {
                priority: Priority::Row
            }
        );
    }

    #[test]
    fn update_data_bumps_version_and_repartitions() {
        let mut grid = Grid::rows(1..=4_u32, 2)
            .row_spacing(8.0)
            .column_spacing(4.0)
            .alignment(CrossAlignment::Leading)
            .build(label)
            .unwrap();
        assert_eq!(grid.version(), 0);
        grid.update_data([7]);
        assert_eq!(grid.version(), 1);
        assert_eq!(grid.band_count(), 1);
        assert_eq!(grid.render(&mut TextRenderer), "V[H[r7]]");
        grid.update_data(core::iter::empty());
        assert_eq!(grid.band_count(), 0);
        assert_eq!(grid.render(&mut TextRenderer), "V[]");
        assert_eq!(grid.row_spacing(), 8.0);
        assert_eq!(grid.column_spacing(), 4.0);
        assert_eq!(grid.alignment(), CrossAlignment::Leading);
    }

    #[test]
    fn pagination_callback_runs_once_per_approach() {
        let pages = Rc::new(Counter::new(0));
        let counter = Rc::clone(&pages);
        let mut grid = Grid::rows(0..40_u32, 4)
            .viewport_extent(400.0)
            .on_reach_edge(move || counter.set(counter.get() + 1))
            .build(label)
            .unwrap();

        // Initial measurement, then a scroll to the bottom of 1000px content.
        grid.on_geometry(Rect::new(0.0, 0.0, 320.0, 1000.0), 0);
        for (i, y) in [-200.0, -450.0, -620.0, -640.0].into_iter().enumerate() {
            grid.on_geometry(Rect::new(0.0, y, 320.0, 1000.0 + y), 16 * (i as u64 + 1));
        }
        let wake = grid.next_deadline().unwrap();
        assert_eq!(grid.poll(wake), Some(EdgeEvent::Reached));
        assert_eq!(pages.get(), 1);

        // Still at the edge.
        grid.on_geometry(Rect::new(0.0, -650.0, 320.0, 350.0), 500);
        assert_eq!(grid.poll(600), None);
        assert_eq!(pages.get(), 1);

        // Back up, then down again.
        grid.on_geometry(Rect::new(0.0, -100.0, 320.0, 900.0), 700);
        assert_eq!(grid.poll(800), Some(EdgeEvent::Left));
        grid.on_geometry(Rect::new(0.0, -700.0, 320.0, 300.0), 900);
        assert_eq!(grid.poll(1000), Some(EdgeEvent::Reached));
        assert_eq!(pages.get(), 2);
    }

    #[test]
    fn detached_grid_never_paginates() {
        let pages = Rc::new(Counter::new(0));
        let counter = Rc::clone(&pages);
        let mut grid = Grid::columns(0..40_u32, 4)
            .viewport_extent(400.0)
            .on_reach_edge(move || counter.set(counter.get() + 1))
            .build(label)
            .unwrap();
        assert_eq!(
            grid.detector().axis(),
            understory_scroll_edge::ScrollAxis::Horizontal
        );

        grid.on_geometry(Rect::new(0.0, 0.0, 1000.0, 320.0), 0);
        grid.on_geometry(Rect::new(-700.0, 0.0, 300.0, 320.0), 10);
        grid.detach();
        assert_eq!(grid.poll(10_000), None);
        assert_eq!(pages.get(), 0);
    }

    #[test]
    fn default_callback_is_a_no_op() {
        let mut grid = Grid::rows(0..8_u32, 2).build(label).unwrap();
        grid.set_viewport_extent(100.0);
        grid.on_geometry(Rect::new(0.0, 0.0, 50.0, 300.0), 0);
        grid.on_geometry(Rect::new(0.0, -250.0, 50.0, 50.0), 10);
        assert_eq!(grid.poll(200), Some(EdgeEvent::Reached));
    }
}
