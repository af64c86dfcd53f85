// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between a grid and the UI framework drawing it.

use alloc::vec::Vec;

use understory_scroll_edge::ScrollAxis;

use crate::{Placement, Priority};

/// A placement handed to the cell render closure, tagged with the grid's priority.
#[derive(Debug, PartialEq, Eq)]
pub enum Cell<'a, T> {
    /// A cell of a row-priority grid.
    InRow(&'a Placement<T>),
    /// A cell of a column-priority grid.
    InColumn(&'a Placement<T>),
}

impl<'a, T> Cell<'a, T> {
    pub(crate) const fn new(priority: Priority, placement: &'a Placement<T>) -> Self {
        match priority {
            Priority::Row => Self::InRow(placement),
            Priority::Column => Self::InColumn(placement),
        }
    }

    /// Returns the placement regardless of priority.
    #[must_use]
    pub const fn placement(&self) -> &'a Placement<T> {
        match *self {
            Self::InRow(p) | Self::InColumn(p) => p,
        }
    }

    /// Returns the element.
    #[must_use]
    pub const fn data(&self) -> &'a T {
        &self.placement().data
    }
}

// Manual impls: deriving would require `T: Clone`.
impl<T> Clone for Cell<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cell<'_, T> {}

/// Cross-axis alignment of cells inside a band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrossAlignment {
    /// Top of a row, or leading edge of a column.
    Leading,
    /// Centered.
    #[default]
    Center,
    /// Bottom of a row, or trailing edge of a column.
    Trailing,
}

/// Main axis of a stack container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackAxis {
    /// Children laid out left to right.
    Horizontal,
    /// Children laid out top to bottom.
    Vertical,
}

/// Axes a scroll container may scroll along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAxes {
    /// Horizontal only.
    Horizontal,
    /// Vertical only.
    Vertical,
    /// Both axes.
    Both,
}

/// How a grid wants to be wrapped in a scroll container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollConfig {
    /// Axes the container scrolls along.
    pub axes: ScrollAxes,
    /// The axis the grid grows along as data is appended.
    pub outer_axis: ScrollAxis,
    /// Whether scroll indicators are shown.
    pub shows_indicators: bool,
    /// Whether gesture scrolling along `outer_axis` is disabled, so an
    /// enclosing scroll container receives those gestures instead.
    pub outer_scroll_disabled: bool,
}

/// Scroll wrapping for a grid growing along `outer_axis`.
///
/// A band can be wider than the viewport, so the cross axis scrolls as well.
/// When `disable_outer_scroll` is set, only the cross axis remains scrollable.
#[must_use]
pub fn make_grid_scrollable(
    outer_axis: ScrollAxis,
    disable_outer_scroll: bool,
    show_indicator: bool,
) -> ScrollConfig {
    let axes = if disable_outer_scroll {
        match outer_axis {
            ScrollAxis::Vertical => ScrollAxes::Horizontal,
            ScrollAxis::Horizontal => ScrollAxes::Vertical,
        }
    } else {
        ScrollAxes::Both
    };
    ScrollConfig {
        axes,
        outer_axis,
        shows_indicators: show_indicator,
        outer_scroll_disabled: disable_outer_scroll,
    }
}

/// View construction supplied by the host framework.
///
/// Cells themselves are produced by the grid's render closure; the renderer
/// only nests them into containers.
pub trait GridRenderer {
    /// The framework's view type.
    type View;

    /// Lays `children` out along `axis`, `spacing` apart, aligned on the cross axis.
    fn stack(
        &mut self,
        axis: StackAxis,
        children: Vec<Self::View>,
        spacing: f64,
        alignment: CrossAlignment,
    ) -> Self::View;

    /// Wraps `content` in a scroll container.
    fn scroll(&mut self, content: Self::View, config: &ScrollConfig) -> Self::View;
}
