// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partitioning a flat sequence into row- or column-priority bands.
//!
//! Elements are assigned 1-based `(row, column)` coordinates in input order.
//! With [`Priority::Row`], columns cycle `1..=capacity` and the row advances
//! every `capacity` elements; [`Priority::Column`] swaps the roles. Placements
//! sharing the priority-axis coordinate form a *band*.

use alloc::vec::Vec;
use core::num::NonZeroUsize;
use core::ops::Range;

use crate::GridError;

/// Which axis fills first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Fill a row left to right, then wrap to a new row.
    Row,
    /// Fill a column top to bottom, then wrap to a new column.
    Column,
}

/// A validated priority and band capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridLayout {
    priority: Priority,
    capacity: NonZeroUsize,
}

impl GridLayout {
    /// Creates a layout, rejecting a zero capacity.
    pub fn new(priority: Priority, capacity: usize) -> Result<Self, GridError> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(Self::with_capacity(priority, capacity)),
            None => {
                log::warn!("rejecting {priority:?}-priority grid with zero band capacity");
                Err(GridError::ZeroCapacity { priority })
            }
        }
    }

    /// Creates a layout from an already non-zero capacity.
    #[must_use]
    pub const fn with_capacity(priority: Priority, capacity: NonZeroUsize) -> Self {
        Self { priority, capacity }
    }

    /// Rows of at most `max_row_elements` cells.
    pub fn row_priority(max_row_elements: usize) -> Result<Self, GridError> {
        Self::new(Priority::Row, max_row_elements)
    }

    /// Columns of at most `max_column_elements` cells.
    pub fn column_priority(max_column_elements: usize) -> Result<Self, GridError> {
        Self::new(Priority::Column, max_column_elements)
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the maximum number of placements per band.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the 1-based `(row, column)` of the element at `index`.
    #[must_use]
    pub const fn coordinates_of(&self, index: usize) -> (usize, usize) {
        let axis = index / self.capacity.get() + 1;
        let within = index % self.capacity.get() + 1;
        match self.priority {
            Priority::Row => (axis, within),
            Priority::Column => (within, axis),
        }
    }

    /// Inverse of [`coordinates_of`](Self::coordinates_of).
    ///
    /// Returns `None` for coordinates no element could occupy; the index may
    /// still be past the end of a particular data set.
    #[must_use]
    pub fn index_of(&self, row: usize, column: usize) -> Option<usize> {
        let (axis, within) = match self.priority {
            Priority::Row => (row, column),
            Priority::Column => (column, row),
        };
        if axis == 0 || within == 0 || within > self.capacity.get() {
            return None;
        }
        (axis - 1)
            .checked_mul(self.capacity.get())?
            .checked_add(within - 1)
    }

    /// Number of bands needed for `len` elements.
    #[must_use]
    pub const fn band_count_for(&self, len: usize) -> usize {
        len.div_ceil(self.capacity.get())
    }
}

/// One element with its grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement<T> {
    /// 1-based row.
    pub row: usize,
    /// 1-based column.
    pub column: usize,
    /// The element.
    pub data: T,
}

impl<T> Placement<T> {
    /// Coordinate shared by every placement in the same band.
    #[must_use]
    pub const fn band_coordinate(&self, priority: Priority) -> usize {
        match priority {
            Priority::Row => self.row,
            Priority::Column => self.column,
        }
    }

    /// Coordinate ordering placements within a band.
    #[must_use]
    pub const fn cross_coordinate(&self, priority: Priority) -> usize {
        match priority {
            Priority::Row => self.column,
            Priority::Column => self.row,
        }
    }
}

/// Placements for a whole data set, grouped into bands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridState<T> {
    layout: GridLayout,
    placements: Vec<Placement<T>>,
    bands: Vec<Range<usize>>,
}

/// Partitions `data` with a capacity that has not been validated yet.
pub fn partition<T>(
    data: impl IntoIterator<Item = T>,
    priority: Priority,
    capacity: usize,
) -> Result<GridState<T>, GridError> {
    let layout = GridLayout::new(priority, capacity)?;
    Ok(GridState::new(data, layout))
}

impl<T> GridState<T> {
    /// Partitions `data` according to `layout`.
    #[must_use]
    pub fn new(data: impl IntoIterator<Item = T>, layout: GridLayout) -> Self {
        let mut state = Self {
            layout,
            placements: Vec::new(),
            bands: Vec::new(),
        };
        state.rebuild(data);
        state
    }

    /// Discards every placement and partitions `data` from scratch.
    pub fn update(&mut self, data: impl IntoIterator<Item = T>) {
        self.rebuild(data);
    }

    fn rebuild(&mut self, data: impl IntoIterator<Item = T>) {
        let priority = self.layout.priority;
        let capacity = self.layout.capacity.get();

        self.placements.clear();
        self.bands.clear();

        let mut axis = 1;
        let mut within = 0;
        for element in data {
            let (row, column) = match priority {
                Priority::Row => (axis, within + 1),
                Priority::Column => (within + 1, axis),
            };
            self.placements.push(Placement {
                row,
                column,
                data: element,
            });
            within += 1;
            if within == capacity {
                within = 0;
                axis += 1;
            }
        }

        // Stable, so equal keys keep input order.
        self.placements
            .sort_by_key(|p| (p.band_coordinate(priority), p.cross_coordinate(priority)));

        let mut start = 0;
        for i in 1..=self.placements.len() {
            let boundary = i == self.placements.len()
                || self.placements[i].band_coordinate(priority)
                    != self.placements[start].band_coordinate(priority);
            if boundary {
                self.bands.push(start..i);
                start = i;
            }
        }
        log::trace!(
            "partitioned {} elements into {} {priority:?} bands of capacity {capacity}",
            self.placements.len(),
            self.bands.len(),
        );
    }

    /// Returns the layout.
    #[must_use]
    pub const fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.layout.priority
    }

    /// Returns every placement, band by band.
    #[must_use]
    pub fn placements(&self) -> &[Placement<T>] {
        &self.placements
    }

    /// Number of placed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` if nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of bands. Zero for empty data.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Returns the band at 0-based `index`; its band coordinate is `index + 1`.
    #[must_use]
    pub fn band(&self, index: usize) -> Option<&[Placement<T>]> {
        let range = self.bands.get(index)?.clone();
        self.placements.get(range)
    }

    /// Iterates over bands in ascending band coordinate.
    pub fn bands(&self) -> impl ExactSizeIterator<Item = &[Placement<T>]> + '_ {
        self.bands.iter().map(|r| &self.placements[r.clone()])
    }

    /// Looks up the placement at 1-based `(row, column)`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&Placement<T>> {
        self.placements.get(self.layout.index_of(row, column)?)
    }
}
