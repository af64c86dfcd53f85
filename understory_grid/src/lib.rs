// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_grid --heading-base-level=0

//! Understory Grid: row- and column-priority grids over flat data.
//!
//! This crate arranges a flat sequence of elements into a two-dimensional grid
//! and hands the result to a host UI framework for drawing. It is
//! renderer-agnostic: it never measures or positions anything.
//!
//! The core concepts are:
//!
//! - [`Priority`] and [`GridLayout`]: whether rows or columns fill first, and
//!   how many cells a band holds before wrapping. A zero capacity is rejected
//!   with [`GridError::ZeroCapacity`].
//! - [`GridState`]: the result of partitioning. Each element gets a 1-based
//!   [`Placement`], and placements sharing a row (row priority) or column
//!   (column priority) are grouped into ordered bands. Updates rebuild the
//!   state from scratch.
//! - [`Grid`]: a component owning a [`GridState`], a single cell render closure
//!   taking a [`Cell`], spacing and [`CrossAlignment`], and a scroll edge
//!   detector from `understory_scroll_edge` that drives a pagination callback.
//! - [`GridRenderer`]: the host's stack and scroll containers.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_grid::{Priority, partition};
//!
//! // Nine elements, four per row.
//! let state = partition(1..=9, Priority::Row, 4).unwrap();
//! assert_eq!(state.band_count(), 3);
//!
//! let last: Vec<_> = state.band(2).unwrap().iter().map(|p| (p.row, p.column)).collect();
//! assert_eq!(last, [(3, 1)]);
//!
//! // Zero capacity is a configuration error.
//! assert!(partition(1..=9, Priority::Row, 0).is_err());
//! ```
//!
//! ## Grid component with pagination
//!
//! ```rust
//! use std::{cell::Cell as Flag, rc::Rc};
//!
//! use kurbo::Rect;
//! use understory_grid::{Cell, Grid};
//!
//! let more = Rc::new(Flag::new(false));
//! let flag = Rc::clone(&more);
//! let mut grid = Grid::rows(0..12_u32, 3)
//!     .row_spacing(8.0)
//!     .viewport_extent(200.0)
//!     .on_reach_edge(move || flag.set(true))
//!     .build(|cell: Cell<'_, u32>| *cell.data())
//!     .unwrap();
//! assert_eq!(grid.band_count(), 4);
//!
//! // The host reports the content frame whenever it moves.
//! grid.on_geometry(Rect::new(0.0, 0.0, 300.0, 400.0), 0);
//! grid.on_geometry(Rect::new(0.0, -250.0, 300.0, 150.0), 16);
//! let wake = grid.next_deadline().unwrap();
//! grid.poll(wake);
//! assert!(more.get());
//!
//! // Loading the next page re-partitions everything.
//! grid.update_data(0..24);
//! assert_eq!(grid.band_count(), 8);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod grid;
mod partition;
mod render;

pub use error::GridError;
pub use grid::{Grid, GridBuilder};
pub use partition::{GridLayout, GridState, Placement, Priority, partition};
pub use render::{
    Cell, CrossAlignment, GridRenderer, ScrollAxes, ScrollConfig, StackAxis, make_grid_scrollable,
};
