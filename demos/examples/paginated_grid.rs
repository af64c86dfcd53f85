// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Infinite-scrolling grid driven by simulated scroll geometry.
//!
//! This example shows how to combine:
//! - `understory_grid` to partition a growing data set into rows and render it,
//! - `understory_scroll_edge` (through the grid) to request the next page once
//!   the user settles near the bottom.
//!
//! A toy renderer prints the view tree as indented text.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example paginated_grid`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use understory_grid::{Cell, CrossAlignment, Grid, GridRenderer, ScrollConfig, StackAxis};
use understory_scroll_edge::EdgeEvent;

const PAGE: u32 = 12;
const ROW_HEIGHT: f64 = 120.0;
const VIEWPORT: f64 = 300.0;

/// View tree node produced by [`TextRenderer`].
#[derive(Debug)]
enum View {
    Text(String),
    Stack(StackAxis, Vec<View>),
    Scroll(ScrollConfig, Box<View>),
}

impl View {
    fn print(&self, depth: usize) {
        let pad = "  ".repeat(depth);
        match self {
            Self::Text(text) => println!("{pad}{text}"),
            Self::Stack(axis, children) => {
                println!("{pad}{axis:?} stack");
                for child in children {
                    child.print(depth + 1);
                }
            }
            Self::Scroll(config, content) => {
                println!("{pad}scroll {:?}", config.axes);
                content.print(depth + 1);
            }
        }
    }
}

struct TextRenderer;

impl GridRenderer for TextRenderer {
    type View = View;

    fn stack(
        &mut self,
        axis: StackAxis,
        children: Vec<View>,
        _spacing: f64,
        _alignment: CrossAlignment,
    ) -> View {
        View::Stack(axis, children)
    }

    fn scroll(&mut self, content: View, config: &ScrollConfig) -> View {
        View::Scroll(*config, Box::new(content))
    }
}

fn main() {
    env_logger::init();

    let requested = Rc::new(RefCell::new(0_u32));
    let on_edge = Rc::clone(&requested);

    let mut grid = Grid::rows(0..PAGE, 4)
        .row_spacing(8.0)
        .column_spacing(8.0)
        .alignment(CrossAlignment::Leading)
        .viewport_extent(VIEWPORT)
        .on_reach_edge(move || *on_edge.borrow_mut() += 1)
        .build(|cell: Cell<'_, u32>| {
            let p = cell.placement();
            View::Text(format!("#{} at ({}, {})", p.data, p.row, p.column))
        })
        .expect("four columns is a valid layout");

    grid.render_scrollable(&mut TextRenderer, false, true).print(0);

    let mut now = 0_u64;
    let mut loaded = PAGE;
    for page in 1..=3 {
        let content = grid.band_count() as f64 * ROW_HEIGHT;
        // Initial layout, then a fling to the bottom in 16ms frames.
        grid.on_geometry(Rect::new(0.0, 0.0, 400.0, content), now);
        let target = content - VIEWPORT + 10.0;
        let mut offset = 0.0;
        while offset < target {
            offset = (offset + 40.0).min(target);
            now += 16;
            grid.on_geometry(Rect::new(0.0, -offset, 400.0, content - offset), now);
        }

        if let Some(wake) = grid.next_deadline() {
            now = wake;
            if grid.poll(now) == Some(EdgeEvent::Reached) {
                println!("page {page}: edge reached, {} requests so far", requested.borrow());
            }
        }

        loaded += PAGE;
        grid.update_data(0..loaded);
        // Scroll back to the top of the new content so the edge rearms.
        now += 16;
        grid.on_geometry(Rect::new(0.0, 0.0, 400.0, grid.band_count() as f64 * ROW_HEIGHT), now);
        if let Some(wake) = grid.next_deadline() {
            now = wake;
            grid.poll(now);
        }
    }

    println!(
        "loaded {loaded} items in {} rows after {} requests (version {})",
        grid.band_count(),
        requested.borrow(),
        grid.version()
    );
    grid.detach();
}
