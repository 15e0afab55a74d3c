// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless run of the classic list demo: 30 rows of 350px inside a
//! 932px-tall viewport, scrolled by a scripted drag and the fling it
//! releases into.
//!
//! Each step prints the window state and the frames the host would draw at,
//! so the recycling behavior is visible: only three or four rows are ever
//! materialized, and retired visuals come back for later positions.

use std::error::Error;

use shelfline_kinetics::{DragTracker, FlingScroller};
use shelfline_window::{ListAdapter, ListContainer, ViewType};

const ROW_COUNT: usize = 30;
const ROW_HEIGHT: i32 = 350;
const VIEWPORT_WIDTH: i32 = 1080;
const VIEWPORT_HEIGHT: i32 = 932;
const FRAME_MS: i64 = 16;

/// A row visual: the label it currently shows, plus a creation serial so
/// the output shows which visuals are fresh and which were recycled.
struct Card {
    serial: usize,
    label: String,
}

struct ShelfAdapter {
    created: usize,
}

impl ListAdapter for ShelfAdapter {
    type Visual = Card;

    fn item_count(&self) -> usize {
        ROW_COUNT
    }

    fn view_type_count(&self) -> usize {
        1
    }

    fn item_height(&self, _position: usize) -> i32 {
        ROW_HEIGHT
    }

    fn item_view_type(&self, _position: usize) -> ViewType {
        ViewType(0)
    }

    fn create_visual(&mut self, _position: usize) -> Card {
        self.created += 1;
        Card {
            serial: self.created,
            label: String::new(),
        }
    }

    fn bind_visual(&mut self, position: usize, visual: &mut Card) {
        visual.label = format!("=={position}==");
    }
}

fn print_window(list: &ListContainer<ShelfAdapter>) {
    let state = list.window_state();
    println!(
        "  first={} offset={}px window={:?}",
        state.first_position,
        state.scroll_offset,
        state.positions(),
    );
    for (slot, (_, frame)) in list.slots().zip(list.frames()) {
        println!(
            "    {:>6} (visual #{}) at {}",
            slot.visual.label,
            slot.visual.serial,
            format_frame(frame),
        );
    }
}

fn format_frame(frame: kurbo::Rect) -> String {
    format!("y {:>5}..{:<5}", frame.y0, frame.y1)
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut list = ListContainer::new();
    list.set_adapter(ShelfAdapter { created: 0 })?;

    let (width, height) = list.measure(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)?;
    list.layout(width, height)?;
    println!("after layout ({width}x{height}):");
    print_window(&list);

    // A drag: finger lands at y=900 and pulls up 45px per frame.
    let mut drag = DragTracker::new();
    let mut fling = FlingScroller::new();

    let mut now = 0_i64;
    let mut finger_y = 900;
    drag.on_down(now, finger_y);
    fling.abort();

    for _ in 0..10 {
        now += FRAME_MS;
        finger_y -= 45;
        if let Some(delta) = drag.on_move(now, finger_y) {
            list.scroll_by(delta)?;
        }
    }
    println!("\nafter dragging 450px:");
    print_window(&list);

    // Release: the drag's velocity decays through the fling stepper.
    if let Some(velocity) = drag.on_up() {
        println!("\nreleased at {velocity:.0} px/s");
        fling.fling(velocity);
    }
    let mut travelled = 0_i64;
    while !fling.is_finished() {
        let delta = fling.step(FRAME_MS);
        list.scroll_by(delta)?;
        travelled += i64::from(delta);
    }
    println!("fling travelled {travelled}px:");
    print_window(&list);
    println!("\n{} visuals parked in the pool", list.pooled());

    Ok(())
}
