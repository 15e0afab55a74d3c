// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelfline Window: a windowed list container with view recycling.
//!
//! This crate is the core of a virtualized list widget: it presents a large,
//! variable-height item sequence inside a fixed viewport, materializing only
//! the items that intersect the viewport and recycling retired visuals
//! through a [`RecyclerPool`] as the user scrolls.
//!
//! The core concepts are:
//!
//! - [`ListAdapter`]: the contract a host implements to supply item counts,
//!   per-item pixel heights, view types, and visuals.
//! - [`HeightTable`]: per-item heights cached once per measure pass, with
//!   prefix-sum range queries.
//! - [`WindowState`]: an explicit value describing the visible window
//!   (`first_position`, `window_len`, `scroll_offset`), with the fill and
//!   scroll transformations as pure functions ([`fill_window`],
//!   [`scroll_window`]) so the algorithm is testable in isolation.
//! - [`ListContainer`]: the controller that owns the adapter, the pool, and
//!   the materialized [`WindowSlot`]s, and reconciles them against each new
//!   window state.
//!
//! This crate deliberately does **not** render, animate, or dispatch input.
//! Hosts own the event loop and drawing; they forward drag/fling deltas into
//! [`ListContainer::scroll_by`] (see the `shelfline_kinetics` crate for the
//! gesture side) and draw each slot at the frame reported by
//! [`ListContainer::frames`].
//!
//! ## Minimal example
//!
//! Ten uniform 40px rows of text in a 100px viewport:
//!
//! ```rust
//! use shelfline_window::{ListAdapter, ListContainer, ViewType};
//!
//! struct Labels {
//!     rows: Vec<&'static str>,
//! }
//!
//! impl ListAdapter for Labels {
//!     type Visual = String;
//!
//!     fn item_count(&self) -> usize {
//!         self.rows.len()
//!     }
//!     fn view_type_count(&self) -> usize {
//!         1
//!     }
//!     fn item_height(&self, _position: usize) -> i32 {
//!         40
//!     }
//!     fn item_view_type(&self, _position: usize) -> ViewType {
//!         ViewType(0)
//!     }
//!     fn create_visual(&mut self, _position: usize) -> String {
//!         String::new()
//!     }
//!     fn bind_visual(&mut self, position: usize, visual: &mut String) {
//!         visual.clear();
//!         visual.push_str(self.rows[position]);
//!     }
//! }
//!
//! let mut list = ListContainer::new();
//! list.set_adapter(Labels { rows: vec!["row"; 10] })?;
//!
//! let (width, height) = list.measure(320, 100)?;
//! list.layout(width, height)?;
//! // 40 + 40 < 100, so a third, partially visible row is materialized.
//! assert_eq!(list.slots().count(), 3);
//!
//! // Scroll past the first row: it is recycled and rebound further down.
//! list.scroll_by(60)?;
//! assert_eq!(list.first_position(), 1);
//! assert_eq!(list.scroll_offset(), 20);
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! All heights and offsets are integer pixels. Adapter contract violations
//! (negative heights, missing view types) are reported eagerly as
//! [`AdapterError`]; a disagreement between the cached heights and the
//! adapter is reported by the scroll loop as [`WindowError`] rather than
//! indexing out of range.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod container;
mod height_table;
mod window;

pub use adapter::{AdapterError, ListAdapter};
pub use container::{ListContainer, WindowSlot};
pub use height_table::HeightTable;
pub use shelfline_recycler::{RecyclerPool, ViewType};
pub use window::{WindowError, WindowState, fill_window, scroll_window};
