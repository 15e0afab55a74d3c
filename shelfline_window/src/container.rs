// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The list container: owns the adapter, the recycler pool, and the
//! materialized window, and keeps them reconciled as the host scrolls.

use alloc::collections::VecDeque;
use core::fmt;

use kurbo::Rect;
use shelfline_recycler::{RecyclerPool, ViewType};

use crate::{
    AdapterError, HeightTable, ListAdapter, WindowError, WindowState, fill_window, scroll_window,
};

bitflags::bitflags! {
    /// Reasons the window must be rebuilt on the next layout pass.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Relayout: u8 {
        /// A new adapter was attached.
        const ADAPTER = 0b01;
        /// The container was given a different size.
        const SIZE    = 0b10;
    }
}

/// One materialized item: its position, the type it was created for, and the
/// visual currently bound to it.
#[derive(Debug)]
pub struct WindowSlot<V> {
    /// Item position this slot renders.
    pub position: usize,
    /// View type the visual was created for; it is recycled under this type.
    pub view_type: ViewType,
    /// The bound visual.
    pub visual: V,
}

/// A windowed list container: presents a large, variable-height item sequence
/// inside a fixed viewport, materializing only the items that intersect it.
///
/// The container owns three things and keeps them in sync:
///
/// - the attached [`ListAdapter`], which supplies counts, heights, and
///   visuals;
/// - a [`RecyclerPool`] of retired visuals, partitioned by view type;
/// - the visible window: a contiguous run of [`WindowSlot`]s described by a
///   [`WindowState`].
///
/// Hosts drive it with the usual measure/layout/scroll entry points:
/// [`measure`](Self::measure) caches item heights and computes the
/// container's size, [`layout`](Self::layout) materializes the initial
/// window, and [`scroll_by`](Self::scroll_by) moves the window, recycling
/// retired visuals and binding newly revealed ones. [`frames`](Self::frames)
/// exposes where each slot lands, tops running from `-scroll_offset`.
pub struct ListContainer<A: ListAdapter> {
    adapter: Option<A>,
    pool: RecyclerPool<A::Visual>,
    heights: HeightTable,
    state: WindowState,
    slots: VecDeque<WindowSlot<A::Visual>>,
    width: i32,
    height: i32,
    relayout: Relayout,
}

impl<A: ListAdapter> ListContainer<A> {
    /// Creates an empty container with no adapter attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapter: None,
            pool: RecyclerPool::new(0),
            heights: HeightTable::default(),
            state: WindowState::empty(),
            slots: VecDeque::new(),
            width: 0,
            height: 0,
            relayout: Relayout::ADAPTER,
        }
    }

    /// Attaches `adapter`, replacing any current one.
    ///
    /// Resets the window to `first_position = 0, scroll_offset = 0`,
    /// discards all previously materialized visuals (the pool is
    /// reinitialized to the new adapter's type count, so they are dropped,
    /// not pooled), and marks the layout dirty.
    ///
    /// The adapter is validated eagerly: reporting items without any view
    /// types is rejected, since every materialized item needs a type to be
    /// recycled under.
    pub fn set_adapter(&mut self, adapter: A) -> Result<(), AdapterError> {
        if adapter.item_count() > 0 && adapter.view_type_count() == 0 {
            return Err(AdapterError::NoViewTypes);
        }
        self.slots.clear();
        self.pool = RecyclerPool::new(adapter.view_type_count());
        self.heights = HeightTable::default();
        self.state = WindowState::empty();
        self.adapter = Some(adapter);
        self.relayout.insert(Relayout::ADAPTER);
        Ok(())
    }

    /// Returns the attached adapter, if any.
    #[must_use]
    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    /// Measures the container for the given available size.
    ///
    /// Queries the adapter's item count and every item height exactly once,
    /// caching them for layout and scrolling. The measured height is the
    /// smaller of the total content height and `avail_height`, so content
    /// shorter than the viewport never scrolls. The measured width is
    /// `avail_width`.
    pub fn measure(
        &mut self,
        avail_width: i32,
        avail_height: i32,
    ) -> Result<(i32, i32), AdapterError> {
        self.heights = match &self.adapter {
            Some(adapter) => HeightTable::from_adapter(adapter)?,
            None => HeightTable::default(),
        };
        Ok((avail_width, self.heights.total().min(avail_height)))
    }

    /// Lays the container out at the given size.
    ///
    /// Only the first layout after an adapter change, or a layout at a new
    /// size, rebuilds the window: current visuals are recycled into the
    /// pool, then items are materialized from position 0 until the viewport
    /// is covered. Other calls are no-ops.
    pub fn layout(&mut self, width: i32, height: i32) -> Result<(), WindowError> {
        if width != self.width || height != self.height {
            self.relayout.insert(Relayout::SIZE);
        }
        if self.relayout.is_empty() {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.relayout = Relayout::empty();

        while let Some(slot) = self.slots.pop_front() {
            self.pool.release(slot.view_type, slot.visual);
        }
        self.state = fill_window(&self.heights, height);
        let state = self.state;
        if let Some(adapter) = self.adapter.as_mut() {
            for position in state.positions() {
                let slot = materialize(adapter, &mut self.pool, position);
                self.slots.push_back(slot);
            }
        }
        Ok(())
    }

    /// Scrolls the content by `delta` pixels (positive reveals later items).
    ///
    /// Runs the windowed scroll algorithm, then reconciles the materialized
    /// slots against the new window: retired positions release their visuals
    /// to the pool, newly covered positions acquire-or-create a visual and
    /// bind it. Positions that stay in the window keep their visuals and are
    /// not rebound.
    pub fn scroll_by(&mut self, delta: i32) -> Result<(), WindowError> {
        let new_state = scroll_window(self.state, &self.heights, self.height, delta)?;
        let target = new_state.positions();

        while self
            .slots
            .front()
            .is_some_and(|slot| slot.position < target.start)
        {
            if let Some(slot) = self.slots.pop_front() {
                self.pool.release(slot.view_type, slot.visual);
            }
        }
        while self
            .slots
            .back()
            .is_some_and(|slot| slot.position >= target.end)
        {
            if let Some(slot) = self.slots.pop_back() {
                self.pool.release(slot.view_type, slot.visual);
            }
        }

        // Whatever survived is a contiguous run inside the target window.
        let covered = match (self.slots.front(), self.slots.back()) {
            (Some(front), Some(back)) => front.position..back.position + 1,
            _ => target.start..target.start,
        };
        if let Some(adapter) = self.adapter.as_mut() {
            for position in (target.start..covered.start).rev() {
                let slot = materialize(adapter, &mut self.pool, position);
                self.slots.push_front(slot);
            }
            for position in covered.end.max(target.start)..target.end {
                let slot = materialize(adapter, &mut self.pool, position);
                self.slots.push_back(slot);
            }
        }

        self.state = new_state;
        Ok(())
    }

    /// The current window state.
    #[must_use]
    pub const fn window_state(&self) -> WindowState {
        self.state
    }

    /// Position of the first materialized item.
    #[must_use]
    pub const fn first_position(&self) -> usize {
        self.state.first_position
    }

    /// Pixels the first materialized item is scrolled past the top edge.
    #[must_use]
    pub const fn scroll_offset(&self) -> i32 {
        self.state.scroll_offset
    }

    /// The container's laid-out width.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// The container's laid-out height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The materialized slots, in window order.
    pub fn slots(&self) -> impl Iterator<Item = &WindowSlot<A::Visual>> {
        self.slots.iter()
    }

    /// Frame of the slot at `index` within the window, in container
    /// coordinates: tops run downward from `-scroll_offset`, full width.
    #[must_use]
    pub fn slot_frame(&self, index: usize) -> Option<Rect> {
        let slot = self.slots.get(index)?;
        let top = self.heights.offset_of(slot.position)
            - self.heights.offset_of(self.state.first_position)
            - self.state.scroll_offset;
        let bottom = top + self.heights.height(slot.position);
        Some(Rect::new(
            0.0,
            f64::from(top),
            f64::from(self.width),
            f64::from(bottom),
        ))
    }

    /// Positions and frames of all materialized slots, top to bottom.
    pub fn frames(&self) -> impl Iterator<Item = (usize, Rect)> {
        (0..self.slots.len()).filter_map(|index| {
            let position = self.slots.get(index)?.position;
            Some((position, self.slot_frame(index)?))
        })
    }

    /// Number of visuals parked in the recycler pool.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }
}

impl<A: ListAdapter> Default for ListContainer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ListAdapter> fmt::Debug for ListContainer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListContainer")
            .field("state", &self.state)
            .field("items", &self.heights.len())
            .field("pooled", &self.pool.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Creates-or-reuses a visual for `position` and binds it.
fn materialize<A: ListAdapter>(
    adapter: &mut A,
    pool: &mut RecyclerPool<A::Visual>,
    position: usize,
) -> WindowSlot<A::Visual> {
    let view_type = adapter.item_view_type(position);
    let mut visual = match pool.acquire(view_type) {
        Some(visual) => visual,
        None => adapter.create_visual(position),
    };
    adapter.bind_visual(position, &mut visual);
    WindowSlot {
        position,
        view_type,
        visual,
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::ListContainer;
    use crate::{AdapterError, ListAdapter, ViewType};

    /// Adapter in the shape of the demo: uniform rows, a single view type,
    /// and string visuals tagged with a creation serial so tests can tell
    /// fresh visuals from recycled ones.
    struct Rows {
        count: usize,
        height: i32,
        created: usize,
    }

    impl Rows {
        fn demo() -> Self {
            Self {
                count: 30,
                height: 350,
                created: 0,
            }
        }
    }

    impl ListAdapter for Rows {
        type Visual = String;

        fn item_count(&self) -> usize {
            self.count
        }

        fn view_type_count(&self) -> usize {
            1
        }

        fn item_height(&self, _position: usize) -> i32 {
            self.height
        }

        fn item_view_type(&self, _position: usize) -> ViewType {
            ViewType(0)
        }

        fn create_visual(&mut self, _position: usize) -> String {
            self.created += 1;
            format!("visual#{}", self.created)
        }

        fn bind_visual(&mut self, position: usize, visual: &mut String) {
            let serial: String = visual.chars().take_while(|c| *c != '@').collect();
            *visual = format!("{serial}@{position}");
        }
    }

    fn demo_container() -> ListContainer<Rows> {
        let mut list = ListContainer::new();
        list.set_adapter(Rows::demo()).unwrap();
        let (w, h) = list.measure(1080, 932).unwrap();
        assert_eq!((w, h), (1080, 932));
        list.layout(w, h).unwrap();
        list
    }

    #[test]
    fn layout_materializes_and_binds_the_initial_window() {
        let list = demo_container();
        let positions: Vec<usize> = list.slots().map(|slot| slot.position).collect();
        assert_eq!(positions, [0, 1, 2]);
        assert_eq!(list.first_position(), 0);
        assert_eq!(list.scroll_offset(), 0);

        // Each visual was created fresh and bound to its position.
        let bound: Vec<&str> = list.slots().map(|slot| slot.visual.as_str()).collect();
        assert_eq!(bound, ["visual#1@0", "visual#2@1", "visual#3@2"]);
    }

    #[test]
    fn measure_caps_height_at_the_content() {
        let mut list = ListContainer::new();
        list.set_adapter(Rows {
            count: 2,
            height: 100,
            created: 0,
        })
        .unwrap();
        let (_, h) = list.measure(1080, 932).unwrap();
        assert_eq!(h, 200);

        // A container sized to its content cannot scroll.
        list.layout(1080, h).unwrap();
        list.scroll_by(50).unwrap();
        assert_eq!(list.scroll_offset(), 0);
    }

    #[test]
    fn scrolling_recycles_the_retired_head_into_the_appended_tail() {
        let mut list = demo_container();
        list.scroll_by(400).unwrap();

        assert_eq!(list.first_position(), 1);
        assert_eq!(list.scroll_offset(), 50);
        let positions: Vec<usize> = list.slots().map(|slot| slot.position).collect();
        assert_eq!(positions, [1, 2, 3]);

        // Item 0's visual went to the pool and came back for item 3; items
        // 1 and 2 kept their visuals without a rebind.
        let bound: Vec<&str> = list.slots().map(|slot| slot.visual.as_str()).collect();
        assert_eq!(bound, ["visual#2@1", "visual#3@2", "visual#1@3"]);
        assert_eq!(list.pooled(), 0);
    }

    #[test]
    fn scrolling_back_recycles_the_tail_into_the_head() {
        let mut list = demo_container();
        list.scroll_by(400).unwrap();
        list.scroll_by(-400).unwrap();

        assert_eq!(list.first_position(), 0);
        assert_eq!(list.scroll_offset(), 0);
        let positions: Vec<usize> = list.slots().map(|slot| slot.position).collect();
        assert_eq!(positions, [0, 1, 2]);
    }

    #[test]
    fn frames_run_from_the_negated_scroll_offset() {
        let mut list = demo_container();
        list.scroll_by(400).unwrap();

        let frames: Vec<(usize, f64, f64)> = list
            .frames()
            .map(|(position, frame)| (position, frame.y0, frame.y1))
            .collect();
        assert_eq!(
            frames,
            [
                (1, -50.0, 300.0),
                (2, 300.0, 650.0),
                (3, 650.0, 1000.0),
            ]
        );
        let first = list.slot_frame(0).unwrap();
        assert_eq!(first.x1, 1080.0);
    }

    #[test]
    fn reattaching_an_adapter_resets_the_window() {
        let mut list = demo_container();
        list.scroll_by(2_000).unwrap();
        assert_ne!(list.first_position(), 0);

        list.set_adapter(Rows {
            count: 5,
            height: 100,
            created: 0,
        })
        .unwrap();
        assert_eq!(list.first_position(), 0);
        assert_eq!(list.scroll_offset(), 0);
        assert_eq!(list.slots().count(), 0);
        // Prior visuals were dropped, not pooled: the pool was reinitialized.
        assert_eq!(list.pooled(), 0);

        let (w, h) = list.measure(1080, 932).unwrap();
        assert_eq!(h, 500);
        list.layout(w, h).unwrap();
        let positions: Vec<usize> = list.slots().map(|slot| slot.position).collect();
        assert_eq!(positions, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn adapters_with_items_but_no_types_are_rejected() {
        struct NoTypes;
        impl ListAdapter for NoTypes {
            type Visual = ();
            fn item_count(&self) -> usize {
                3
            }
            fn view_type_count(&self) -> usize {
                0
            }
            fn item_height(&self, _position: usize) -> i32 {
                10
            }
            fn item_view_type(&self, _position: usize) -> ViewType {
                ViewType(0)
            }
            fn create_visual(&mut self, _position: usize) {}
            fn bind_visual(&mut self, _position: usize, _visual: &mut ()) {}
        }

        let mut list = ListContainer::new();
        assert_eq!(list.set_adapter(NoTypes), Err(AdapterError::NoViewTypes));
    }

    #[test]
    fn negative_heights_surface_at_measure() {
        struct Broken;
        impl ListAdapter for Broken {
            type Visual = ();
            fn item_count(&self) -> usize {
                2
            }
            fn view_type_count(&self) -> usize {
                1
            }
            fn item_height(&self, position: usize) -> i32 {
                if position == 1 { -40 } else { 40 }
            }
            fn item_view_type(&self, _position: usize) -> ViewType {
                ViewType(0)
            }
            fn create_visual(&mut self, _position: usize) {}
            fn bind_visual(&mut self, _position: usize, _visual: &mut ()) {}
        }

        let mut list = ListContainer::new();
        list.set_adapter(Broken).unwrap();
        assert_eq!(
            list.measure(100, 100),
            Err(AdapterError::NegativeItemHeight {
                position: 1,
                height: -40
            })
        );
    }

    #[test]
    fn relayout_at_the_same_size_is_a_no_op() {
        let mut list = demo_container();
        list.scroll_by(400).unwrap();
        let before = list.window_state();

        list.layout(1080, 932).unwrap();
        assert_eq!(list.window_state(), before);

        // A genuine resize rebuilds from the top.
        list.layout(1080, 700).unwrap();
        assert_eq!(list.first_position(), 0);
        assert_eq!(list.scroll_offset(), 0);
        assert_eq!(list.slots().count(), 2);
    }
}
