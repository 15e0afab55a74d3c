// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adapter contract between a host's data and the list container.

use core::fmt;

use shelfline_recycler::ViewType;

/// Supplies item data and visuals to a [`ListContainer`](crate::ListContainer).
///
/// Positions are dense indices `0..item_count()`. Heights are integer pixels
/// and are queried once per measure pass, then cached; an adapter whose data
/// changes must be re-attached (or the container re-measured) for the change
/// to take effect.
///
/// `create_visual` is invoked only when the recycler pool has no retired
/// visual of the position's type. `bind_visual` is invoked every time a
/// visual is (re)used for a position, including immediately after creation.
pub trait ListAdapter {
    /// The renderable unit bound to one item position at a time.
    type Visual;

    /// Number of items in the list.
    fn item_count(&self) -> usize;

    /// Number of distinct view types handed out by [`Self::item_view_type`].
    fn view_type_count(&self) -> usize;

    /// Height of the item at `position`, in pixels. Must be non-negative.
    fn item_height(&self, position: usize) -> i32;

    /// View type of the item at `position`.
    ///
    /// Visuals are recycled within a type, so items sharing a type must be
    /// renderable by each other's visuals after a rebind.
    fn item_view_type(&self, position: usize) -> ViewType;

    /// Constructs a fresh visual for the item at `position`.
    fn create_visual(&mut self, position: usize) -> Self::Visual;

    /// Binds the item at `position` into `visual`, which may have previously
    /// rendered a different position of the same type.
    fn bind_visual(&mut self, position: usize, visual: &mut Self::Visual);
}

/// An adapter violated its contract; detected eagerly at attach/measure time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterError {
    /// The adapter reports items but no view types to partition them by.
    NoViewTypes,
    /// An item reported a negative height.
    NegativeItemHeight {
        /// Position of the offending item.
        position: usize,
        /// The height the adapter reported.
        height: i32,
    },
    /// The summed item heights exceed the representable pixel range.
    ContentHeightOverflow {
        /// The total content height that overflowed.
        total: i64,
    },
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoViewTypes => {
                write!(f, "adapter reports items but a view type count of zero")
            }
            Self::NegativeItemHeight { position, height } => {
                write!(f, "item {position} reported a negative height ({height}px)")
            }
            Self::ContentHeightOverflow { total } => {
                write!(f, "total content height {total}px exceeds the pixel range")
            }
        }
    }
}

impl core::error::Error for AdapterError {}
