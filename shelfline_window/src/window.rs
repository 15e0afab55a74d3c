// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowed layout core: an explicit window state and the pure
//! fill/scroll transformations over it.
//!
//! Keeping the state as a plain value and the transformations as free
//! functions makes the scroll algorithm testable without materializing any
//! visuals; [`ListContainer`](crate::ListContainer) reconciles visuals
//! against the states these functions return.

use core::fmt;
use core::ops::Range;

use crate::HeightTable;

/// The contiguous run of item positions currently materialized, plus how far
/// the first of them is scrolled past the viewport's top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowState {
    /// Position of the first item in the window.
    pub first_position: usize,
    /// Number of materialized items.
    pub window_len: usize,
    /// Pixels the first window item's top edge sits above the viewport top.
    ///
    /// Non-negative at rest; transiently negative inside the upward-scroll
    /// loop before renormalization.
    pub scroll_offset: i32,
}

impl WindowState {
    /// A window with nothing materialized.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            first_position: 0,
            window_len: 0,
            scroll_offset: 0,
        }
    }

    /// Returns `true` if nothing is materialized.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.window_len == 0
    }

    /// The materialized positions, in order.
    #[must_use]
    pub const fn positions(&self) -> Range<usize> {
        self.first_position..self.first_position + self.window_len
    }

    /// Pixels of viewport the window currently covers: the sum of the
    /// windowed item heights minus the scroll offset.
    #[must_use]
    pub fn filled_height(&self, heights: &HeightTable) -> i32 {
        heights.sum_range(self.positions()) - self.scroll_offset
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self::empty()
    }
}

/// The scroll bookkeeping and the height table disagree.
///
/// Under a consistent height table these are unreachable: the clamp step
/// bounds the offset so the fill loops stay within `0..item_count`. They
/// exist so an inconsistency (for example, an adapter shrinking behind a
/// stale table) fails fast instead of indexing out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// The upward-scroll loop would reveal an item before position 0.
    BeforeStart,
    /// The fill loop would materialize an item past the end of the list.
    PastEnd {
        /// The position the fill loop requested.
        position: usize,
        /// The number of items the height table knows about.
        item_count: usize,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeStart => {
                write!(f, "scroll would reveal an item before position 0")
            }
            Self::PastEnd {
                position,
                item_count,
            } => {
                write!(
                    f,
                    "scroll fill requested item {position} of a {item_count}-item list"
                )
            }
        }
    }
}

impl core::error::Error for WindowError {}

/// Builds the initial window: items from position 0 until the accumulated
/// height reaches or passes `viewport`.
///
/// The item that crosses the viewport edge is included (partially visible).
#[must_use]
pub fn fill_window(heights: &HeightTable, viewport: i32) -> WindowState {
    let mut len = 0;
    let mut top: i64 = 0;
    while len < heights.len() && top < i64::from(viewport) {
        top += i64::from(heights.height(len));
        len += 1;
    }
    WindowState {
        first_position: 0,
        window_len: len,
        scroll_offset: 0,
    }
}

/// Applies a scroll of `delta` pixels to `state`, returning the new window.
///
/// Positive `delta` reveals later items; negative reveals earlier ones. The
/// algorithm, in order:
///
/// 1. Add `delta` to the scroll offset.
/// 2. Clamp it so the viewport cannot pass the content's start or end.
/// 3. Scrolling down: retire head items the offset has moved fully past
///    (strictly beyond their height), then extend the tail until the window
///    covers the viewport again.
/// 4. Scrolling up: reveal items before the head until the offset
///    renormalizes to `>= 0` (each revealed item's height is added back),
///    then retire tail items the viewport no longer reaches.
///
/// Items are retired whole (no partial retire) and appended exactly when the
/// filled height falls short (no prefetch margin). An empty window, or an
/// empty height table, is returned unchanged; hosts lay out before scrolling.
pub fn scroll_window(
    state: WindowState,
    heights: &HeightTable,
    viewport: i32,
    delta: i32,
) -> Result<WindowState, WindowError> {
    let count = heights.len();
    if state.window_len == 0 || count == 0 {
        return Ok(state);
    }

    let mut first = state.first_position;
    let mut len = state.window_len;
    let mut offset = i64::from(state.scroll_offset) + i64::from(delta);

    if offset > 0 {
        // The window's bottom edge cannot pass the end of the content.
        let below = i64::from(heights.sum_range(first..count)) - i64::from(viewport);
        offset = offset.min(below);
    } else if offset < 0 {
        // The window's top edge cannot retreat past position 0.
        let above = i64::from(heights.sum_range(0..first));
        offset = offset.max(-above);
    }

    if offset > 0 {
        while len > 0 && offset > i64::from(heights.height(first)) {
            offset -= i64::from(heights.height(first));
            first += 1;
            len -= 1;
        }
        while i64::from(heights.sum_range(first..first + len)) - offset < i64::from(viewport) {
            let next = first + len;
            if next >= count {
                return Err(WindowError::PastEnd {
                    position: next,
                    item_count: count,
                });
            }
            len += 1;
        }
    } else if offset < 0 {
        while offset < 0 {
            if first == 0 {
                return Err(WindowError::BeforeStart);
            }
            first -= 1;
            len += 1;
            offset += i64::from(heights.height(first));
        }
        while len > 1
            && i64::from(heights.sum_range(first..first + len - 1)) - offset
                >= i64::from(viewport)
        {
            len -= 1;
        }
    }

    debug_assert!(
        i32::try_from(offset).is_ok(),
        "scroll offset {offset} left the validated i32 content range"
    );
    #[expect(
        clippy::cast_possible_truncation,
        reason = "The clamp bounds the offset within the validated i32 content range"
    )]
    let scroll_offset = offset as i32;
    Ok(WindowState {
        first_position: first,
        window_len: len,
        scroll_offset,
    })
}
