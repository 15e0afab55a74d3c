// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached per-item heights with prefix-sum range queries.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{AdapterError, ListAdapter};

/// Per-item pixel heights, cached once per measure pass.
///
/// The table stores a prefix-sum alongside the raw heights so the scroll
/// algorithm can take range sums in constant time. Heights are validated as
/// they are cached: a negative height or a total beyond the `i32` pixel range
/// is rejected eagerly rather than corrupting later offset arithmetic.
#[derive(Clone, Debug, Default)]
pub struct HeightTable {
    heights: Vec<i32>,
    /// `starts[i]` is the offset of item `i` from the top of the content.
    starts: Vec<i32>,
    total: i32,
}

impl HeightTable {
    /// Builds a table from explicit per-item heights.
    pub fn from_heights<I>(heights: I) -> Result<Self, AdapterError>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut table = Self::default();
        let mut running: i64 = 0;
        for (position, height) in heights.into_iter().enumerate() {
            if height < 0 {
                return Err(AdapterError::NegativeItemHeight { position, height });
            }
            let Ok(start) = i32::try_from(running) else {
                return Err(AdapterError::ContentHeightOverflow { total: running });
            };
            table.heights.push(height);
            table.starts.push(start);
            running += i64::from(height);
        }
        table.total = i32::try_from(running)
            .map_err(|_| AdapterError::ContentHeightOverflow { total: running })?;
        Ok(table)
    }

    /// Queries and caches all item heights from `adapter`.
    pub fn from_adapter<A: ListAdapter>(adapter: &A) -> Result<Self, AdapterError> {
        let count = adapter.item_count();
        Self::from_heights((0..count).map(|position| adapter.item_height(position)))
    }

    /// Number of items in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns `true` if the table holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Height of the item at `position`, or `0` out of range.
    #[must_use]
    pub fn height(&self, position: usize) -> i32 {
        self.heights.get(position).copied().unwrap_or(0)
    }

    /// Offset of the top of item `position` from the top of the content.
    ///
    /// `position == len()` (or beyond) yields the total content height.
    #[must_use]
    pub fn offset_of(&self, position: usize) -> i32 {
        self.starts.get(position).copied().unwrap_or(self.total)
    }

    /// Sum of heights over `range`, clamped to the table bounds.
    #[must_use]
    pub fn sum_range(&self, range: Range<usize>) -> i32 {
        if range.start >= range.end {
            return 0;
        }
        self.offset_of(range.end) - self.offset_of(range.start)
    }

    /// Total content height.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::HeightTable;
    use crate::AdapterError;

    #[test]
    fn prefix_sums_match_direct_sums() {
        let table = HeightTable::from_heights([10, 20, 30, 40]).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.total(), 100);
        assert_eq!(table.offset_of(0), 0);
        assert_eq!(table.offset_of(2), 30);
        assert_eq!(table.offset_of(4), 100);
        assert_eq!(table.sum_range(1..3), 50);
        assert_eq!(table.sum_range(0..4), 100);
        assert_eq!(table.sum_range(2..2), 0);
    }

    #[test]
    fn out_of_range_queries_clamp() {
        let table = HeightTable::from_heights([10, 20]).unwrap();
        assert_eq!(table.height(5), 0);
        assert_eq!(table.offset_of(5), 30);
        assert_eq!(table.sum_range(1..9), 20);
    }

    #[test]
    fn negative_heights_are_rejected() {
        let err = HeightTable::from_heights([10, -3, 20]).unwrap_err();
        assert_eq!(
            err,
            AdapterError::NegativeItemHeight {
                position: 1,
                height: -3
            }
        );
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let err = HeightTable::from_heights([i32::MAX, i32::MAX]).unwrap_err();
        assert!(matches!(err, AdapterError::ContentHeightOverflow { .. }));
    }
}
