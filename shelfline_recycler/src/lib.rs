// Copyright 2025 the Shelfline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelfline Recycler: a type-partitioned pool of retired item visuals.
//!
//! Virtualized list containers create one visual per on-screen item and retire
//! visuals as items scroll out of view. Reconstructing a visual is usually far
//! more expensive than rebinding one, so retired visuals are parked here and
//! handed back out the next time an item of the same kind is materialized.
//!
//! The pool is a mapping from a [`ViewType`] to a LIFO stack of visuals of
//! that type. Two rules make it safe to reuse a pooled visual without
//! inspecting it:
//!
//! - A visual acquired for type `T` was only ever released for type `T`.
//! - A visual is owned by exactly one place at a time: the host's visible
//!   window, or this pool. Releasing moves ownership in; acquiring moves it
//!   back out.
//!
//! [`RecyclerPool::acquire`] returning [`None`] is not an error. It is the
//! signal that no retired visual of that type is available and the caller
//! should construct a fresh one.
//!
//! There is no eviction policy: the pool only grows while items are scrolled
//! off, so its size is bounded by the number of simultaneously visible items
//! in practice.
//!
//! ## Example
//!
//! ```rust
//! use shelfline_recycler::{RecyclerPool, ViewType};
//!
//! const CARD: ViewType = ViewType(0);
//!
//! let mut pool: RecyclerPool<String> = RecyclerPool::new(1);
//! assert!(pool.acquire(CARD).is_none());
//!
//! pool.release(CARD, String::from("retired card"));
//! let visual = pool.acquire(CARD);
//! assert_eq!(visual.as_deref(), Some("retired card"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Identifier partitioning pooled visuals by the kind of item they render.
///
/// Adapters assign each item position a view type; the pool guarantees that a
/// visual only ever serves positions of the type it was created for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ViewType(pub u32);

/// LIFO pool of retired item visuals, partitioned by [`ViewType`].
///
/// Pushing the same visual twice (without acquiring it in between) is a caller
/// error; the pool performs no deduplication.
#[derive(Clone, Debug)]
pub struct RecyclerPool<V> {
    stacks: HashMap<ViewType, SmallVec<[V; 4]>>,
}

impl<V> RecyclerPool<V> {
    /// Creates a pool with one empty stack per type in `0..type_count`.
    #[must_use]
    pub fn new(type_count: usize) -> Self {
        let mut stacks = HashMap::with_capacity(type_count);
        for tag in 0..type_count {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "View type tags are dense, small indices assigned by the adapter"
            )]
            stacks.insert(ViewType(tag as u32), SmallVec::new());
        }
        Self { stacks }
    }

    /// Parks a retired visual for later reuse under `view_type`.
    ///
    /// A `view_type` outside the range the pool was created with is accepted;
    /// a stack for it is created on demand rather than treating the release
    /// as an error.
    pub fn release(&mut self, view_type: ViewType, visual: V) {
        self.stacks.entry(view_type).or_default().push(visual);
    }

    /// Pops the most recently released visual of `view_type`, if any.
    ///
    /// `None` means the caller should construct a new visual; it is not an
    /// error, and unknown view types behave like empty stacks.
    pub fn acquire(&mut self, view_type: ViewType) -> Option<V> {
        self.stacks.get_mut(&view_type)?.pop()
    }

    /// Number of visuals currently parked across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.values().map(SmallVec::len).sum()
    }

    /// Returns `true` if no visuals are parked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.values().all(SmallVec::is_empty)
    }

    /// Number of type partitions the pool currently tracks.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.stacks.len()
    }

    /// Drops all parked visuals, keeping the type partitions.
    pub fn clear(&mut self) {
        for stack in self.stacks.values_mut() {
            stack.clear();
        }
    }
}
