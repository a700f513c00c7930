//! Vertex label allocation.
//!
//! Labels are computed from store state before the vertex record exists,
//! so construction never needs to peek at a half-built vertex.

use crate::id::Label;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How new vertices are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPolicy {
    /// Creation order: 1, 2, 3, … Labels of removed vertices are never reused.
    Sequential,
    /// Smallest positive integer not carried by a live vertex.
    #[default]
    ReuseSmallest,
}

/// Stateful half of label allocation (the sequential counter).
#[derive(Debug, Clone)]
pub struct LabelAllocator {
    policy: LabelPolicy,
    next_sequential: u32,
}

impl LabelAllocator {
    pub fn new(policy: LabelPolicy) -> Self {
        Self {
            policy,
            next_sequential: Label::FIRST.get(),
        }
    }

    /// The label the next vertex would receive. Pure: does not advance
    /// the sequential counter.
    pub fn peek<I>(&self, live: I) -> Label
    where
        I: IntoIterator<Item = Label>,
    {
        match self.policy {
            LabelPolicy::Sequential => Label(self.next_sequential),
            LabelPolicy::ReuseSmallest => smallest_unused(live),
        }
    }

    /// Commit an allocation previously computed by [`peek`](Self::peek).
    pub fn commit(&mut self, label: Label) {
        if self.policy == LabelPolicy::Sequential {
            self.next_sequential = self.next_sequential.max(label.get().saturating_add(1));
        }
    }

    pub fn reset(&mut self) {
        self.next_sequential = Label::FIRST.get();
    }
}

/// First gap in `1..=count+1`.
fn smallest_unused<I>(live: I) -> Label
where
    I: IntoIterator<Item = Label>,
{
    let used: HashSet<u32> = live.into_iter().map(Label::get).collect();
    let upper = used.len() as u32 + 1;
    (1..=upper)
        .find(|n| !used.contains(n))
        .map(Label)
        .unwrap_or(Label(upper))
}
