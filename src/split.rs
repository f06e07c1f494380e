// MIT License
//
// Copyright (c) 2019 Gregory Meyer
//
// Permission is hereby granted, free of charge, to any person
// obtaining a copy of this software and associated documentation files
// (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of the Software,
// and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS
// BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN
// ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Split triggering and the split itself.

use crate::{bucket::Bucket, key::IndexKey, router};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Load threshold used by [`TriggerPolicy::on_load_factor`].
pub const DEFAULT_LOAD_THRESHOLD: f64 = 0.75;

/// Decides when an insert is followed by a split.
///
/// The policy is evaluated once after every successful insert and causes at
/// most one split, even if its condition still holds afterwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Split when the bucket that received the key holds more than `capacity`
    /// keys across its primary segment and overflow chain.
    ///
    /// The bucket that is split is always the one at the split pointer, which
    /// need not be the bucket that overflowed.
    #[default]
    OnOverflow,
    /// Split when `len / ((n << level) * capacity)` exceeds `threshold`, which
    /// must lie in the open interval (0, 1).
    OnLoadFactor { threshold: f64 },
}

impl TriggerPolicy {
    /// [`OnLoadFactor`](#variant.OnLoadFactor) with the default threshold of
    /// 0.75.
    pub fn on_load_factor() -> Self {
        TriggerPolicy::OnLoadFactor {
            threshold: DEFAULT_LOAD_THRESHOLD,
        }
    }
}

/// Ratio of stored keys to the primary capacity of the `n << level` buckets
/// addressable by the coarse hash.
///
/// The denominator is computed in floating point, so any capacity is accepted.
pub fn load_factor(len: usize, level: u32, n: usize, capacity: usize) -> f64 {
    len as f64 / (router::width(level, n) as f64 * capacity as f64)
}

/// Position of the table within its growth schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Round {
    pub(crate) n: usize,
    pub(crate) level: u32,
    pub(crate) next: usize,
}

impl Round {
    pub(crate) fn new(n: usize) -> Round {
        Round {
            n,
            level: 0,
            next: 0,
        }
    }

    pub(crate) fn width(&self) -> usize {
        router::width(self.level, self.n)
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.width() + self.next
    }

    pub(crate) fn address(&self, key: i64) -> usize {
        router::address(key, self.level, self.next, self.n)
    }

    /// Moves the split pointer past the bucket that was just split. Returns
    /// `true` if that completed the round.
    fn advance(&mut self) -> bool {
        self.next += 1;

        if self.next == self.width() {
            self.next = 0;
            self.level += 1;

            true
        } else {
            false
        }
    }
}

/// Applies a [`TriggerPolicy`] and performs splits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SplitController {
    policy: TriggerPolicy,
}

impl SplitController {
    pub(crate) fn new(policy: TriggerPolicy) -> SplitController {
        SplitController { policy }
    }

    pub(crate) fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    /// Returns `true` if an insert into `written` that left the table at
    /// `load_factor` should be followed by a split.
    pub(crate) fn should_split<K>(&self, written: &Bucket<K>, load_factor: f64) -> bool {
        match self.policy {
            TriggerPolicy::OnOverflow => written.len() > written.capacity(),
            TriggerPolicy::OnLoadFactor { threshold } => load_factor > threshold,
        }
    }

    /// Splits the bucket at the split pointer.
    ///
    /// An empty bucket is appended at the tail, every key of the split bucket
    /// is re-addressed with the hash of the next level, and the split pointer
    /// advances, starting a new round once it has swept the whole level.
    pub(crate) fn split<K: IndexKey>(
        &self,
        buckets: &mut Vec<Bucket<K>>,
        round: &mut Round,
        capacity: usize,
    ) {
        debug_assert_eq!(buckets.len(), round.bucket_count());

        let split_index = round.next;
        let image_index = buckets.len();
        buckets.push(Bucket::new(capacity));

        let keys = buckets[split_index].take_all();
        let mut moved = 0usize;

        for key in keys {
            let integer = key
                .to_integer()
                .expect("stored keys always have an integer form");
            let destination = router::hash(integer, round.level + 1, round.n);
            debug_assert!(destination == split_index || destination == image_index);

            if destination == image_index {
                moved += 1;
            }

            buckets[destination].insert(key);
        }

        debug!(
            split_index,
            image_index,
            moved,
            kept = buckets[split_index].len(),
            level = round.level,
            trigger = ?self.policy,
            "split bucket"
        );

        if round.advance() {
            debug!(
                level = round.level,
                buckets = buckets.len(),
                "completed split round"
            );
        }
    }
}
