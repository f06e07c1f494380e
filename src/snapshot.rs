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

//! Point-in-time views of an index for reporting and visualization.
//!
//! The field names of these types are part of the public interface; they are
//! serialized as-is.

use crate::bucket::Bucket;

use serde::{Deserialize, Serialize};

/// The contents of one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSnapshot<K> {
    /// Whether this bucket is the next one to split.
    pub next: bool,
    /// Keys in the primary segment.
    pub entries: Vec<K>,
    /// Keys in the overflow chain, in chain order.
    pub overflow: Vec<K>,
}

impl<K: Clone> BucketSnapshot<K> {
    pub(crate) fn capture(bucket: &Bucket<K>, next: bool) -> BucketSnapshot<K> {
        BucketSnapshot {
            next,
            entries: bucket.primary().to_vec(),
            overflow: bucket.overflow_keys(),
        }
    }
}

impl<K> BucketSnapshot<K> {
    pub fn len(&self) -> usize {
        self.entries.len() + self.overflow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.overflow.is_empty()
    }
}

/// The state of a [`LinearHashIndex`](crate::LinearHashIndex).
///
/// A snapshot can be handed back to
/// [`LinearHashIndex::from_snapshot`](crate::LinearHashIndex::from_snapshot)
/// to rebuild an equivalent index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot<K> {
    /// Initial bucket count.
    pub n: usize,
    pub level: u32,
    pub next: usize,
    pub capacity: usize,
    pub total_entries: usize,
    pub load_factor: f64,
    pub buckets: Vec<BucketSnapshot<K>>,
}
