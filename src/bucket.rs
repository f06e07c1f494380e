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

//! Fixed-capacity buckets with chained overflow segments.

use std::{fmt, iter::FusedIterator, mem};

use tracing::trace;

/// A bucket of the index: up to `capacity` primary keys, followed by a chain of
/// overflow segments of the same shape.
///
/// Overflow segments are allocated the first time a key does not fit and are
/// kept for the life of the bucket, even once removals empty them. Only a
/// split of the owning bucket releases its chain.
///
/// Every operation walks the chain iteratively, so chain depth is bounded only
/// by memory.
pub struct Bucket<K> {
    capacity: usize,
    entries: Vec<K>,
    overflow: Option<Box<Bucket<K>>>,
}

impl<K> Bucket<K> {
    /// Creates an empty bucket whose segments each hold `capacity` keys.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Bucket<K> {
        assert!(capacity > 0, "bucket capacity must be positive");

        Bucket {
            capacity,
            entries: Vec::new(),
            overflow: None,
        }
    }

    /// Rebuilds a bucket from its primary entries and the flattened contents of
    /// its overflow chain, which is re-chained in segments of `capacity`.
    pub(crate) fn from_parts(capacity: usize, entries: Vec<K>, overflow: Vec<K>) -> Bucket<K> {
        debug_assert!(entries.len() <= capacity);

        let mut bucket = Bucket::new(capacity);
        bucket.entries = entries;

        let mut tail = &mut bucket.overflow;
        let mut rest = overflow.into_iter().peekable();

        while rest.peek().is_some() {
            let mut segment = Bucket::new(capacity);
            segment.entries.extend(rest.by_ref().take(capacity));

            tail = &mut tail.insert(Box::new(segment)).overflow;
        }

        bucket
    }

    /// Maximum number of keys in each segment.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys stored in the primary segment.
    pub fn primary(&self) -> &[K] {
        &self.entries
    }

    /// Number of keys in this bucket and its overflow chain.
    pub fn len(&self) -> usize {
        self.segments().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments().all(|s| s.entries.is_empty())
    }

    /// Number of overflow segments chained behind the primary segment,
    /// including ones that have since been emptied by removals.
    pub fn overflow_depth(&self) -> usize {
        self.segments().count() - 1
    }

    /// Appends `key` to the first segment with a free slot, chaining a new
    /// overflow segment if every existing one is full.
    ///
    /// Returns `true` if the key landed in the primary segment.
    pub fn insert(&mut self, key: K) -> bool {
        let mut segment = self;
        let mut depth = 0usize;

        loop {
            if segment.entries.len() < segment.capacity {
                segment.entries.push(key);

                return depth == 0;
            }

            let capacity = segment.capacity;
            depth += 1;

            segment = &mut **segment.overflow.get_or_insert_with(|| {
                trace!(depth, capacity, "chained overflow segment");

                Box::new(Bucket::new(capacity))
            });
        }
    }

    /// Removes and returns every key in this bucket, leaving an empty primary
    /// segment with no overflow chain.
    pub(crate) fn take_all(&mut self) -> Vec<K> {
        let mut keys = mem::take(&mut self.entries);
        let mut overflow = self.overflow.take();

        while let Some(mut segment) = overflow {
            keys.append(&mut segment.entries);
            overflow = segment.overflow.take();
        }

        keys
    }

    /// Iterates over every key, primary segment first.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.segments().flat_map(|s| s.entries.iter())
    }

    fn segments(&self) -> Segments<'_, K> {
        Segments {
            current: Some(self),
        }
    }
}

impl<K: PartialEq> Bucket<K> {
    /// Returns `true` if any segment holds `key`.
    pub fn search(&self, key: &K) -> bool {
        self.segments().any(|s| s.entries.contains(key))
    }

    /// Removes the first occurrence of `key`, scanning the primary segment
    /// before the overflow chain.
    ///
    /// Segments are not compacted afterwards.
    pub fn remove(&mut self, key: &K) -> bool {
        let mut segment = Some(self);

        while let Some(current) = segment {
            if let Some(position) = current.entries.iter().position(|k| k == key) {
                current.entries.remove(position);

                return true;
            }

            segment = current.overflow.as_deref_mut();
        }

        false
    }
}

impl<K: Clone> Bucket<K> {
    /// Every key in this bucket, primary segment first, then each overflow
    /// segment in chain order.
    pub fn all_keys(&self) -> Vec<K> {
        self.segments()
            .flat_map(|s| s.entries.iter().cloned())
            .collect()
    }

    /// Every key stored behind the primary segment, in chain order.
    pub fn overflow_keys(&self) -> Vec<K> {
        self.segments()
            .skip(1)
            .flat_map(|s| s.entries.iter().cloned())
            .collect()
    }
}

impl<K> Drop for Bucket<K> {
    fn drop(&mut self) {
        let mut overflow = self.overflow.take();

        while let Some(mut segment) = overflow {
            overflow = segment.overflow.take();
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Bucket<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries)
            .field(
                "overflow",
                &self.segments().skip(1).map(|s| &s.entries).collect::<Vec<_>>(),
            )
            .finish()
    }
}

struct Segments<'a, K> {
    current: Option<&'a Bucket<K>>,
}

impl<'a, K> Iterator for Segments<'a, K> {
    type Item = &'a Bucket<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = self.current?;
        self.current = segment.overflow.as_deref();

        Some(segment)
    }
}

impl<K> FusedIterator for Segments<'_, K> {}
