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

use crate::{IndexKey, LinearHashIndex};

use std::collections::HashMap;

/// Checks every structural invariant of `index`.
pub(crate) fn assert_invariants<K: IndexKey>(index: &LinearHashIndex<K>) {
    let width = index.round.width();

    assert!(index.round.next < width, "split pointer outside level");
    assert_eq!(index.buckets.len(), width + index.round.next);
    assert_eq!(index.bucket_count(), index.buckets.len());

    let mut stored = 0;

    for (i, bucket) in index.buckets.iter().enumerate() {
        assert_eq!(bucket.capacity(), index.capacity);
        assert!(bucket.primary().len() <= index.capacity);

        for key in bucket.iter() {
            assert_eq!(index.address_of(key), Some(i), "{:?} is misplaced", key);
        }

        stored += bucket.len();
    }

    assert_eq!(stored, index.len(), "len must count every stored key");
}

/// Occurrence count of every key, for comparing against a multiset model.
pub(crate) fn counts(index: &LinearHashIndex<i64>) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();

    for &key in index.iter() {
        *counts.entry(key).or_insert(0) += 1;
    }

    counts
}
