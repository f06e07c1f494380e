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

//! A linear hashing index.
//!
//! The table starts with `n` buckets and grows one bucket per split. Splits
//! follow a fixed schedule: the split pointer sweeps buckets `0..n << level`
//! in order, and every split appends the image of the bucket at the pointer to
//! the tail of the table. Once the pointer has swept the whole level the table
//! is exactly twice as wide, the level is incremented and the sweep starts
//! over.
//!
//! Between splits, buckets absorb extra keys in chains of overflow segments.

use crate::{
    bucket::Bucket,
    config::Config,
    error::{Error, Result},
    key::IndexKey,
    snapshot::{BucketSnapshot, IndexSnapshot},
    split::{self, Round, SplitController, TriggerPolicy},
};

use tracing::warn;

/// A hash index over integer keys that grows incrementally by linear hashing.
///
/// Keys are stored as a multiset: inserting a key that is already present adds
/// a second occurrence, and [`remove`] takes away one occurrence at a time.
///
/// Every key type implementing [`IndexKey`] can be stored. Keys are addressed
/// by their integer form, so floating point keys are accepted only when they
/// hold a finite integer value.
///
/// `LinearHashIndex` is not synchronized. Operations that mutate the index may
/// move keys between buckets, so callers that share an index between threads
/// must guard the whole index with a single lock.
///
/// [`remove`]: #method.remove
/// [`IndexKey`]: crate::IndexKey
#[derive(Debug)]
pub struct LinearHashIndex<K: IndexKey = i64> {
    buckets: Vec<Bucket<K>>,
    round: Round,
    capacity: usize,
    len: usize,
    controller: SplitController,
}

impl<K: IndexKey> LinearHashIndex<K> {
    /// Creates an empty index with the [default configuration]: two initial
    /// buckets of capacity four, splitting on overflow.
    ///
    /// [default configuration]: crate::Config::default
    pub fn new() -> LinearHashIndex<K> {
        LinearHashIndex::build(Config::default())
    }

    /// Creates an empty index after validating `config`.
    ///
    /// Returns [`Error::InvalidConfig`] naming the first rejected option; no
    /// index is created in that case.
    pub fn with_config(config: Config) -> Result<LinearHashIndex<K>> {
        config.validate()?;

        Ok(LinearHashIndex::build(config))
    }

    fn build(config: Config) -> LinearHashIndex<K> {
        let buckets = (0..config.initial_buckets)
            .map(|_| Bucket::new(config.capacity))
            .collect();

        LinearHashIndex {
            buckets,
            round: Round::new(config.initial_buckets),
            capacity: config.capacity,
            len: 0,
            controller: SplitController::new(config.trigger),
        }
    }

    /// Rebuilds an index from a snapshot taken by [`snapshot`], for example
    /// one that was serialized by a presentation layer and read back.
    ///
    /// The snapshot must describe a reachable state of an index built with
    /// `config`: matching initial bucket count and capacity, a split pointer
    /// inside the current level, exactly `n << level + next` buckets, no
    /// primary segment larger than the capacity, and every key stored in the
    /// bucket it addresses to. The per-bucket `next` flags and the recorded
    /// load factor are derived values and are not checked. Overflow keys are
    /// re-chained in segments of `capacity`.
    ///
    /// [`snapshot`]: #method.snapshot
    pub fn from_snapshot(config: Config, snapshot: IndexSnapshot<K>) -> Result<LinearHashIndex<K>> {
        config.validate()?;

        if snapshot.n != config.initial_buckets {
            return Err(invalid_snapshot(format!(
                "snapshot has {} initial buckets, configuration has {}",
                snapshot.n, config.initial_buckets
            )));
        }

        if snapshot.capacity != config.capacity {
            return Err(invalid_snapshot(format!(
                "snapshot has bucket capacity {}, configuration has {}",
                snapshot.capacity, config.capacity
            )));
        }

        let width = 1usize
            .checked_shl(snapshot.level)
            .and_then(|w| w.checked_mul(snapshot.n))
            .ok_or_else(|| invalid_snapshot(format!("level {} is too large", snapshot.level)))?;

        if snapshot.next >= width {
            return Err(invalid_snapshot(format!(
                "split pointer {} is outside level {} of width {}",
                snapshot.next, snapshot.level, width
            )));
        }

        if snapshot.buckets.len() != width + snapshot.next {
            return Err(invalid_snapshot(format!(
                "expected {} buckets, snapshot has {}",
                width + snapshot.next,
                snapshot.buckets.len()
            )));
        }

        let round = Round {
            n: snapshot.n,
            level: snapshot.level,
            next: snapshot.next,
        };

        let mut len = 0;

        for (i, bucket) in snapshot.buckets.iter().enumerate() {
            if bucket.entries.len() > config.capacity {
                return Err(invalid_snapshot(format!(
                    "bucket {} holds {} primary keys, capacity is {}",
                    i,
                    bucket.entries.len(),
                    config.capacity
                )));
            }

            for key in bucket.entries.iter().chain(bucket.overflow.iter()) {
                let integer = key.to_integer().ok_or_else(|| {
                    invalid_snapshot(format!(
                        "bucket {} holds {:?}, which is not a finite integer",
                        i, key
                    ))
                })?;

                let address = round.address(integer);

                if address != i {
                    return Err(invalid_snapshot(format!(
                        "bucket {} holds {:?}, which addresses bucket {}",
                        i, key, address
                    )));
                }
            }

            len += bucket.len();
        }

        if len != snapshot.total_entries {
            return Err(invalid_snapshot(format!(
                "snapshot records {} entries, buckets hold {}",
                snapshot.total_entries, len
            )));
        }

        let buckets = snapshot
            .buckets
            .into_iter()
            .map(|b| Bucket::from_parts(config.capacity, b.entries, b.overflow))
            .collect();

        Ok(LinearHashIndex {
            buckets,
            round,
            capacity: config.capacity,
            len,
            controller: SplitController::new(config.trigger),
        })
    }

    /// The configuration this index was built with.
    pub fn config(&self) -> Config {
        Config {
            initial_buckets: self.round.n,
            capacity: self.capacity,
            trigger: self.controller.policy(),
        }
    }

    /// Number of keys stored, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of completed split rounds.
    pub fn level(&self) -> u32 {
        self.round.level
    }

    /// Index of the bucket that will be split next.
    pub fn next(&self) -> usize {
        self.round.next
    }

    /// Number of buckets the index was created with.
    pub fn initial_buckets(&self) -> usize {
        self.round.n
    }

    /// Primary capacity of each bucket.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn trigger(&self) -> TriggerPolicy {
        self.controller.policy()
    }

    /// Number of buckets currently allocated, always `n << level + next`.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Stored keys divided by the primary capacity of the `n << level` buckets
    /// addressable at the current level.
    ///
    /// Buckets appended during the current round are not counted, so the load
    /// factor can exceed 1.
    pub fn load_factor(&self) -> f64 {
        split::load_factor(self.len, self.round.level, self.round.n, self.capacity)
    }

    /// Returns the bucket at `index`, if there is one.
    pub fn bucket(&self, index: usize) -> Option<&Bucket<K>> {
        self.buckets.get(index)
    }

    /// Every bucket's keys, primary segment first, in bucket order.
    pub fn buckets(&self) -> Vec<Vec<K>> {
        self.buckets.iter().map(Bucket::all_keys).collect()
    }

    /// Iterates over every stored key in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.iter().flat_map(|b| b.iter())
    }

    /// Inserts one occurrence of `key`, then splits the bucket at the split
    /// pointer if the trigger policy calls for it.
    ///
    /// At most one split is performed per insert.
    ///
    /// Returns [`Error::InvalidKey`] without modifying the index if `key` is
    /// not a finite integer.
    pub fn insert(&mut self, key: K) -> Result<()> {
        let integer = match key.to_integer() {
            Some(integer) => integer,
            None => {
                warn!(?key, "rejected key without an integer form");

                return Err(Error::InvalidKey(format!("{:?}", key)));
            }
        };

        let index = self.round.address(integer);
        self.buckets[index].insert(key);
        self.len += 1;

        if self
            .controller
            .should_split(&self.buckets[index], self.load_factor())
        {
            self.controller
                .split(&mut self.buckets, &mut self.round, self.capacity);
        }

        Ok(())
    }

    /// Inserts every key from `keys` in order, stopping at the first invalid
    /// key. Keys before it remain inserted.
    pub fn insert_all<I: IntoIterator<Item = K>>(&mut self, keys: I) -> Result<()> {
        keys.into_iter().try_for_each(|key| self.insert(key))
    }

    /// Returns `true` if at least one occurrence of `key` is stored.
    pub fn search(&self, key: &K) -> bool {
        match key.to_integer() {
            Some(integer) => self.buckets[self.round.address(integer)].search(key),
            None => false,
        }
    }

    /// Removes one occurrence of `key`, returning `true` if one was stored.
    ///
    /// Buckets never shrink: overflow segments emptied by removal stay
    /// chained until their bucket is split.
    pub fn remove(&mut self, key: &K) -> bool {
        let integer = match key.to_integer() {
            Some(integer) => integer,
            None => return false,
        };

        let index = self.round.address(integer);

        if self.buckets[index].remove(key) {
            self.len -= 1;

            true
        } else {
            false
        }
    }

    /// Captures the level, split pointer and every bucket's contents.
    pub fn snapshot(&self) -> IndexSnapshot<K> {
        IndexSnapshot {
            n: self.round.n,
            level: self.round.level,
            next: self.round.next,
            capacity: self.capacity,
            total_entries: self.len,
            load_factor: self.load_factor(),
            buckets: self
                .buckets
                .iter()
                .enumerate()
                .map(|(i, b)| BucketSnapshot::capture(b, i == self.round.next))
                .collect(),
        }
    }

    /// Index of the bucket `key` is stored in, or [`None`] if `key` has no
    /// integer form.
    ///
    /// [`None`]: https://doc.rust-lang.org/std/option/enum.Option.html#variant.None
    pub fn address_of(&self, key: &K) -> Option<usize> {
        key.to_integer().map(|integer| self.round.address(integer))
    }
}

impl<K: IndexKey> Default for LinearHashIndex<K> {
    fn default() -> Self {
        LinearHashIndex::new()
    }
}

fn invalid_snapshot(message: String) -> Error {
    Error::InvalidSnapshot(message)
}
