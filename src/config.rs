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

//! Construction configuration.

use crate::{
    error::{ConfigError, Result},
    split::TriggerPolicy,
};

use serde::{Deserialize, Serialize};

/// Initial bucket count used by [`Config::default`].
pub const DEFAULT_INITIAL_BUCKETS: usize = 2;

/// Per-bucket primary capacity used by [`Config::default`].
pub const DEFAULT_CAPACITY: usize = 4;

/// Options fixed when a [`LinearHashIndex`](crate::LinearHashIndex) is built.
///
/// All options are checked by [`validate`](#method.validate) before any
/// bucket is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of buckets at level 0. Must be a positive power of two.
    pub initial_buckets: usize,
    /// Keys held by each bucket segment. Must be positive.
    pub capacity: usize,
    /// When a split is performed.
    pub trigger: TriggerPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
            capacity: DEFAULT_CAPACITY,
            trigger: TriggerPolicy::default(),
        }
    }
}

impl Config {
    pub fn with_initial_buckets(mut self, initial_buckets: usize) -> Self {
        self.initial_buckets = initial_buckets;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_trigger(mut self, trigger: TriggerPolicy) -> Self {
        self.trigger = trigger;
        self
    }

    /// Checks every option, returning the first one that is out of range.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_buckets.is_power_of_two() {
            return Err(ConfigError::BucketCount(self.initial_buckets).into());
        }

        if self.capacity == 0 {
            return Err(ConfigError::Capacity(self.capacity).into());
        }

        if let TriggerPolicy::OnLoadFactor { threshold } = self.trigger {
            if !(threshold > 0.0 && threshold < 1.0) {
                return Err(ConfigError::LoadThreshold(threshold).into());
            }
        }

        Ok(())
    }
}
