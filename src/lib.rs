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
//! [`LinearHashIndex`] is a hash index over integer keys that grows one bucket
//! at a time instead of rehashing the whole table at once. A split pointer
//! walks the table in order; each split divides the bucket under the pointer
//! into itself and a new bucket at the tail. Buckets that fill up before their
//! turn absorb the surplus in chained overflow segments.
//!
//! Whether an insert is followed by a split is decided by a [`TriggerPolicy`]:
//! either the bucket that received the key overflowed, or the table's load
//! factor rose above a threshold.
//!
//! ```
//! use linhash::{Config, LinearHashIndex, TriggerPolicy};
//!
//! let config = Config::default()
//!     .with_capacity(2)
//!     .with_trigger(TriggerPolicy::OnOverflow);
//! let mut index = LinearHashIndex::with_config(config)?;
//!
//! for key in [10, 20, 30, 40] {
//!     index.insert(key)?;
//! }
//!
//! assert_eq!(index.bucket_count(), 3);
//! assert!(index.search(&10));
//! assert!(!index.search(&99));
//! # Ok::<(), linhash::Error>(())
//! ```

pub mod bucket;
pub mod config;
pub mod error;
pub mod index;
pub mod key;
pub mod router;
pub mod snapshot;
pub mod split;

pub use bucket::Bucket;
pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use index::LinearHashIndex;
pub use key::IndexKey;
pub use snapshot::{BucketSnapshot, IndexSnapshot};
pub use split::{TriggerPolicy, DEFAULT_LOAD_THRESHOLD};

#[cfg(test)]
mod proptests;
