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

//! Error types for index construction and mutation.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`LinearHashIndex`](crate::LinearHashIndex).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The construction configuration was rejected. No index was created.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The key is not a finite integer. The index was not modified.
    #[error("invalid key: {0} is not a finite integer")]
    InvalidKey(String),

    /// A snapshot could not be restored because it violates an index
    /// invariant.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// The configuration option that failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial bucket count must be a positive power of two, got {0}")]
    BucketCount(usize),

    #[error("bucket capacity must be positive, got {0}")]
    Capacity(usize),

    #[error("load threshold must lie in the open interval (0, 1), got {0}")]
    LoadThreshold(f64),
}
