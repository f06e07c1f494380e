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

//! Keys accepted by the index.
//!
//! A key is both the stored payload and the hash input. Linear hashing
//! addresses buckets by taking the key modulo the current table width, so only
//! values with an exact integer representation can be stored.

use std::fmt::Debug;

/// A value that can be stored in a [`LinearHashIndex`].
///
/// [`to_integer`] returns the integer used for addressing, or [`None`] if the
/// value is not a finite integer that fits in an `i64`. Keys for which it
/// returns [`None`] are rejected by [`insert`] and are never found by
/// [`search`] or [`remove`].
///
/// Equality on the implementing type decides which stored occurrence
/// [`search`] and [`remove`] match.
///
/// [`LinearHashIndex`]: crate::LinearHashIndex
/// [`to_integer`]: #tymethod.to_integer
/// [`insert`]: crate::LinearHashIndex::insert
/// [`search`]: crate::LinearHashIndex::search
/// [`remove`]: crate::LinearHashIndex::remove
/// [`None`]: https://doc.rust-lang.org/std/option/enum.Option.html#variant.None
pub trait IndexKey: Copy + PartialEq + Debug {
    fn to_integer(&self) -> Option<i64>;
}

macro_rules! impl_lossless {
    ($($t:ty),*) => {
        $(
            impl IndexKey for $t {
                #[inline]
                fn to_integer(&self) -> Option<i64> {
                    Some(i64::from(*self))
                }
            }
        )*
    };
}

impl_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl IndexKey for u64 {
    #[inline]
    fn to_integer(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl IndexKey for isize {
    #[inline]
    fn to_integer(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl IndexKey for usize {
    #[inline]
    fn to_integer(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

// i64::MAX is not exactly representable as a float; 2^63 is the first value
// out of range.
const F64_I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

impl IndexKey for f64 {
    fn to_integer(&self) -> Option<i64> {
        let value = *self;

        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }

        if value < -F64_I64_UPPER || value >= F64_I64_UPPER {
            return None;
        }

        Some(value as i64)
    }
}

impl IndexKey for f32 {
    #[inline]
    fn to_integer(&self) -> Option<i64> {
        f64::from(*self).to_integer()
    }
}
