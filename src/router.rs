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

//! Bucket addressing.
//!
//! At level `l` with `n` initial buckets the table is `n << l` buckets wide,
//! plus the `next` buckets appended by splits in the current round. A key's
//! coarse address is `key mod (n << l)`. Buckets below the split pointer have
//! already been split this round, so keys that land there are re-addressed with
//! the finer `key mod (n << (l + 1))`, which selects either the original bucket
//! or its image at `candidate + (n << l)`.

/// Number of buckets addressable by the coarse hash at `level`.
#[inline]
pub fn width(level: u32, n: usize) -> usize {
    n << level
}

/// `key mod (n << level)`, always in `[0, n << level)`.
#[inline]
pub fn hash(key: i64, level: u32, n: usize) -> usize {
    let modulus = width(level, n) as i128;

    i128::from(key).rem_euclid(modulus) as usize
}

/// Returns the index of the bucket that holds `key`.
#[inline]
pub fn address(key: i64, level: u32, next: usize, n: usize) -> usize {
    let candidate = hash(key, level, n);

    if candidate < next {
        hash(key, level + 1, n)
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coarse_hash_above_split_pointer() {
        assert_eq!(address(10, 0, 0, 2), 0);
        assert_eq!(address(11, 0, 0, 2), 1);
        assert_eq!(address(11, 0, 1, 2), 1);
        assert_eq!(address(14, 1, 1, 2), 2);
    }

    #[test]
    fn fine_hash_below_split_pointer() {
        // bucket 0 has split into 0 and 2
        assert_eq!(address(10, 0, 1, 2), 2);
        assert_eq!(address(20, 0, 1, 2), 0);
        assert_eq!(address(30, 0, 1, 2), 2);
    }

    #[test]
    fn negative_keys_stay_in_range() {
        assert_eq!(hash(-1, 0, 4), 3);
        assert_eq!(hash(-8, 1, 4), 0);
        assert_eq!(hash(i64::MIN, 0, 2), 0);
        assert_eq!(address(-3, 0, 2, 4), 5);
        assert_eq!(address(-4, 0, 1, 4), 4);
    }

    #[test]
    fn address_within_bucket_count() {
        for level in 0..4 {
            for next in 0..width(level, 2) {
                let count = width(level, 2) + next;

                for key in -100..100 {
                    assert!(address(key, level, next, 2) < count);
                }
            }
        }
    }
}
