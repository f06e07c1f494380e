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

use crate::{
    index::tests::util::{assert_invariants, counts},
    Config, LinearHashIndex, TriggerPolicy,
};

use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(i64),
    Remove(i64),
    Search(i64),
}

fn key_strategy() -> impl Strategy<Value = i64> + Clone {
    // a narrow range produces duplicates and long overflow chains
    prop_oneof![
        8 => -64i64..256,
        1 => any::<i64>(),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => key.clone().prop_map(Op::Insert),
        25 => key.clone().prop_map(Op::Remove),
        25 => key.prop_map(Op::Search),
    ];
    prop::collection::vec(op, 0..=600)
}

fn config_strategy() -> impl Strategy<Value = Config> {
    let trigger = prop_oneof![
        Just(TriggerPolicy::OnOverflow),
        (0.05f64..0.95).prop_map(|threshold| TriggerPolicy::OnLoadFactor { threshold }),
    ];

    let capacity = prop_oneof![
        8 => 1usize..6,
        1 => Just(usize::MAX),
        1 => (usize::MAX / 4)..usize::MAX,
    ];

    (0u32..4, capacity, trigger).prop_map(|(shift, capacity, trigger)| Config {
        initial_buckets: 1 << shift,
        capacity,
        trigger,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_multiset_equivalence(config in config_strategy(), ops in ops_strategy()) {
        let mut index = LinearHashIndex::with_config(config).unwrap();
        let mut model: HashMap<i64, usize> = HashMap::new();

        for op in ops {
            let bucket_count = index.bucket_count();

            match op {
                Op::Insert(key) => {
                    prop_assert!(index.insert(key).is_ok());
                    *model.entry(key).or_insert(0) += 1;

                    prop_assert!(index.bucket_count() - bucket_count <= 1);
                    prop_assert!(index.search(&key));
                }
                Op::Remove(key) => {
                    let expected = match model.get_mut(&key) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                model.remove(&key);
                            }
                            true
                        }
                        None => false,
                    };

                    prop_assert_eq!(index.remove(&key), expected);
                    prop_assert_eq!(index.search(&key), model.contains_key(&key));
                    prop_assert_eq!(index.bucket_count(), bucket_count);
                }
                Op::Search(key) => {
                    prop_assert_eq!(index.search(&key), model.contains_key(&key));
                }
            }

            assert_invariants(&index);
        }

        prop_assert_eq!(index.len(), model.values().sum::<usize>());
        prop_assert_eq!(counts(&index), model);
    }

    #[test]
    fn prop_snapshot_restores(config in config_strategy(), keys in prop::collection::vec(key_strategy(), 0..300)) {
        let mut index = LinearHashIndex::with_config(config).unwrap();
        index.insert_all(keys.iter().copied()).unwrap();

        let restored = LinearHashIndex::from_snapshot(config, index.snapshot()).unwrap();

        assert_invariants(&restored);
        prop_assert_eq!(restored.snapshot(), index.snapshot());
    }
}
