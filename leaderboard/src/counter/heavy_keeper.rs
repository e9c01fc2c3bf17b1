// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! HeavyKeeper top-K sketch.
//!
//! Based on ["HeavyKeeper: An Accurate Algorithm for Finding Top-k Elephant
//! Flows"](https://www.usenix.org/conference/atc18/presentation/gong) by Junzhi Gong, Tong Yang,
//! Haowei Zhang, Hao Li, Steve Uhlig, Shigang Chen, Lorna Uden and Xiaoming Li.
//!
//! The sketch is a `depth x width` array of buckets, each holding a key fingerprint and a
//! count. A key maps to one bucket per row. When the bucket belongs to another key, that key's
//! count is decremented with probability `decay^count`, so large counts are hard to evict while
//! small ones are recycled quickly. Counts are never overestimated unless two keys share a
//! 64-bit fingerprint.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::counter::Counter;
use crate::counter::ranked_from;
use crate::list::TopList;

const FINGERPRINT_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    fingerprint: u64,
    count: u64,
}

/// HeavyKeeper sketch tracking the K keys with the largest estimated counts.
///
/// # Examples
///
/// ```
/// # use leaderboard::counter::HeavyKeeper;
/// let mut sketch = HeavyKeeper::new(10, 2048, 5, 0.9, 9001);
/// sketch.update("2631623");
/// sketch.update("2631623");
/// assert_eq!(sketch.estimate("2631623"), 2);
/// assert_eq!(sketch.estimate("missing"), 0);
/// ```
#[derive(Debug, Clone)]
pub struct HeavyKeeper {
    width: usize,
    depth: usize,
    decay: f64,
    seed: u64,
    buckets: Vec<Bucket>,
    candidates: Candidates,
    rng: StdRng,
    total_weight: u64,
}

impl HeavyKeeper {
    /// Creates a sketch that keeps the top `k` keys.
    ///
    /// `seed` drives both the bucket hashing (XXH3) and the decay coin, so two sketches built
    /// with the same arguments and fed the same stream report the same ranking, on any
    /// platform and toolchain.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `depth` is zero, or if `decay` is not in `(0, 1]`.
    pub fn new(k: usize, width: usize, depth: usize, decay: f64, seed: u64) -> Self {
        assert!(width >= 1, "width must be at least 1");
        assert!(depth >= 1, "depth must be at least 1");
        assert!(
            decay > 0.0 && decay <= 1.0,
            "decay must be in (0, 1], got {decay}"
        );
        Self {
            width,
            depth,
            decay,
            seed,
            buckets: vec![Bucket::default(); width * depth],
            candidates: Candidates::new(k),
            rng: StdRng::seed_from_u64(seed),
            total_weight: 0,
        }
    }

    /// Returns the number of keys the sketch ranks.
    pub fn k(&self) -> usize {
        self.candidates.capacity
    }

    /// Returns the number of buckets per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the decay base.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Returns the seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns true if the sketch has not seen any key.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Returns the number of observed keys, counting repetitions.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the estimated count for `key`.
    ///
    /// This is the largest count among the buckets that still carry the key's fingerprint,
    /// or zero if every bucket has been taken over by other keys.
    pub fn estimate(&self, key: &str) -> u64 {
        let fingerprint = self.hash(key, FINGERPRINT_SALT);
        (0..self.depth)
            .map(|row| &self.buckets[self.bucket_index(key, row)])
            .filter(|bucket| bucket.count > 0 && bucket.fingerprint == fingerprint)
            .map(|bucket| bucket.count)
            .max()
            .unwrap_or(0)
    }

    /// Updates the sketch with one occurrence of `key`.
    pub fn update(&mut self, key: &str) {
        self.total_weight += 1;
        let fingerprint = self.hash(key, FINGERPRINT_SALT);
        let mut max_count = 0;
        for row in 0..self.depth {
            let index = self.bucket_index(key, row);
            let bucket = &mut self.buckets[index];
            if bucket.count == 0 {
                bucket.fingerprint = fingerprint;
                bucket.count = 1;
            } else if bucket.fingerprint == fingerprint {
                bucket.count += 1;
            } else {
                let probability = self.decay.powf(bucket.count as f64);
                if self.rng.random::<f64>() < probability {
                    bucket.count -= 1;
                    if bucket.count == 0 {
                        bucket.fingerprint = fingerprint;
                        bucket.count = 1;
                    }
                }
                if bucket.fingerprint != fingerprint {
                    continue;
                }
            }
            max_count = max_count.max(bucket.count);
        }
        self.candidates.offer(key, max_count);
    }

    fn bucket_index(&self, key: &str, row: usize) -> usize {
        let column = self.hash(key, row as u64) % self.width as u64;
        row * self.width + column as usize
    }

    fn hash(&self, key: &str, salt: u64) -> u64 {
        xxh3_64_with_seed(key.as_bytes(), self.seed ^ salt)
    }
}

impl Counter for HeavyKeeper {
    fn observe(&mut self, key: &str) {
        self.update(key);
    }

    fn barrier(&mut self) {}

    fn ranked(&self, k: usize) -> TopList {
        ranked_from(
            self.candidates
                .counts
                .iter()
                .map(|(key, count)| (key.as_str(), *count)),
            k,
        )
    }
}

/// Bounded set of the current top keys, ordered so the weakest candidate is first.
#[derive(Debug, Clone)]
struct Candidates {
    capacity: usize,
    counts: HashMap<String, u64>,
    // Among equal counts the largest key ranks last, so it is evicted first.
    order: BTreeSet<(u64, Reverse<String>)>,
}

impl Candidates {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            counts: HashMap::with_capacity(capacity),
            order: BTreeSet::new(),
        }
    }

    fn offer(&mut self, key: &str, count: u64) {
        if self.capacity == 0 || count == 0 {
            return;
        }
        if let Some(current) = self.counts.get_mut(key) {
            if count > *current {
                self.order.remove(&(*current, Reverse(key.to_string())));
                self.order.insert((count, Reverse(key.to_string())));
                *current = count;
            }
            return;
        }
        if self.counts.len() >= self.capacity {
            match self.order.first() {
                Some((min, _)) if count > *min => {}
                _ => return,
            }
            if let Some((_, Reverse(evicted))) = self.order.pop_first() {
                self.counts.remove(&evicted);
            }
        }
        self.counts.insert(key.to_string(), count);
        self.order.insert((count, Reverse(key.to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Item;

    fn feed(sketch: &mut HeavyKeeper, keys: &[&str]) {
        for key in keys {
            sketch.observe(key);
        }
        sketch.barrier();
    }

    #[test]
    fn test_new_defaults() {
        let sketch = HeavyKeeper::new(3, 2048, 5, 0.9, 9001);
        assert_eq!(sketch.k(), 3);
        assert_eq!(sketch.width(), 2048);
        assert_eq!(sketch.depth(), 5);
        assert_eq!(sketch.decay(), 0.9);
        assert_eq!(sketch.seed(), 9001);
        assert!(sketch.is_empty());
        assert!(sketch.ranked(3).is_empty());
    }

    #[test]
    fn test_small_stream_is_exact() {
        let mut sketch = HeavyKeeper::new(3, 2048, 5, 0.9, 9001);
        feed(
            &mut sketch,
            &["8422699", "2631623", "2631623", "2631623", "5954907", "8422699"],
        );
        assert_eq!(sketch.total_weight(), 6);
        assert_eq!(
            sketch.ranked(3).items(),
            &[
                Item::new("2631623", 3),
                Item::new("8422699", 2),
                Item::new("5954907", 1),
            ]
        );
    }

    #[test]
    fn test_fewer_keys_than_k() {
        let mut sketch = HeavyKeeper::new(10, 64, 3, 0.9, 1);
        feed(&mut sketch, &["a", "b", "a"]);
        assert_eq!(sketch.ranked(10).len(), 2);
    }

    #[test]
    fn test_zero_k_tracks_nothing() {
        let mut sketch = HeavyKeeper::new(0, 64, 3, 0.9, 1);
        feed(&mut sketch, &["a", "b", "a"]);
        assert!(sketch.ranked(0).is_empty());
        assert_eq!(sketch.estimate("a"), 2);
    }

    #[test]
    fn test_weaker_candidate_is_evicted() {
        let mut sketch = HeavyKeeper::new(2, 2048, 5, 0.9, 9001);
        feed(&mut sketch, &["a", "b", "c", "c", "a", "a"]);
        let top = sketch.ranked(2);
        assert_eq!(top.items(), &[Item::new("a", 3), Item::new("c", 2)]);
    }

    #[test]
    fn test_heavy_hitters_survive_noise() {
        let hot = ["hot-0", "hot-1", "hot-2", "hot-3", "hot-4"];
        let mut sketch = HeavyKeeper::new(hot.len(), 64, 4, 0.9, 42);
        for i in 0..5000 {
            sketch.observe(&format!("noise-{i}"));
            if i % 5 == 0 {
                for key in hot {
                    sketch.observe(key);
                }
            }
        }
        sketch.barrier();

        let top = sketch.ranked(hot.len());
        let mut keys: Vec<_> = top.iter().map(Item::key).collect();
        keys.sort_unstable();
        assert_eq!(keys, hot);
        for item in &top {
            assert!(item.count() <= 1000, "{item:?} overestimated");
            assert!(item.count() > 500, "{item:?} underestimated");
        }
    }

    #[test]
    fn test_hash_is_xxh3() {
        // XXH3-64 of the empty input with seed 0.
        let sketch = HeavyKeeper::new(1, 16, 1, 0.9, 0);
        assert_eq!(sketch.hash("", 0), 0x2d06_8005_38d3_94c2);
        assert_eq!(sketch.bucket_index("", 0), 2);
    }

    #[test]
    fn test_same_seed_same_ranking() {
        let run = || {
            let mut sketch = HeavyKeeper::new(5, 16, 2, 0.9, 7);
            for i in 0..2000u64 {
                sketch.observe(&format!("key-{}", (i * i) % 37));
            }
            sketch.barrier();
            sketch.ranked(5)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_never_overestimates() {
        let mut sketch = HeavyKeeper::new(4, 8, 2, 0.9, 3);
        let mut truth = HashMap::new();
        for i in 0..500u64 {
            let key = format!("k{}", i % 23);
            *truth.entry(key.clone()).or_insert(0u64) += 1;
            sketch.observe(&key);
        }
        for (key, count) in &truth {
            assert!(sketch.estimate(key) <= *count);
        }
    }

    #[test]
    #[should_panic(expected = "width must be at least 1")]
    fn test_invalid_width() {
        HeavyKeeper::new(1, 0, 5, 0.9, 1);
    }

    #[test]
    #[should_panic(expected = "depth must be at least 1")]
    fn test_invalid_depth() {
        HeavyKeeper::new(1, 16, 0, 0.9, 1);
    }

    #[test]
    #[should_panic(expected = "decay must be in (0, 1]")]
    fn test_invalid_decay() {
        HeavyKeeper::new(1, 16, 2, 1.5, 1);
    }
}
