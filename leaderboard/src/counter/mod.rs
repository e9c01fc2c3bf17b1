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

//! Frequency counters that rank the most observed keys.
//!
//! # Overview
//!
//! A [`Counter`] accepts keys one at a time and, after [`Counter::barrier`], reports the
//! K keys with the highest counts. The leaderboard pipeline only depends on this trait,
//! so the counting strategy can be swapped without touching the pipeline:
//!
//! * [`HeavyKeeper`] is the approximate top-K sketch used for real event logs. Memory is
//!   bounded by `width * depth` buckets plus a heap of K candidates, independent of the
//!   number of distinct keys.
//! * [`ExactCounter`] keeps one counter per distinct key. It is exact and deterministic,
//!   which makes it convenient for tests and small inputs.
//! * [`Workers`] applies observations to another counter from a pool of threads.
//!
//! All counters rank by count descending and break ties by key ascending.
//!
//! # Examples
//!
//! ```
//! # use leaderboard::counter::Counter;
//! # use leaderboard::counter::HeavyKeeper;
//! let mut sketch = HeavyKeeper::new(2, 64, 4, 0.9, 7);
//! for key in ["a", "b", "a", "c", "a", "b"] {
//!     sketch.observe(key);
//! }
//! sketch.barrier();
//! let top = sketch.ranked(2);
//! assert_eq!(top.items()[0].key(), "a");
//! assert_eq!(top.items()[0].count(), 3);
//! assert_eq!(top.items()[1].key(), "b");
//! ```

mod exact;
mod heavy_keeper;
mod workers;

pub use self::exact::ExactCounter;
pub use self::heavy_keeper::HeavyKeeper;
pub use self::workers::Workers;

use std::cmp::Ordering;

use crate::config::SketchConfig;
use crate::list::Item;
use crate::list::TopList;

/// A frequency counter that can report its top-ranked keys.
pub trait Counter {
    /// Records one occurrence of `key`.
    ///
    /// Implementations may apply the observation asynchronously; it is only guaranteed
    /// to be reflected in [`Counter::ranked`] after [`Counter::barrier`] returns.
    fn observe(&mut self, key: &str);

    /// Waits until every submitted observation has been applied.
    fn barrier(&mut self);

    /// Returns at most `k` entries, highest count first.
    ///
    /// Fewer than `k` entries are returned when fewer distinct keys are tracked.
    fn ranked(&self, k: usize) -> TopList;
}

impl<C: Counter + ?Sized> Counter for Box<C> {
    fn observe(&mut self, key: &str) {
        (**self).observe(key)
    }

    fn barrier(&mut self) {
        (**self).barrier()
    }

    fn ranked(&self, k: usize) -> TopList {
        (**self).ranked(k)
    }
}

/// Builds the HeavyKeeper counter described by `config` for a leaderboard of `k` entries.
///
/// One worker applies observations inline. More workers run on a thread pool, which
/// gives up run-to-run reproducibility of the ranking.
///
/// # Panics
///
/// Panics if `config.workers` is zero or the sketch dimensions are invalid.
pub fn build_counter(k: usize, config: &SketchConfig) -> Box<dyn Counter + Send> {
    assert!(config.workers >= 1, "workers must be at least 1");
    let sketch = HeavyKeeper::new(k, config.width, config.depth, config.decay, config.seed);
    if config.workers == 1 {
        Box::new(sketch)
    } else {
        log::warn!(
            "running {} sketch workers; rankings may vary between runs",
            config.workers
        );
        Box::new(Workers::new(sketch, config.workers))
    }
}

/// Orders `(key, count)` pairs by count descending, then key ascending.
fn rank_order(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

fn ranked_from<'a>(entries: impl Iterator<Item = (&'a str, u64)>, k: usize) -> TopList {
    let mut entries: Vec<(&str, u64)> = entries.collect();
    entries.sort_by(|a, b| rank_order(*a, *b));
    entries
        .into_iter()
        .take(k)
        .map(|(key, count)| Item::new(key, count))
        .collect()
}
