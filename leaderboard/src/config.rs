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

//! Run configuration.

/// Default leaderboard length.
pub const DEFAULT_K: usize = 10;

/// Default seed for the sketch's decay coin.
pub const DEFAULT_SEED: u64 = 9001;

/// Column layout and filters for a single leaderboard run.
///
/// Column indices are not validated here. An index that is out of range for a row
/// fails the run when that row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries in the leaderboard.
    pub k: usize,
    /// Column of the events file holding the counted entity id.
    pub events_entity_column: usize,
    /// Column of the events file holding the event type.
    pub events_event_type_column: usize,
    /// Column of the entity file holding the entity id.
    pub entity_id_column: usize,
    /// Column of the entity file holding the display name.
    pub entity_name_column: usize,
    /// Event types that are counted. A row matching any of them counts once.
    pub event_types: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            events_entity_column: 2,
            events_event_type_column: 1,
            entity_id_column: 0,
            entity_name_column: 1,
            event_types: vec!["PushEvent".to_string(), "PullRequestEvent".to_string()],
        }
    }
}

/// Accuracy, memory and determinism knobs of the HeavyKeeper counter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchConfig {
    /// Number of threads applying observations.
    ///
    /// With more than one worker the order in which observations reach the sketch
    /// depends on scheduling, so rankings may differ between runs over the same input.
    /// Keep this at 1 for reproducible reports.
    pub workers: usize,
    /// Buckets per row.
    pub width: usize,
    /// Number of rows.
    pub depth: usize,
    /// Base of the exponential decay probability, in `(0, 1]`.
    pub decay: f64,
    /// Seed of the decay coin.
    pub seed: u64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            width: 2048,
            depth: 5,
            decay: 0.9,
            seed: DEFAULT_SEED,
        }
    }
}
