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

use std::collections::HashMap;

use crate::counter::Counter;
use crate::counter::ranked_from;
use crate::list::TopList;

/// Exact counter keeping one tally per distinct key.
///
/// Memory grows with the number of distinct keys, so this is meant for tests and small
/// inputs where a deterministic, exact ranking is wanted.
#[derive(Debug, Clone, Default)]
pub struct ExactCounter {
    counts: HashMap<String, u64>,
    total_weight: u64,
}

impl ExactCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the exact count of `key`.
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Returns the number of observations.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the number of distinct keys observed.
    pub fn num_keys(&self) -> usize {
        self.counts.len()
    }
}

impl Counter for ExactCounter {
    fn observe(&mut self, key: &str) {
        self.total_weight += 1;
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
        } else {
            self.counts.insert(key.to_string(), 1);
        }
    }

    fn barrier(&mut self) {}

    fn ranked(&self, k: usize) -> TopList {
        ranked_from(
            self.counts.iter().map(|(key, count)| (key.as_str(), *count)),
            k,
        )
    }
}
