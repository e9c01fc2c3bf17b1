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

//! Approximate top-K leaderboards over event logs.
//!
//! A leaderboard is built in two passes. The first pass filters an event log by event type
//! and feeds the entity id of each kept row into a [`counter::Counter`], normally the
//! [`counter::HeavyKeeper`] sketch. The second pass reads an entity file and replaces the
//! winning ids with display names, stopping as soon as every winner is named. The result is
//! written as `name<TAB>count` lines.
//!
//! # Examples
//!
//! ```
//! # use leaderboard::app::App;
//! # use leaderboard::app::Leaderboard;
//! # use leaderboard::config::Config;
//! # use leaderboard::counter::ExactCounter;
//! let events = "1,PushEvent,42\n2,PushEvent,42\n3,WatchEvent,7\n4,PullRequestEvent,7\n";
//! let actors = "42,alice\n7,bob\n";
//!
//! let mut out = Vec::new();
//! Leaderboard::from_csv(
//!     Config::default(),
//!     ExactCounter::new(),
//!     events.as_bytes(),
//!     actors.as_bytes(),
//!     &mut out,
//! )
//! .run()
//! .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "alice\t2\nbob\t1\n");
//! ```

pub mod app;
pub mod config;
pub mod counter;
pub mod driver;
pub mod error;
pub mod list;
pub mod resolve;
pub mod rows;
