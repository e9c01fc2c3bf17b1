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

//! The leaderboard application: count, resolve, render.

use std::io;

use crate::config::Config;
use crate::counter::Counter;
use crate::driver::count_events;
use crate::error::Error;
use crate::resolve::resolve_names;
use crate::rows::CsvRows;
use crate::rows::Record;

/// A runnable report.
pub trait App {
    /// Runs the report to completion or to the first error.
    fn run(self) -> Result<(), Error>;
}

/// Leaderboard over an event source, resolved against an entity source.
///
/// [`App::run`] performs three steps, stopping at the first error and returning it as is:
///
/// 1. count the entity ids of allowed events and take the top `k`;
/// 2. replace ids with names from the entity rows;
/// 3. write `name<TAB>count` lines to the writer and flush it.
pub struct Leaderboard<C, E, N, W> {
    config: Config,
    counter: C,
    events: E,
    entities: N,
    writer: W,
}

impl<C, E, N, W> Leaderboard<C, E, N, W>
where
    C: Counter,
    E: IntoIterator<Item = Result<Record, Error>>,
    N: IntoIterator<Item = Result<Record, Error>>,
    W: io::Write,
{
    /// Creates a leaderboard over arbitrary row sources.
    pub fn new(config: Config, counter: C, events: E, entities: N, writer: W) -> Self {
        Self {
            config,
            counter,
            events,
            entities,
            writer,
        }
    }
}

impl<C, RE, RN, W> Leaderboard<C, CsvRows<RE>, CsvRows<RN>, W>
where
    C: Counter,
    RE: io::Read,
    RN: io::Read,
    W: io::Write,
{
    /// Creates a leaderboard reading comma-separated events and entities.
    pub fn from_csv(config: Config, counter: C, events: RE, entities: RN, writer: W) -> Self {
        Self::new(
            config,
            counter,
            CsvRows::new(events),
            CsvRows::new(entities),
            writer,
        )
    }
}

impl<C, E, N, W> App for Leaderboard<C, E, N, W>
where
    C: Counter,
    E: IntoIterator<Item = Result<Record, Error>>,
    N: IntoIterator<Item = Result<Record, Error>>,
    W: io::Write,
{
    fn run(self) -> Result<(), Error> {
        let Self {
            config,
            mut counter,
            events,
            entities,
            mut writer,
        } = self;

        let ids = count_events(events, &config, &mut counter)?;
        let names = resolve_names(ids, entities, &config)?;
        names.write_results(&mut writer)
    }
}
