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

#![allow(dead_code)]

use std::io;

use leaderboard::config::Config;
use leaderboard::error::Error;
use leaderboard::rows::CsvRows;
use leaderboard::rows::Record;

pub const EVENTS: &str = "\
id,type,actor_id,repo_id
11185376329,PushEvent,8422699,224252202
11185376333,CreateEvent,8422699,231161852
11185376335,PushEvent,2631623,155254893
11185376336,PushEvent,2631623,231065965
11185376338,PushEvent,2631623,225080339
11185376339,PushEvent,5954907,160083795
11185376341,WatchEvent,5954907,221552739
11185376342,PushEvent,5954907,230923653
11185376343,PushEvent,5954907,107471694
11185376344,PushEvent,8422699,223831715
11185376344,PullRequestEvent,8422699,223831715";

pub const ACTORS: &str = "\
id,username
8422699,Apexal
53201765,ArturoCamacho0
2631623,onosendi
52553915,anggi1234
31390726,AdrianWilczynski
5954907,awesomekling
10052381,PercussiveElbow
30060991,m41na
8517910,LombiqBot";

/// Actor columns of the events file, resolved against the actors file.
pub fn actor_config(k: usize, event_types: &[&str]) -> Config {
    Config {
        k,
        events_entity_column: 2,
        events_event_type_column: 1,
        entity_id_column: 0,
        entity_name_column: 1,
        event_types: event_types.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn csv(text: &'static str) -> CsvRows<&'static [u8]> {
    CsvRows::new(text.as_bytes())
}

/// Yields the rows of `text`, then fails with `message` instead of ending.
pub fn csv_then_fail(
    text: &'static str,
    message: &'static str,
) -> impl Iterator<Item = Result<Record, Error>> {
    csv(text).chain(std::iter::once(Err(Error::from(io::Error::other(message)))))
}

/// A reader whose first read fails.
pub struct ErrReader(pub &'static str);

impl io::Read for ErrReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other(self.0))
    }
}

/// A writer that rejects every write.
pub struct ErrWriter(pub &'static str);

impl io::Write for ErrWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other(self.0))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
