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

//! First pass: filter event rows and count entity ids.

use crate::config::Config;
use crate::counter::Counter;
use crate::error::Error;
use crate::list::TopList;
use crate::rows::Record;
use crate::rows::field;

/// Counts the entity id of every event row whose type is in `config.event_types` and
/// returns the top `config.k` ids.
///
/// A row is counted at most once, even if several configured types equal its type.
/// Rows are only inspected while the allow-set is non-empty, so an empty allow-set never
/// touches the type column.
///
/// The first row error aborts the pass; the counter's partial state is discarded.
pub fn count_events<I, C>(rows: I, config: &Config, counter: &mut C) -> Result<TopList, Error>
where
    I: IntoIterator<Item = Result<Record, Error>>,
    C: Counter + ?Sized,
{
    let mut num_rows = 0u64;
    let mut num_matched = 0u64;
    for record in rows {
        let record = record?;
        num_rows += 1;
        if is_allowed(&record, config, num_rows)? {
            counter.observe(field(&record, config.events_entity_column, num_rows)?);
            num_matched += 1;
        }
    }
    log::debug!("counted {num_matched} of {num_rows} event rows");

    counter.barrier();
    let list = counter.ranked(config.k);
    log::debug!("ranked {} of at most {} entries", list.len(), config.k);
    Ok(list)
}

fn is_allowed(record: &Record, config: &Config, row: u64) -> Result<bool, Error> {
    if config.event_types.is_empty() {
        return Ok(false);
    }
    let event_type = field(record, config.events_event_type_column, row)?;
    Ok(config.event_types.iter().any(|allowed| allowed == event_type))
}
