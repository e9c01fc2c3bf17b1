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

//! Second pass: replace entity ids with display names.

use crate::config::Config;
use crate::error::Error;
use crate::list::TopList;
use crate::rows::Record;
use crate::rows::field;

/// Renames the entries of `list` using the entity rows.
///
/// Each row's id is compared with the entries that are still unresolved, in rank order; the
/// first equal entry takes the row's name. Reading stops as soon as every entry has a name,
/// so an empty list reads nothing. Entries without a matching row keep their id.
///
/// The order of `list` is preserved.
pub fn resolve_names<I>(mut list: TopList, rows: I, config: &Config) -> Result<TopList, Error>
where
    I: IntoIterator<Item = Result<Record, Error>>,
{
    let mut resolved = vec![false; list.len()];
    let mut num_resolved = 0;
    let mut num_rows = 0u64;
    let mut rows = rows.into_iter();
    while num_resolved < list.len() {
        let Some(record) = rows.next() else {
            break;
        };
        let record = record?;
        num_rows += 1;

        let id = field(&record, config.entity_id_column, num_rows)?;
        let slot = list
            .iter()
            .zip(&resolved)
            .position(|(item, done)| !done && item.key() == id);
        if let Some(slot) = slot {
            let name = field(&record, config.entity_name_column, num_rows)?;
            list.items_mut()[slot].rename(name);
            resolved[slot] = true;
            num_resolved += 1;
        }
    }

    if num_resolved == list.len() {
        log::debug!("resolved all {num_resolved} entries after {num_rows} entity rows");
    } else {
        log::debug!(
            "resolved {num_resolved} of {} entries; entity rows exhausted after {num_rows}",
            list.len()
        );
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::list::Item;

    fn record(fields: &[&str]) -> Result<Record, Error> {
        Ok(Record::from(fields.to_vec()))
    }

    fn list(keys: &[(&str, u64)]) -> TopList {
        keys.iter().map(|(k, c)| Item::new(*k, *c)).collect()
    }

    #[test]
    fn test_resolves_in_place() {
        let rows = vec![
            record(&["id", "username"]),
            record(&["8422699", "Apexal"]),
            record(&["2631623", "onosendi"]),
        ];
        let named = resolve_names(
            list(&[("2631623", 3), ("8422699", 2)]),
            rows,
            &Config::default(),
        )
        .unwrap();
        assert_eq!(named, list(&[("onosendi", 3), ("Apexal", 2)]));
    }

    #[test]
    fn test_unresolved_keep_id() {
        let rows = vec![record(&["1", "one"])];
        let named = resolve_names(list(&[("2", 5), ("1", 4)]), rows, &Config::default()).unwrap();
        assert_eq!(named, list(&[("2", 5), ("one", 4)]));
    }

    #[test]
    fn test_stops_once_all_resolved() {
        // The trailing error is never read.
        let rows = vec![
            record(&["1", "one"]),
            Err(Error::new(ErrorKind::Io, "read past the end")),
        ];
        let named = resolve_names(list(&[("1", 1)]), rows, &Config::default()).unwrap();
        assert_eq!(named, list(&[("one", 1)]));
    }

    #[test]
    fn test_empty_list_reads_nothing() {
        let rows = vec![Err(Error::new(ErrorKind::Io, "should not be read"))];
        let named = resolve_names(TopList::default(), rows, &Config::default()).unwrap();
        assert!(named.is_empty());
    }

    #[test]
    fn test_resolved_entry_is_not_renamed_again() {
        // After "a" becomes "b", a row for id "b" must rename the unresolved "b" entry.
        let rows = vec![record(&["a", "b"]), record(&["b", "c"])];
        let named = resolve_names(list(&[("a", 2), ("b", 1)]), rows, &Config::default()).unwrap();
        assert_eq!(named, list(&[("b", 2), ("c", 1)]));
    }

    #[test]
    fn test_row_error_propagates() {
        let rows = vec![
            record(&["9", "nine"]),
            Err(Error::new(ErrorKind::InvalidData, "bad quote")),
        ];
        let err = resolve_names(list(&[("1", 1)]), rows, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(err.message(), "bad quote");
    }

    #[test]
    fn test_name_column_only_read_on_match() {
        let config = Config {
            entity_name_column: 5,
            ..Config::default()
        };
        let named = resolve_names(list(&[("1", 1)]), vec![record(&["2", "x"])], &config).unwrap();
        assert_eq!(named, list(&[("1", 1)]));

        let err = resolve_names(list(&[("1", 1)]), vec![record(&["1", "x"])], &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
