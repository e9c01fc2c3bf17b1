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

//! Row sources.
//!
//! A row source is any iterator of `Result<Record, Error>`: `None` is the end of data,
//! `Some(Err(_))` is a decode or I/O failure. [`CsvRows`] is the source used for files.
//!
//! No header handling is done. A header line is yielded like any other record.

use std::io;

use csv::ReaderBuilder;
use csv::StringRecordsIntoIter;

use crate::error::Error;

/// One decoded row: an ordered sequence of text fields.
pub type Record = csv::StringRecord;

/// Lazily decodes comma-separated records from a reader.
///
/// Every record must have the same number of fields as the first one; a ragged record
/// is reported as [`crate::error::ErrorKind::InvalidData`].
pub struct CsvRows<R> {
    records: StringRecordsIntoIter<R>,
}

impl<R: io::Read> CsvRows<R> {
    /// Creates a row source over `reader`.
    pub fn new(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(reader);
        Self {
            records: reader.into_records(),
        }
    }
}

impl<R: io::Read> Iterator for CsvRows<R> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|r| r.map_err(Error::from))
    }
}

/// Returns field `index` of `record`, failing if the row is too short.
pub(crate) fn field(record: &Record, index: usize, row: u64) -> Result<&str, Error> {
    record
        .get(index)
        .ok_or_else(|| Error::column_out_of_range(index, record.len()).with_context("row", row))
}
