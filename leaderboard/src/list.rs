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

//! Ranked leaderboard entries and their text rendering.

use std::io::Write;

use crate::error::Error;

/// A single leaderboard entry.
///
/// The key starts out as the raw entity id and is replaced by the display name once
/// the entity has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    key: String,
    count: u64,
}

impl Item {
    /// Creates an entry for `key` with the given (approximate) count.
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }

    /// Returns the entity id, or the display name after resolution.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the count reported by the counter.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.key.clear();
        self.key.push_str(name);
    }
}

/// Ordered list of at most K entries, highest count first.
///
/// The order is fixed by the counter that produced the list; nothing downstream sorts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopList {
    items: Vec<Item>,
}

impl TopList {
    /// Creates a list from already ranked entries.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the entries in rank order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Returns an iterator over the entries in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Writes one `key<TAB>count` line per entry and flushes the writer.
    ///
    /// The first failing write aborts; later entries are not written.
    pub fn write_results<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), Error> {
        for item in &self.items {
            writeln!(writer, "{}\t{}", item.key, item.count)?;
        }
        writer.flush()?;
        log::debug!("wrote {} leaderboard entries", self.items.len());
        Ok(())
    }
}

impl FromIterator<Item> for TopList {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TopList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for TopList {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::error::ErrorKind;

    /// Accepts `budget` writes, then fails every write and counts flushes.
    struct FlakyWriter {
        budget: usize,
        written: Vec<u8>,
        flushes: usize,
        fail_flush: bool,
    }

    impl FlakyWriter {
        fn new(budget: usize) -> Self {
            Self {
                budget,
                written: vec![],
                flushes: 0,
                fail_flush: false,
            }
        }
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("sink closed"));
            }
            self.budget -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            if self.fail_flush {
                return Err(io::Error::other("flush failed"));
            }
            Ok(())
        }
    }

    fn sample() -> TopList {
        TopList::new(vec![
            Item::new("onosendi", 3),
            Item::new("awesomekling", 2),
            Item::new("Apexal", 1),
        ])
    }

    #[test]
    fn test_write_results_tab_separated() {
        let mut out = Vec::new();
        sample().write_results(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "onosendi\t3\nawesomekling\t2\nApexal\t1\n"
        );
    }

    #[test]
    fn test_write_results_empty() {
        let mut out = FlakyWriter::new(0);
        TopList::default().write_results(&mut out).unwrap();
        assert!(out.written.is_empty());
        assert_eq!(out.flushes, 1);
    }

    #[test]
    fn test_write_error_stops_output() {
        // writeln! issues several writes per line; one write lets only a prefix through.
        let mut out = FlakyWriter::new(1);
        let err = sample().write_results(&mut out).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.message(), "sink closed");
        assert_eq!(out.written, b"onosendi");
        assert_eq!(out.flushes, 0);
    }

    #[test]
    fn test_flush_error_propagates() {
        let mut out = FlakyWriter::new(usize::MAX);
        out.fail_flush = true;
        let err = sample().write_results(&mut out).unwrap_err();
        assert_eq!(err.message(), "flush failed");
        assert_eq!(out.flushes, 1);
    }

    #[test]
    fn test_rename_keeps_count() {
        let mut item = Item::new("2631623", 3);
        item.rename("onosendi");
        assert_eq!(item, Item::new("onosendi", 3));
    }
}
