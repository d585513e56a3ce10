//! Precedence merge of curated and discovered gallery records.
//!
//! The curated list in `config.toml` is the authority: when a discovered file
//! has a curated entry, the curated entry is kept exactly as written and the
//! discovered one is dropped. Discovered data never fills in missing curated
//! fields.
//!
//! ```text
//! curated:    [/a.png "A"]
//! discovered: [/a.png, /b.png]
//! merged:     [/a.png "A", /b.png]
//! ```
//!
//! Order is insertion order: curated entries first, in the order declared,
//! then genuinely new discovered entries in discovery order.

use crate::types::ContentRecord;
use std::collections::HashMap;

/// Insertion-ordered map of records keyed by `file`.
#[derive(Debug, Default)]
struct RecordMap {
    records: Vec<ContentRecord>,
    index: HashMap<String, usize>,
}

impl RecordMap {
    /// Insert or overwrite. An overwritten key keeps its original position.
    fn insert(&mut self, record: ContentRecord) {
        match self.index.get(&record.file) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(record.file.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Insert only if the key is not present yet.
    fn insert_if_absent(&mut self, record: ContentRecord) {
        if !self.index.contains_key(&record.file) {
            self.insert(record);
        }
    }

    fn into_vec(self) -> Vec<ContentRecord> {
        self.records
    }
}

/// Merge `curated` with `discovered`, curated entries taking precedence.
///
/// Duplicate keys inside `curated` resolve last-write-wins: the later entry
/// replaces the earlier one at the earlier entry's position.
pub fn merge_records<C, D>(curated: C, discovered: D) -> Vec<ContentRecord>
where
    C: IntoIterator<Item = ContentRecord>,
    D: IntoIterator<Item = ContentRecord>,
{
    let mut map = RecordMap::default();
    for record in curated {
        map.insert(record);
    }
    for record in discovered {
        map.insert_if_absent(record);
    }
    map.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn curated_wins_and_new_records_append() {
        let merged = merge_records(
            vec![curated("/a.png", "A")],
            vec![ContentRecord::bare("/a.png"), ContentRecord::bare("/b.png")],
        );

        assert_eq!(
            merged,
            vec![curated("/a.png", "A"), ContentRecord::bare("/b.png")]
        );
    }

    #[test]
    fn curated_record_never_blended() {
        let full = ContentRecord {
            file: "/c.png".into(),
            title: Some("Cloud".into()),
            issuer: None,
            date: None,
        };
        let other = ContentRecord {
            file: "/c.png".into(),
            title: None,
            issuer: Some("Somebody".into()),
            date: Some("2024-01-01".into()),
        };

        let merged = merge_records(vec![full.clone()], vec![other]);
        assert_eq!(merged, vec![full]);
    }

    #[test]
    fn curated_order_preserved_then_discovery_order() {
        let merged = merge_records(
            vec![curated("/z.png", "Z"), curated("/m.png", "M")],
            vec![
                ContentRecord::bare("/b.png"),
                ContentRecord::bare("/m.png"),
                ContentRecord::bare("/a.png"),
            ],
        );

        assert_eq!(
            record_files(&merged),
            vec!["/z.png", "/m.png", "/b.png", "/a.png"]
        );
    }

    #[test]
    fn no_duplicate_keys_and_bounded_size() {
        let curated_list = vec![curated("/a.png", "A"), curated("/b.png", "B")];
        let discovered = vec![
            ContentRecord::bare("/b.png"),
            ContentRecord::bare("/c.png"),
            ContentRecord::bare("/c.png"),
        ];

        let merged = merge_records(curated_list.clone(), discovered.clone());
        let mut files = record_files(&merged);
        let before = files.len();
        files.sort();
        files.dedup();

        assert_eq!(files.len(), before);
        assert!(merged.len() <= curated_list.len() + discovered.len());
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn curated_duplicates_last_write_wins_in_first_position() {
        let merged = merge_records(
            vec![
                curated("/a.png", "First"),
                curated("/b.png", "B"),
                curated("/a.png", "Second"),
            ],
            Vec::new(),
        );

        assert_eq!(
            merged,
            vec![curated("/a.png", "Second"), curated("/b.png", "B")]
        );
    }

    #[test]
    fn empty_inputs() {
        assert!(merge_records(Vec::new(), Vec::new()).is_empty());

        let only_discovered = merge_records(Vec::new(), vec![ContentRecord::bare("/x.png")]);
        assert_eq!(only_discovered, vec![ContentRecord::bare("/x.png")]);
    }
}
