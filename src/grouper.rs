//! Grouping report rows by ad-group key
//!
//! Groups come out in order of first appearance of their key, ads within a
//! group in row order. Every input row becomes exactly one ad, and `flatten`
//! undoes the grouping.

use crate::record::{Ad, AdGroup, Record};
use std::collections::HashMap;

/// Partition records into ad groups keyed by exact string equality of the
/// group key
///
/// # Example
/// ```
/// use adsplit::grouper::group;
/// use adsplit::record::Record;
///
/// let groups = group(vec![
///     Record::new("1", "a", "5", "100"),
///     Record::new("2", "b", "5", "100"),
///     Record::new("1", "c", "5", "100"),
/// ]);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].ads[1].id(), "c");
/// ```
pub fn group(records: Vec<Record>) -> Vec<AdGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<AdGroup> = Vec::new();

    for record in records {
        match index.get(&record.group_key) {
            Some(&position) => {
                groups[position].ads.push(Ad::from_record(record));
            }
            None => {
                let key = record.group_key.clone();
                index.insert(key.clone(), groups.len());
                groups.push(AdGroup::new(key, vec![Ad::from_record(record)]));
            }
        }
    }

    tracing::debug!("Grouped rows into {} ad groups", groups.len());
    groups
}

/// Turn groups back into rows, group by group, ads in order
///
/// Each row carries its ad's classification result and the group's key.
pub fn flatten(groups: Vec<AdGroup>) -> Vec<Record> {
    let mut records = Vec::with_capacity(groups.iter().map(AdGroup::len).sum());
    for group in groups {
        for ad in group.ads {
            let mut row = ad.row;
            row.group_key.clone_from(&group.key);
            records.push(row);
        }
    }
    records
}
