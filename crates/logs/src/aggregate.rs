//! Grouping and counting of bucketed events.

use std::collections::{BTreeMap, HashMap};

/// Group `(bucket, message)` events by bucket and count identical messages.
///
/// Buckets keep the order they are first seen in the input stream; within a
/// bucket, messages are held in a `BTreeMap`, so downstream iteration is
/// lexicographic.
pub fn aggregate(
    events: impl IntoIterator<Item = (String, String)>,
) -> Vec<(String, BTreeMap<String, u64>)> {
    let mut buckets: Vec<(String, BTreeMap<String, u64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (bucket, message) in events {
        let slot = match index.get(&bucket) {
            Some(&slot) => slot,
            None => {
                index.insert(bucket.clone(), buckets.len());
                buckets.push((bucket, BTreeMap::new()));
                buckets.len() - 1
            }
        };
        *buckets[slot].1.entry(message).or_default() += 1;
    }

    buckets
}
