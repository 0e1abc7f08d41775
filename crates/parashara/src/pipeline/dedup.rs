//! Merging records that share a canonical name.
//!
//! One representative survives per canonical name, chosen by: a cancellation
//! or weakening note, then strength, then description length. Remaining ties
//! fall back to field order so the choice does not depend on input order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::detectors::RawYogaRecord;
use crate::pipeline::normalize::normalize;

/// How two records of the same yoga rank; `Greater` wins.
pub fn preference(a: &RawYogaRecord, b: &RawYogaRecord) -> Ordering {
    a.has_cancellation_note()
        .cmp(&b.has_cancellation_note())
        .then(a.strength.cmp(&b.strength))
        .then(a.description.len().cmp(&b.description.len()))
        // Deterministic tail: lexicographically smaller text wins
        .then_with(|| b.description.cmp(&a.description))
        .then_with(|| b.formation.cmp(&a.formation))
        .then_with(|| b.name.cmp(&a.name))
        .then_with(|| b.category.cmp(&a.category))
        .then_with(|| b.yoga_forming_planets.cmp(&a.yoga_forming_planets))
        .then_with(|| b.houses.cmp(&a.houses))
        .then_with(|| b.attributes.cmp(&a.attributes))
        .then_with(|| b.kind.cmp(&a.kind))
}

/// Keep the preferred record per canonical name, sorted by canonical name.
///
/// Records keep their own names; callers that want canonical names rename
/// before deduplicating.
pub fn deduplicate(records: Vec<RawYogaRecord>) -> Vec<RawYogaRecord> {
    let mut best: BTreeMap<String, RawYogaRecord> = BTreeMap::new();
    for record in records {
        let key = normalize(&record.name);
        match best.get_mut(&key) {
            Some(current) => {
                if preference(&record, current) == Ordering::Greater {
                    *current = record;
                }
            }
            None => {
                best.insert(key, record);
            }
        }
    }
    best.into_values().collect()
}

/// Rename every record to its canonical name.
pub fn canonicalize_names(records: Vec<RawYogaRecord>) -> Vec<RawYogaRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.name = normalize(&record.name);
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::{Strength, YogaKind};

    fn record(name: &str, strength: Strength, description: &str) -> RawYogaRecord {
        RawYogaRecord::builder(name, YogaKind::MoonRelative, "Chandra Yoga")
            .description(description)
            .strength(strength)
            .build()
    }

    #[test]
    fn test_cancellation_note_beats_strength() {
        let plain = record("Kemadruma Yoga", Strength::Strong, "Isolated Moon.");
        let noted = RawYogaRecord::builder("Kemadruma Yoga", YogaKind::MoonRelative, "Chandra Yoga")
            .description("Isolated Moon.")
            .strength(Strength::Weak)
            .cancelled("Moon in kendra")
            .build();
        let out = deduplicate(vec![plain, noted.clone()]);
        assert_eq!(out, vec![noted]);
    }

    #[test]
    fn test_strength_then_description() {
        let weak = record("Amala Yoga", Strength::Medium, "A much longer description of fame.");
        let strong = record("Amala Yoga", Strength::Strong, "Fame.");
        let out = deduplicate(vec![weak, strong.clone()]);
        assert_eq!(out, vec![strong]);

        let short = record("Amala Yoga", Strength::Strong, "Fame.");
        let long = record("Amala Yoga", Strength::Strong, "Fame and good conduct.");
        let out = deduplicate(vec![long.clone(), short]);
        assert_eq!(out, vec![long]);
    }

    #[test]
    fn test_aliases_group_together() {
        let a = record("Gajakesari Yoga", Strength::Medium, "x");
        let b = record("Gaja Kesari Yoga", Strength::Strong, "y");
        let out = deduplicate(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Gaja Kesari Yoga");
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = record("Amala Yoga", Strength::Strong, "abc");
        let b = record("Amala Yoga", Strength::Strong, "abd");
        let forward = deduplicate(vec![a.clone(), b.clone()]);
        let backward = deduplicate(vec![b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            record("Vesi Yoga", Strength::Medium, "a"),
            record("Veshi Yoga", Strength::Weak, "bb"),
            record("Sunapha Yoga", Strength::Strong, "c"),
        ];
        let once = deduplicate(input);
        let twice = deduplicate(once.clone());
        assert_eq!(once, twice);
    }
}
