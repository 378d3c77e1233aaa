use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::state::ClassroomRecord;
use crate::store::ClassroomStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    SchoolYear,
    DateCreated,
    Grade,
    AlphabeticalByName,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::SchoolYear,
        SortKey::DateCreated,
        SortKey::Grade,
        SortKey::AlphabeticalByName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::SchoolYear => "School year",
            SortKey::DateCreated => "Date created",
            SortKey::Grade => "Grade",
            SortKey::AlphabeticalByName => "A to Z",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Case-insensitive name order, falling back to raw byte order so that
/// distinct names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn compare(key: SortKey, a: &ClassroomRecord, b: &ClassroomRecord) -> Ordering {
    match key {
        SortKey::SchoolYear => b.school_year.cmp(&a.school_year),
        SortKey::DateCreated => b.id.cmp(&a.id),
        SortKey::Grade => a.grade.storage_form().cmp(b.grade.storage_form()),
        SortKey::AlphabeticalByName => compare_names(&a.name, &b.name),
    }
}

pub fn sort_classrooms(records: &[ClassroomRecord], key: SortKey) -> Vec<ClassroomRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(key, a, b));
    sorted
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassroomGroup {
    pub key: String,
    pub heading: String,
    pub classrooms: Vec<ClassroomRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arrangement {
    Flat(Vec<ClassroomRecord>),
    Grouped(Vec<ClassroomGroup>),
}

impl Default for Arrangement {
    fn default() -> Self {
        Arrangement::Flat(Vec::new())
    }
}

impl Arrangement {
    pub fn records(&self) -> Box<dyn Iterator<Item = &ClassroomRecord> + '_> {
        match self {
            Arrangement::Flat(records) => Box::new(records.iter()),
            Arrangement::Grouped(groups) => {
                Box::new(groups.iter().flat_map(|group| group.classrooms.iter()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupOrder {
    Ascending,
    Descending,
}

fn group_by(
    sorted: Vec<ClassroomRecord>,
    field: impl Fn(&ClassroomRecord) -> String,
    order: GroupOrder,
    heading: impl Fn(&str) -> String,
) -> Vec<ClassroomGroup> {
    let mut buckets: BTreeMap<String, Vec<ClassroomRecord>> = BTreeMap::new();
    for record in sorted {
        buckets.entry(field(&record)).or_default().push(record);
    }

    let mut groups: Vec<ClassroomGroup> = buckets
        .into_iter()
        .map(|(key, mut classrooms)| {
            classrooms.sort_by(|a, b| compare_names(&a.name, &b.name));
            ClassroomGroup {
                heading: heading(&key),
                key,
                classrooms,
            }
        })
        .collect();
    if order == GroupOrder::Descending {
        groups.reverse();
    }
    groups
}

/// Orders the records by `key`; school year and grade are also split into groups.
pub fn arrange(records: &[ClassroomRecord], key: SortKey) -> Arrangement {
    let sorted = sort_classrooms(records, key);
    match key {
        SortKey::SchoolYear => Arrangement::Grouped(group_by(
            sorted,
            |r| r.school_year.as_str().to_string(),
            GroupOrder::Descending,
            |year| format!("SY {year}"),
        )),
        SortKey::Grade => Arrangement::Grouped(group_by(
            sorted,
            |r| r.grade.storage_form().to_string(),
            GroupOrder::Ascending,
            str::to_string,
        )),
        SortKey::DateCreated | SortKey::AlphabeticalByName => Arrangement::Flat(sorted),
    }
}

/// Memoizes [`arrange`] on the store revision and sort key.
#[derive(Debug, Default)]
pub struct SortCache {
    inputs: Option<(u64, SortKey)>,
    arrangement: Arrangement,
    recomputations: usize,
}

impl SortCache {
    /// Returns `true` when the arrangement had to be recomputed.
    pub fn refresh(&mut self, store: &ClassroomStore, key: SortKey) -> bool {
        let inputs = (store.revision(), key);
        if self.inputs == Some(inputs) {
            return false;
        }
        self.arrangement = arrange(store.classrooms(), key);
        self.inputs = Some(inputs);
        self.recomputations += 1;
        debug!(
            revision = inputs.0,
            ?key,
            recomputations = self.recomputations(),
            "classroom arrangement recomputed"
        );
        true
    }

    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{ClassroomId, Grade, SchoolYear};
    use crate::editor::ClassUpdate;
    use crate::fixtures;
    use crate::roster::IdSequence;

    fn records() -> Vec<ClassroomRecord> {
        fixtures::classrooms().unwrap()
    }

    fn ids(records: &[ClassroomRecord]) -> Vec<u32> {
        records.iter().map(|r| r.id.0).collect()
    }

    fn is_sorted_by(records: &[ClassroomRecord], key: SortKey) -> bool {
        records
            .windows(2)
            .all(|w| compare(key, &w[0], &w[1]) != Ordering::Greater)
    }

    #[test]
    fn every_key_produces_an_ordered_permutation() {
        let input = records();
        for key in SortKey::ALL {
            let sorted = sort_classrooms(&input, key);
            assert!(is_sorted_by(&sorted, key), "{key} not ordered");

            let mut before = ids(&input);
            let mut after = ids(&sorted);
            before.sort();
            after.sort();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn resorting_is_idempotent() {
        let input = records();
        for key in SortKey::ALL {
            let once = sort_classrooms(&input, key);
            let twice = sort_classrooms(&once, key);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn date_created_puts_highest_id_first() {
        let sorted = sort_classrooms(&records(), SortKey::DateCreated);
        assert_eq!(ids(&sorted), vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn id_order_is_numeric_not_textual() {
        let mut input = records();
        input[0].id = ClassroomId(10);
        let sorted = sort_classrooms(&input, SortKey::DateCreated);
        assert_eq!(sorted[0].id, ClassroomId(10));
        assert_eq!(sorted[1].id, ClassroomId(9));
    }

    #[test]
    fn school_year_newest_first() {
        let sorted = sort_classrooms(&records(), SortKey::SchoolYear);
        assert_eq!(sorted.first().unwrap().school_year.as_str(), "2025-26");
        assert_eq!(sorted.last().unwrap().school_year.as_str(), "2023-24");
    }

    #[test]
    fn name_order_ignores_case_first() {
        assert_eq!(
            compare_names("Period 2 - MATH", "PERIOD 3 - MATH"),
            Ordering::Less
        );
        assert_eq!(compare_names("abc", "ABC"), Ordering::Greater);
        assert_eq!(compare_names("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn school_year_groups_descend_and_members_ascend_by_name() {
        let Arrangement::Grouped(groups) = arrange(&records(), SortKey::SchoolYear) else {
            panic!("school year must be grouped");
        };
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-26", "2024-25", "2023-24"]);
        assert_eq!(groups[0].heading, "SY 2025-26");

        let newest: Vec<&str> = groups[0].classrooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            newest,
            vec![
                "Advanced Math - NILSSON",
                "Geometry & Algebra - NILSSON",
                "Homeroom (11A) - NILSSON",
            ]
        );
    }

    #[test]
    fn grade_groups_ascend() {
        let Arrangement::Grouped(groups) = arrange(&records(), SortKey::Grade) else {
            panic!("grade must be grouped");
        };
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["3RD GRADE", "4TH GRADE"]);
        assert_eq!(groups[0].heading, "3RD GRADE");
        assert_eq!(groups[0].classrooms.len(), 2);
        assert_eq!(groups[1].classrooms.len(), 7);
    }

    #[test]
    fn grouping_partitions_without_loss_or_duplication() {
        let input = records();
        for key in [SortKey::SchoolYear, SortKey::Grade] {
            let arrangement = arrange(&input, key);
            let flattened: Vec<ClassroomRecord> = arrangement.records().cloned().collect();
            assert_eq!(flattened.len(), input.len());

            let mut seen = ids(&flattened);
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), input.len());

            // concatenated groups are ordered by key, then by name
            assert!(flattened.windows(2).all(|w| {
                compare(key, &w[0], &w[1])
                    .then_with(|| compare_names(&w[0].name, &w[1].name))
                    != Ordering::Greater
            }));
        }
    }

    #[test]
    fn flat_keys_are_not_grouped() {
        assert!(matches!(
            arrange(&records(), SortKey::DateCreated),
            Arrangement::Flat(_)
        ));
        assert!(matches!(
            arrange(&records(), SortKey::AlphabeticalByName),
            Arrangement::Flat(_)
        ));
        assert!(arrange(&[], SortKey::Grade).is_empty());
    }

    #[test]
    fn cache_recomputes_only_when_inputs_change() {
        let mut ids = IdSequence::new(1);
        let mut store = fixtures::seed_store(&mut ids).unwrap();
        let mut cache = SortCache::default();

        assert!(cache.refresh(&store, SortKey::SchoolYear));
        assert!(!cache.refresh(&store, SortKey::SchoolYear));
        assert_eq!(cache.recomputations(), 1);

        assert!(cache.refresh(&store, SortKey::Grade));
        assert_eq!(cache.recomputations(), 2);

        store
            .apply_update(
                ClassroomId(3),
                ClassUpdate {
                    name: "Renamed".to_string(),
                    grade: Grade::Fifth,
                    school_year: SchoolYear::parse("2022-23").unwrap(),
                },
            )
            .unwrap();
        assert!(cache.refresh(&store, SortKey::Grade));
        assert!(!cache.refresh(&store, SortKey::Grade));
        assert_eq!(cache.recomputations(), 3);
        assert!(
            cache
                .arrangement()
                .records()
                .any(|r| r.name == "Renamed" && r.grade == Grade::Fifth)
        );
    }
}
