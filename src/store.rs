use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::app::state::{ClassroomId, ClassroomRecord, CoTeacherEntry};
use crate::editor::ClassUpdate;
use crate::error::StoreError;

/// In-memory classrooms for the session. Every mutation bumps `revision`.
#[derive(Debug, Default)]
pub struct ClassroomStore {
    classrooms: Vec<ClassroomRecord>,
    rosters: HashMap<ClassroomId, Vec<CoTeacherEntry>>,
    revision: u64,
}

impl ClassroomStore {
    pub fn new(classrooms: Vec<ClassroomRecord>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for record in &classrooms {
            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
        }
        Ok(Self {
            classrooms,
            rosters: HashMap::new(),
            revision: 0,
        })
    }

    pub fn classrooms(&self) -> &[ClassroomRecord] {
        &self.classrooms
    }

    pub fn get(&self, id: ClassroomId) -> Option<&ClassroomRecord> {
        self.classrooms.iter().find(|r| r.id == id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Roster in insertion order; empty when the class has none.
    pub fn roster(&self, id: ClassroomId) -> &[CoTeacherEntry] {
        self.rosters.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn get_mut(&mut self, id: ClassroomId) -> Result<&mut ClassroomRecord, StoreError> {
        self.classrooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::UnknownClassroom(id))
    }

    pub fn apply_update(&mut self, id: ClassroomId, update: ClassUpdate) -> Result<(), StoreError> {
        let record = self.get_mut(id)?;
        record.name = update.name;
        record.grade = update.grade;
        record.school_year = update.school_year;
        self.revision += 1;
        info!(classroom = %id, revision = self.revision, "class details saved");
        Ok(())
    }

    /// Replaces the roster and re-derives `has_co_teacher` from it.
    pub fn replace_roster(
        &mut self,
        id: ClassroomId,
        entries: Vec<CoTeacherEntry>,
    ) -> Result<(), StoreError> {
        let record = self.get_mut(id)?;
        record.has_co_teacher = !entries.is_empty();
        debug!(classroom = %id, co_teachers = entries.len(), "roster replaced");
        if entries.is_empty() {
            self.rosters.remove(&id);
        } else {
            self.rosters.insert(id, entries);
        }
        self.revision += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{CoTeacherId, Grade, SchoolYear};
    use crate::fixtures;
    use crate::roster::IdSequence;

    fn entry(id: u64, name: &str) -> CoTeacherEntry {
        CoTeacherEntry {
            id: CoTeacherId(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut records = fixtures::classrooms().unwrap();
        let copy = records[0].clone();
        records.push(copy);
        assert_eq!(
            ClassroomStore::new(records).unwrap_err(),
            StoreError::DuplicateId(ClassroomId(1))
        );
    }

    #[test]
    fn seeded_rosters_match_co_teacher_flags() {
        let mut ids = IdSequence::new(100);
        let store = fixtures::seed_store(&mut ids).unwrap();
        for record in store.classrooms() {
            assert_eq!(record.has_co_teacher, !store.roster(record.id).is_empty());
        }
    }

    #[test]
    fn update_bumps_revision_and_keeps_other_fields() {
        let mut store = ClassroomStore::new(fixtures::classrooms().unwrap()).unwrap();
        let before = store.get(ClassroomId(7)).unwrap().clone();
        store
            .apply_update(
                ClassroomId(7),
                ClassUpdate {
                    name: "Algebra I".to_string(),
                    grade: Grade::Sixth,
                    school_year: SchoolYear::parse("2024-25").unwrap(),
                },
            )
            .unwrap();
        let after = store.get(ClassroomId(7)).unwrap();
        assert_eq!(store.revision(), 1);
        assert_eq!(after.name, "Algebra I");
        assert_eq!(after.grade, Grade::Sixth);
        assert_eq!(after.class_code, before.class_code);
        assert_eq!(after.student_count, before.student_count);
    }

    #[test]
    fn unknown_classroom_is_reported_without_mutation() {
        let mut store = ClassroomStore::new(fixtures::classrooms().unwrap()).unwrap();
        let err = store.replace_roster(ClassroomId(42), vec![entry(1, "Ann")]);
        assert_eq!(err, Err(StoreError::UnknownClassroom(ClassroomId(42))));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn roster_replacement_tracks_flag() {
        let mut store = ClassroomStore::new(fixtures::classrooms().unwrap()).unwrap();
        store
            .replace_roster(ClassroomId(1), vec![entry(1, "Ann"), entry(2, "Bo")])
            .unwrap();
        assert!(store.get(ClassroomId(1)).unwrap().has_co_teacher);
        assert_eq!(store.roster(ClassroomId(1)).len(), 2);

        store.replace_roster(ClassroomId(1), Vec::new()).unwrap();
        assert!(!store.get(ClassroomId(1)).unwrap().has_co_teacher);
        assert!(store.roster(ClassroomId(1)).is_empty());
        assert_eq!(store.revision(), 2);
    }
}
