use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::state::{ClassroomId, ClassroomRecord, CoTeacherEntry, CoTeacherId};
use crate::error::RosterError;

/// How many co-teachers a class may have. The caller decides; nothing is
/// hard-coded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoTeacherLimit {
    #[default]
    Unlimited,
    AtMost(usize),
}

impl CoTeacherLimit {
    pub const CHOICES: [CoTeacherLimit; 4] = [
        CoTeacherLimit::Unlimited,
        CoTeacherLimit::AtMost(1),
        CoTeacherLimit::AtMost(2),
        CoTeacherLimit::AtMost(3),
    ];

    pub fn allows(self, current: usize) -> bool {
        match self {
            CoTeacherLimit::Unlimited => true,
            CoTeacherLimit::AtMost(max) => current < max,
        }
    }
}

impl fmt::Display for CoTeacherLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoTeacherLimit::Unlimited => write!(f, "No limit"),
            CoTeacherLimit::AtMost(1) => write!(f, "At most 1 co-teacher"),
            CoTeacherLimit::AtMost(max) => write!(f, "At most {max} co-teachers"),
        }
    }
}

/// Monotonic co-teacher ids, seeded from the wall clock so ids stay unique
/// for the whole session.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new(start: u64) -> Self {
        Self { next: start }
    }

    pub fn starting_now() -> Self {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        Self::new(millis)
    }

    pub fn next_id(&mut self) -> CoTeacherId {
        let id = CoTeacherId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddDraft {
    #[default]
    Idle,
    Editing { name: String, email: String },
}

impl AddDraft {
    pub fn is_editing(&self) -> bool {
        matches!(self, AddDraft::Editing { .. })
    }

    pub fn can_commit(&self) -> bool {
        match self {
            AddDraft::Idle => false,
            AddDraft::Editing { name, email } => {
                !name.trim().is_empty() && !email.trim().is_empty()
            }
        }
    }
}

pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

/// Working copy of one class's co-teacher roster plus the "add" form.
#[derive(Debug, Clone)]
pub struct RosterEditor {
    classroom: ClassroomId,
    class_name: String,
    entries: Vec<CoTeacherEntry>,
    draft: AddDraft,
    limit: CoTeacherLimit,
    read_only: bool,
    pub primary_teacher: Option<String>,
    pub primary_teacher_email: Option<String>,
}

impl RosterEditor {
    pub fn open(record: &ClassroomRecord, roster: &[CoTeacherEntry], limit: CoTeacherLimit) -> Self {
        debug!(classroom = %record.id, co_teachers = roster.len(), "co-teacher modal opened");
        Self {
            classroom: record.id,
            class_name: record.name.clone(),
            entries: roster.to_vec(),
            draft: AddDraft::Idle,
            limit,
            read_only: record.is_co_teacher,
            primary_teacher: record.primary_teacher.clone(),
            primary_teacher_email: record.primary_teacher_email.clone(),
        }
    }

    pub fn classroom(&self) -> ClassroomId {
        self.classroom
    }

    pub fn entries(&self) -> &[CoTeacherEntry] {
        &self.entries
    }

    pub fn draft(&self) -> &AddDraft {
        &self.draft
    }

    /// Viewer is a co-teacher of this class and may only look.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn can_add_more(&self) -> bool {
        !self.read_only && self.limit.allows(self.entries.len())
    }

    pub fn heading(&self) -> String {
        if self.read_only {
            format!("Co-teachers in {}", self.class_name)
        } else {
            format!("Manage co-teachers in {}", self.class_name)
        }
    }

    pub fn count_line(&self) -> String {
        let count = self.entries.len();
        let plural = if count == 1 { "" } else { "s" };
        format!("You have {count} co-teacher{plural}")
    }

    pub fn add(
        &mut self,
        name: &str,
        email: &str,
        ids: &mut IdSequence,
    ) -> Result<CoTeacherId, RosterError> {
        if self.read_only {
            return Err(RosterError::ReadOnly);
        }
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() {
            return Err(RosterError::MissingField);
        }
        if let CoTeacherLimit::AtMost(max) = self.limit {
            if self.entries.len() >= max {
                return Err(RosterError::LimitReached(max));
            }
        }
        let id = ids.next_id();
        self.entries.push(CoTeacherEntry {
            id,
            name: name.to_string(),
            email: email.to_string(),
        });
        info!(classroom = %self.classroom, co_teacher = %id, "co-teacher added");
        Ok(id)
    }

    /// Missing ids are ignored; `Ok(false)` means nothing was removed.
    pub fn remove(&mut self, id: CoTeacherId) -> Result<bool, RosterError> {
        if self.read_only {
            return Err(RosterError::ReadOnly);
        }
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            info!(classroom = %self.classroom, co_teacher = %id, "co-teacher removed");
        }
        Ok(removed)
    }

    pub fn begin_add(&mut self) {
        if self.can_add_more() && !self.draft.is_editing() {
            self.draft = AddDraft::Editing {
                name: String::new(),
                email: String::new(),
            };
        }
    }

    pub fn set_draft_name(&mut self, value: String) {
        if let AddDraft::Editing { name, .. } = &mut self.draft {
            *name = value;
        }
    }

    pub fn set_draft_email(&mut self, value: String) {
        if let AddDraft::Editing { email, .. } = &mut self.draft {
            *email = value;
        }
    }

    pub fn cancel_add(&mut self) {
        self.draft = AddDraft::Idle;
    }

    /// Adds the drafted co-teacher and returns the form to idle. On failure
    /// the draft is kept as typed.
    pub fn commit_add(&mut self, ids: &mut IdSequence) -> Result<CoTeacherId, RosterError> {
        let AddDraft::Editing { name, email } = self.draft.clone() else {
            return Err(RosterError::MissingField);
        };
        let id = self.add(&name, &email, ids)?;
        self.draft = AddDraft::Idle;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn editor_for(id: u32, limit: CoTeacherLimit) -> RosterEditor {
        let records = fixtures::classrooms().unwrap();
        let record = records.iter().find(|r| r.id == ClassroomId(id)).unwrap();
        RosterEditor::open(record, &[], limit)
    }

    #[test]
    fn add_then_remove_restores_roster() {
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::Unlimited);
        let original = editor.entries().to_vec();

        let id = editor.add("Jane Doe", "jane@example.com", &mut ids).unwrap();
        assert_eq!(editor.entries().len(), 1);
        assert_eq!(editor.remove(id), Ok(true));
        assert_eq!(editor.entries(), original.as_slice());
    }

    #[test]
    fn add_trims_and_appends_in_order() {
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::Unlimited);
        editor.add("  Ann Smith ", " ann@example.com", &mut ids).unwrap();
        editor.add("Bo Chen", "bo@example.com", &mut ids).unwrap();
        let names: Vec<&str> = editor.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ann Smith", "Bo Chen"]);
        assert_eq!(editor.entries()[0].email, "ann@example.com");
        assert_ne!(editor.entries()[0].id, editor.entries()[1].id);
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::Unlimited);
        editor.add("Ann Smith", "ann@example.com", &mut ids).unwrap();
        assert_eq!(editor.remove(CoTeacherId(999)), Ok(false));
        assert_eq!(editor.entries().len(), 1);
    }

    #[test]
    fn empty_name_keeps_roster_and_commit_disabled() {
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::Unlimited);
        editor.begin_add();
        editor.set_draft_name("   ".to_string());
        editor.set_draft_email("jane@example.com".to_string());
        assert!(!editor.draft().can_commit());
        assert_eq!(editor.commit_add(&mut ids), Err(RosterError::MissingField));
        assert!(editor.entries().is_empty());
        assert!(editor.draft().is_editing());
    }

    #[test]
    fn draft_commit_and_cancel_return_to_idle() {
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::Unlimited);
        assert!(!editor.draft().can_commit());

        editor.begin_add();
        editor.set_draft_name("Jane Doe".to_string());
        editor.set_draft_email("jane@example.com".to_string());
        assert!(editor.draft().can_commit());
        editor.commit_add(&mut ids).unwrap();
        assert_eq!(editor.draft(), &AddDraft::Idle);
        assert_eq!(editor.entries().len(), 1);

        editor.begin_add();
        editor.set_draft_name("Discarded".to_string());
        editor.cancel_add();
        assert_eq!(editor.draft(), &AddDraft::Idle);
        assert_eq!(editor.entries().len(), 1);
    }

    #[test]
    fn limit_policy_blocks_extra_co_teachers() {
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::AtMost(2));
        editor.add("A One", "a@example.com", &mut ids).unwrap();
        assert!(editor.can_add_more());
        editor.add("B Two", "b@example.com", &mut ids).unwrap();
        assert!(!editor.can_add_more());
        assert_eq!(
            editor.add("C Three", "c@example.com", &mut ids),
            Err(RosterError::LimitReached(2))
        );
        assert_eq!(editor.entries().len(), 2);
    }

    #[test]
    fn unlimited_policy_keeps_accepting() {
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::Unlimited);
        for n in 0..10 {
            editor
                .add(&format!("Teacher {n}"), &format!("t{n}@example.com"), &mut ids)
                .unwrap();
        }
        assert!(editor.can_add_more());
    }

    #[test]
    fn co_teacher_viewer_cannot_edit() {
        let mut ids = IdSequence::new(10);
        // class 3 is one where the viewer is a co-teacher
        let mut editor = editor_for(3, CoTeacherLimit::Unlimited);
        assert!(editor.is_read_only());
        assert!(!editor.can_add_more());
        assert_eq!(
            editor.add("Jane Doe", "jane@example.com", &mut ids),
            Err(RosterError::ReadOnly)
        );
        editor.begin_add();
        assert_eq!(editor.draft(), &AddDraft::Idle);
        assert_eq!(editor.heading(), "Co-teachers in Period 2 - MATH - NILSSON");
    }

    #[test]
    fn labels() {
        assert_eq!(initials("Jane van Doe"), "JVD");
        let mut ids = IdSequence::new(10);
        let mut editor = editor_for(1, CoTeacherLimit::Unlimited);
        assert_eq!(editor.count_line(), "You have 0 co-teachers");
        editor.add("Jane Doe", "jane@example.com", &mut ids).unwrap();
        assert_eq!(editor.count_line(), "You have 1 co-teacher");
        assert_eq!(CoTeacherLimit::AtMost(2).to_string(), "At most 2 co-teachers");
    }

    #[test]
    fn id_sequence_is_monotonic() {
        let mut ids = IdSequence::starting_now();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }
}
