use tracing::{debug, warn};

use crate::app::state::{
    to_display_form, to_storage_form, ClassroomId, ClassroomRecord, Grade, SchoolYear,
};

/// Editable projection of a class. `grade` holds the display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDraft {
    pub name: String,
    pub grade: String,
    pub school_year: SchoolYear,
}

impl ClassDraft {
    fn from_record(record: &ClassroomRecord) -> Self {
        Self {
            name: record.name.clone(),
            grade: to_display_form(record.grade.storage_form()),
            school_year: record.school_year.clone(),
        }
    }

    pub fn selected_grade(&self) -> Option<Grade> {
        Grade::from_display(&self.grade).ok()
    }
}

/// What a successful save hands back to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassUpdate {
    pub name: String,
    pub grade: Grade,
    pub school_year: SchoolYear,
}

#[derive(Debug, Clone)]
pub struct ClassEditor {
    classroom: ClassroomId,
    original: ClassDraft,
    draft: ClassDraft,
}

impl ClassEditor {
    pub fn open(record: &ClassroomRecord) -> Self {
        let original = ClassDraft::from_record(record);
        debug!(classroom = %record.id, "edit class modal opened");
        Self {
            classroom: record.id,
            draft: original.clone(),
            original,
        }
    }

    pub fn classroom(&self) -> ClassroomId {
        self.classroom
    }

    pub fn draft(&self) -> &ClassDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: String) {
        self.draft.name = name;
    }

    pub fn select_grade(&mut self, grade: Grade) {
        self.draft.grade = grade.display_form().to_string();
    }

    pub fn select_school_year(&mut self, school_year: SchoolYear) {
        self.draft.school_year = school_year;
    }

    pub fn can_save(&self) -> bool {
        !self.draft.name.trim().is_empty()
    }

    /// Converts the draft back to storage form. `None` leaves the modal open.
    pub fn save(&self) -> Option<ClassUpdate> {
        if !self.can_save() {
            return None;
        }
        match Grade::from_storage(&to_storage_form(&self.draft.grade)) {
            Ok(grade) => Some(ClassUpdate {
                name: self.draft.name.clone(),
                grade,
                school_year: self.draft.school_year.clone(),
            }),
            Err(err) => {
                warn!(classroom = %self.classroom, %err, "edit class draft rejected");
                None
            }
        }
    }

    /// Throws the draft away so stale edits never come back on reopen.
    pub fn cancel(&mut self) {
        self.draft = self.original.clone();
    }
}
