use crate::app::state::{
    ClassroomId, ClassroomRecord, CoTeacherEntry, Grade, SchoolYear, SsoProvider, Viewer,
};
use crate::error::{ParseError, StoreError};
use crate::roster::IdSequence;
use crate::store::ClassroomStore;

const NILSSON: (&str, &str) = ("Elizabeth Nilsson", "e.nilsson@prodigy.edu");
const APPLESEED: (&str, &str) = ("John Appleseed", "john.appleseed@school.edu");

pub fn viewer() -> Viewer {
    Viewer {
        name: NILSSON.0.to_string(),
        email: NILSSON.1.to_string(),
    }
}

struct Seed {
    id: u32,
    grade: &'static str,
    name: &'static str,
    student_count: u32,
    class_code: &'static str,
    has_co_teacher: bool,
    is_co_teacher: bool,
    primary: (&'static str, &'static str),
    sso: Option<SsoProvider>,
    school_year: &'static str,
    district_sync: bool,
}

const SEEDS: [Seed; 9] = [
    Seed {
        id: 1,
        grade: "4TH GRADE",
        name: "Homeroom (11A) - NILSSON",
        student_count: 11,
        class_code: "X32QM9K",
        has_co_teacher: false,
        is_co_teacher: false,
        primary: NILSSON,
        sso: Some(SsoProvider::Google),
        school_year: "2024-25",
        district_sync: false,
    },
    Seed {
        id: 2,
        grade: "4TH GRADE",
        name: "Homeroom (11A) - NILSSON",
        student_count: 11,
        class_code: "X32QM9K",
        has_co_teacher: true,
        is_co_teacher: false,
        primary: NILSSON,
        sso: Some(SsoProvider::Clever),
        school_year: "2024-25",
        district_sync: true,
    },
    Seed {
        id: 3,
        grade: "3RD GRADE",
        name: "Period 2 - MATH - NILSSON",
        student_count: 0,
        class_code: "X32QM9K",
        has_co_teacher: false,
        is_co_teacher: true,
        primary: APPLESEED,
        sso: None,
        school_year: "2023-24",
        district_sync: false,
    },
    Seed {
        id: 4,
        grade: "3RD GRADE",
        name: "Period 2 - MATH - NILSSON",
        student_count: 0,
        class_code: "X32QM9K",
        has_co_teacher: false,
        is_co_teacher: false,
        primary: APPLESEED,
        sso: Some(SsoProvider::Google),
        school_year: "2023-24",
        district_sync: false,
    },
    Seed {
        id: 5,
        grade: "4TH GRADE",
        name: "PERIOD 3 - MATH - NILSSON",
        student_count: 11,
        class_code: "X32QM9K",
        has_co_teacher: true,
        is_co_teacher: false,
        primary: NILSSON,
        sso: Some(SsoProvider::Clever),
        school_year: "2024-25",
        district_sync: false,
    },
    Seed {
        id: 6,
        grade: "4TH GRADE",
        name: "PERIOD 3 - MATH - NILSSON",
        student_count: 11,
        class_code: "X32QM9K",
        has_co_teacher: false,
        is_co_teacher: false,
        primary: NILSSON,
        sso: None,
        school_year: "2024-25",
        district_sync: false,
    },
    Seed {
        id: 7,
        grade: "4TH GRADE",
        name: "Advanced Math - NILSSON",
        student_count: 18,
        class_code: "H7K9P2L",
        has_co_teacher: false,
        is_co_teacher: false,
        primary: NILSSON,
        sso: Some(SsoProvider::Google),
        school_year: "2025-26",
        district_sync: false,
    },
    Seed {
        id: 8,
        grade: "4TH GRADE",
        name: "Homeroom (11A) - NILSSON",
        student_count: 22,
        class_code: "M4N8Q5R",
        has_co_teacher: true,
        is_co_teacher: false,
        primary: NILSSON,
        sso: Some(SsoProvider::Clever),
        school_year: "2025-26",
        district_sync: false,
    },
    Seed {
        id: 9,
        grade: "4TH GRADE",
        name: "Geometry & Algebra - NILSSON",
        student_count: 16,
        class_code: "T9W3E6Y",
        has_co_teacher: false,
        is_co_teacher: false,
        primary: NILSSON,
        sso: None,
        school_year: "2025-26",
        district_sync: false,
    },
];

// One existing co-teacher per class flagged with `has_co_teacher`
const CO_TEACHERS: [(u32, &str, &str); 3] = [
    (2, "Marcus Lindqvist", "m.lindqvist@prodigy.edu"),
    (5, "Priya Raman", "p.raman@prodigy.edu"),
    (8, "Daniel Okafor", "d.okafor@prodigy.edu"),
];

pub fn classrooms() -> Result<Vec<ClassroomRecord>, ParseError> {
    SEEDS
        .iter()
        .map(|seed| {
            Ok(ClassroomRecord {
                id: ClassroomId(seed.id),
                grade: Grade::from_storage(seed.grade)?,
                name: seed.name.to_string(),
                student_count: seed.student_count,
                class_code: seed.class_code.to_string(),
                school_year: SchoolYear::parse(seed.school_year)?,
                has_co_teacher: seed.has_co_teacher,
                is_co_teacher: seed.is_co_teacher,
                primary_teacher: Some(seed.primary.0.to_string()),
                primary_teacher_email: Some(seed.primary.1.to_string()),
                sso_provider: seed.sso,
                is_clever_district_sync: seed.district_sync,
            })
        })
        .collect()
}

pub fn seed_store(ids: &mut IdSequence) -> Result<ClassroomStore, StoreError> {
    let mut store = ClassroomStore::new(classrooms()?)?;
    for (classroom, name, email) in CO_TEACHERS {
        let entry = CoTeacherEntry {
            id: ids.next_id(),
            name: name.to_string(),
            email: email.to_string(),
        };
        store.replace_roster(ClassroomId(classroom), vec![entry])?;
    }
    Ok(store)
}
