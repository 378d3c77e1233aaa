use thiserror::Error;

use crate::app::state::ClassroomId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("classroom {0} already exists")]
    DuplicateId(ClassroomId),
    #[error("classroom {0} not found")]
    UnknownClassroom(ClassroomId),
    #[error("invalid classroom fixture: {0}")]
    Fixture(#[from] ParseError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown grade: {0:?}")]
    Grade(String),
    #[error("school year must look like 2024-25, got {0:?}")]
    SchoolYear(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("name and email are both required")]
    MissingField,
    #[error("co-teacher limit of {0} reached")]
    LimitReached(usize),
    #[error("co-teachers cannot manage the roster")]
    ReadOnly,
}
