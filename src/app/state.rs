use std::fmt;
use std::sync::LazyLock;

use iced::{Point, Size, Theme};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::{load_config_or_default, theme_from_str};
use crate::editor::ClassEditor;
use crate::error::ParseError;
use crate::fixtures;
use crate::roster::{CoTeacherLimit, IdSequence, RosterEditor};
use crate::selection::{MenuDomain, Popover, TooltipSet};
use crate::sorting::{SortCache, SortKey};
use crate::store::ClassroomStore;

pub const CONFIG_FILE: &str = "dashboard_config.json";
pub const CONFIG_PATH_ENV: &str = "CLASSROOM_DASHBOARD_CONFIG";
pub const WINDOW_SIZE: Size = Size::new(1400.0, 800.0);

pub struct App {
    pub current_screen: Screen,
    pub theme: Theme,
    pub config: Config,
    pub viewer: Viewer,
    //
    pub store: ClassroomStore,
    pub co_teacher_ids: IdSequence,
    pub sort_key: SortKey,
    pub arrangement: SortCache,
    // Exclusivity domains
    pub card_menus: MenuDomain<ClassroomId>,
    pub sort_dropdown: Popover,
    pub tooltips: TooltipSet<TooltipKey>,
    pub help_expanded: bool,
    pub account_expanded: bool,
    // Last known pointer position and window size, used to anchor menus
    pub cursor: Point,
    pub viewport: Size,
    // Modals
    pub class_editor: Option<ClassEditor>,
    pub roster_editor: Option<RosterEditor>,
}

impl Default for App {
    fn default() -> Self {
        App::new(load_config_or_default())
    }
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut co_teacher_ids = IdSequence::starting_now();
        let store = fixtures::seed_store(&mut co_teacher_ids).unwrap_or_else(|err| {
            error!(%err, "classroom fixture rejected, starting with an empty store");
            ClassroomStore::default()
        });
        let theme = theme_from_str(&config.theme_name).unwrap_or(Theme::Light);
        let sort_key = config.default_sort;
        info!(classrooms = store.classrooms().len(), ?sort_key, "dashboard state initialised");

        let mut app = Self {
            current_screen: Screen::default(),
            theme,
            config,
            viewer: fixtures::viewer(),
            store,
            co_teacher_ids,
            sort_key,
            arrangement: SortCache::default(),
            card_menus: MenuDomain::default(),
            sort_dropdown: Popover::default(),
            tooltips: TooltipSet::default(),
            help_expanded: false,
            account_expanded: false,
            cursor: Point::ORIGIN,
            viewport: WINDOW_SIZE,
            class_editor: None,
            roster_editor: None,
        };
        app.refresh_arrangement();
        app
    }

    pub fn refresh_arrangement(&mut self) {
        self.arrangement.refresh(&self.store, self.sort_key);
    }

    pub fn popovers_open(&self) -> bool {
        self.card_menus.is_listening() || self.sort_dropdown.is_open()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassroomId(pub u32);

impl fmt::Display for ClassroomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoTeacherId(pub u64);

impl fmt::Display for CoTeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a stored grade ("4TH GRADE") to the form shown in form controls.
pub fn to_display_form(grade: &str) -> String {
    grade.to_lowercase()
}

/// Inverse of [`to_display_form`] for every value in [`Grade::ALL`].
pub fn to_storage_form(grade: &str) -> String {
    grade.to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Grade {
    pub const ALL: [Grade; 8] = [
        Grade::First,
        Grade::Second,
        Grade::Third,
        Grade::Fourth,
        Grade::Fifth,
        Grade::Sixth,
        Grade::Seventh,
        Grade::Eighth,
    ];

    pub fn storage_form(self) -> &'static str {
        match self {
            Grade::First => "1ST GRADE",
            Grade::Second => "2ND GRADE",
            Grade::Third => "3RD GRADE",
            Grade::Fourth => "4TH GRADE",
            Grade::Fifth => "5TH GRADE",
            Grade::Sixth => "6TH GRADE",
            Grade::Seventh => "7TH GRADE",
            Grade::Eighth => "8TH GRADE",
        }
    }

    pub fn display_form(self) -> &'static str {
        match self {
            Grade::First => "1st grade",
            Grade::Second => "2nd grade",
            Grade::Third => "3rd grade",
            Grade::Fourth => "4th grade",
            Grade::Fifth => "5th grade",
            Grade::Sixth => "6th grade",
            Grade::Seventh => "7th grade",
            Grade::Eighth => "8th grade",
        }
    }

    pub fn from_storage(value: &str) -> Result<Grade, ParseError> {
        Grade::ALL
            .into_iter()
            .find(|g| g.storage_form() == value)
            .ok_or_else(|| ParseError::Grade(value.to_string()))
    }

    pub fn from_display(value: &str) -> Result<Grade, ParseError> {
        Grade::ALL
            .into_iter()
            .find(|g| g.display_form() == value)
            .ok_or_else(|| ParseError::Grade(value.to_string()))
    }
}

// PickList shows the display form
impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_form())
    }
}

pub const SCHOOL_YEAR_OPTIONS: [&str; 4] = ["2022-23", "2023-24", "2024-25", "2025-26"];

static SCHOOL_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("school year pattern is valid"));

/// "YYYY-YY"; fixed width, so string order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchoolYear(String);

impl SchoolYear {
    pub fn parse(value: &str) -> Result<SchoolYear, ParseError> {
        let invalid = || ParseError::SchoolYear(value.to_string());
        let captures = SCHOOL_YEAR_RE.captures(value).ok_or_else(invalid)?;
        let start: u32 = captures[1].parse().map_err(|_| invalid())?;
        let end: u32 = captures[2].parse().map_err(|_| invalid())?;
        if (start + 1) % 100 != end {
            return Err(invalid());
        }
        Ok(SchoolYear(value.to_string()))
    }

    pub fn options() -> Vec<SchoolYear> {
        SCHOOL_YEAR_OPTIONS
            .iter()
            .map(|year| SchoolYear((*year).to_string()))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SsoProvider {
    Google,
    Clever,
}

impl SsoProvider {
    pub fn label(self) -> &'static str {
        match self {
            SsoProvider::Google => "Google Classroom",
            SsoProvider::Clever => "Clever",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassroomRecord {
    pub id: ClassroomId,
    pub grade: Grade,
    pub name: String,
    pub student_count: u32,
    pub class_code: String,
    pub school_year: SchoolYear,
    pub has_co_teacher: bool,
    pub is_co_teacher: bool,
    pub primary_teacher: Option<String>,
    pub primary_teacher_email: Option<String>,
    pub sso_provider: Option<SsoProvider>,
    pub is_clever_district_sync: bool,
}

impl ClassroomRecord {
    /// District-synced Clever classes are managed outside the dashboard.
    pub fn is_district_managed(&self) -> bool {
        self.sso_provider == Some(SsoProvider::Clever) && self.is_clever_district_sync
    }

    pub fn sync_note(&self) -> Option<String> {
        let provider = self.sso_provider?;
        let mut note = format!("Synced with {}", provider.label());
        if self.is_district_managed() {
            note.push_str(" (managed by your district)");
        }
        Some(note)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoTeacherEntry {
    pub id: CoTeacherId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub name: String,
    pub email: String,
}

impl Viewer {
    /// "Elizabeth Nilsson" -> "Elizabeth N."
    pub fn short_name(&self) -> String {
        let mut parts = self.name.split_whitespace();
        match (parts.next(), parts.last()) {
            (Some(first), Some(last)) => {
                let initial: String = last.chars().take(1).collect();
                format!("{first} {initial}.")
            }
            (Some(first), None) => first.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipKind {
    SsoProvider,
    CoTeachers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipKey {
    pub classroom: ClassroomId,
    pub kind: TooltipKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardVariant {
    Basic,
    WithPortalMenu,
    #[default]
    WithRosterAndSsoBadges,
}

impl CardVariant {
    pub const ALL: [CardVariant; 3] = [
        CardVariant::Basic,
        CardVariant::WithPortalMenu,
        CardVariant::WithRosterAndSsoBadges,
    ];

    pub fn portal_menu(self) -> bool {
        self != CardVariant::Basic
    }

    pub fn roster_and_badges(self) -> bool {
        self == CardVariant::WithRosterAndSsoBadges
    }
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CardVariant::Basic => "Basic cards",
                CardVariant::WithPortalMenu => "Cards with floating menu",
                CardVariant::WithRosterAndSsoBadges => "Cards with roster and sync badges",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme_name: String,
    pub default_sort: SortKey,
    pub co_teacher_limit: CoTeacherLimit,
    pub card_variant: CardVariant,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: "Light".to_string(),
            default_sort: SortKey::default(),
            co_teacher_limit: CoTeacherLimit::default(),
            card_variant: CardVariant::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    ActiveClasses,
    ArchivedClasses,
    Settings,
}
