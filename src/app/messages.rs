use iced::{Point, Rectangle, Size};
use crate::app::state::{CardVariant, ClassroomId, CoTeacherId, Grade, SchoolYear, TooltipKey};
use crate::roster::CoTeacherLimit;
use crate::sorting::SortKey;

#[derive(Debug, Clone)]
pub enum Message {
    GoToActiveClasses,
    GoToArchivedClasses,
    GoToSettings,
    ToggleHelp,
    ToggleAccount,
    //
    CursorMoved(Point),
    ViewportResized(Size),
    OutsideClick,
    NoOp,
    // Sorting
    ToggleSortDropdown,
    SortTriggerMeasured(Option<Rectangle>),
    SortKeySelected(SortKey),
    // Card menus and tooltips
    ToggleCardMenu(ClassroomId),
    CardMenuTriggerMeasured(ClassroomId, Option<Rectangle>),
    TooltipEntered(TooltipKey),
    TooltipLeft(TooltipKey),
    // Edit class modal
    StartEditingClass(ClassroomId),
    EditClassNameChanged(String),
    EditClassGradeSelected(Grade),
    EditClassSchoolYearSelected(SchoolYear),
    SubmitEditedClass,
    CancelEditingClass,
    // Co-teacher modal
    OpenCoTeacherModal(ClassroomId),
    CloseCoTeacherModal,
    StartAddingCoTeacher,
    NewCoTeacherNameChanged(String),
    NewCoTeacherEmailChanged(String),
    SubmitNewCoTeacher,
    CancelAddingCoTeacher,
    RemoveCoTeacher(CoTeacherId),
    // Settings
    ThemeSelected(&'static str),
    DefaultSortSelected(SortKey),
    CardVariantSelected(CardVariant),
    CoTeacherLimitSelected(CoTeacherLimit),
}
