use iced::widget::container;
use iced::Task;
use tracing::{debug, error, info, warn};

use crate::app::state::Screen;
use crate::config::{save_config, theme_from_str};
use crate::editor::ClassEditor;
use crate::roster::RosterEditor;
use crate::selection::{
    card_menu_trigger, pointer_bounds, sort_dropdown_trigger, CARD_MENU_SIZE, SORT_MENU_SIZE,
};
use super::{App, Message};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::GoToActiveClasses => self.switch_screen(Screen::ActiveClasses),
            Message::GoToArchivedClasses => self.switch_screen(Screen::ArchivedClasses),
            Message::GoToSettings => self.switch_screen(Screen::Settings),
            Message::ToggleHelp => self.help_expanded = !self.help_expanded,
            Message::ToggleAccount => self.account_expanded = !self.account_expanded,
            //
            Message::CursorMoved(position) => self.cursor = position,
            Message::ViewportResized(size) => self.viewport = size,
            Message::OutsideClick => {
                if self.close_popovers() {
                    debug!("popover dismissed by outside click");
                }
            }
            Message::NoOp => {}
            // Sorting
            Message::ToggleSortDropdown => {
                self.card_menus.dismiss();
                if self.sort_dropdown.toggle() {
                    return container::visible_bounds(sort_dropdown_trigger())
                        .map(Message::SortTriggerMeasured);
                }
            }
            Message::SortTriggerMeasured(bounds) => {
                self.card_menus.dismiss();
                let trigger = bounds.unwrap_or_else(|| pointer_bounds(self.cursor));
                self.sort_dropdown.open(trigger, SORT_MENU_SIZE, self.viewport);
            }
            Message::SortKeySelected(key) => {
                self.sort_dropdown.dismiss();
                if self.sort_key != key {
                    info!(?key, "sort order changed");
                    self.sort_key = key;
                }
            }
            // Card menus and tooltips
            Message::ToggleCardMenu(id) => {
                self.sort_dropdown.dismiss();
                if self.card_menus.toggle(id) {
                    return container::visible_bounds(card_menu_trigger(id))
                        .map(move |bounds| Message::CardMenuTriggerMeasured(id, bounds));
                }
            }
            Message::CardMenuTriggerMeasured(id, bounds) => {
                self.sort_dropdown.dismiss();
                let trigger = bounds.unwrap_or_else(|| pointer_bounds(self.cursor));
                self.card_menus.open(id, trigger, CARD_MENU_SIZE, self.viewport);
            }
            Message::TooltipEntered(key) => self.tooltips.enter(key),
            Message::TooltipLeft(key) => self.tooltips.leave(&key),
            // Edit class modal
            Message::StartEditingClass(id) => {
                self.close_popovers();
                match self.store.get(id) {
                    Some(record) => self.class_editor = Some(ClassEditor::open(record)),
                    None => warn!(classroom = %id, "edit requested for unknown class"),
                }
            }
            Message::EditClassNameChanged(name) => {
                if let Some(editor) = self.class_editor.as_mut() {
                    editor.set_name(name);
                }
            }
            Message::EditClassGradeSelected(grade) => {
                if let Some(editor) = self.class_editor.as_mut() {
                    editor.select_grade(grade);
                }
            }
            Message::EditClassSchoolYearSelected(year) => {
                if let Some(editor) = self.class_editor.as_mut() {
                    editor.select_school_year(year);
                }
            }
            Message::SubmitEditedClass => {
                let Some(editor) = self.class_editor.as_ref() else {
                    return Task::none();
                };
                // Save stays disabled for an invalid draft; the modal keeps it
                let Some(update) = editor.save() else {
                    return Task::none();
                };
                let id = editor.classroom();
                if let Err(err) = self.store.apply_update(id, update) {
                    error!(classroom = %id, %err, "class edit not applied");
                }
                self.class_editor = None;
            }
            Message::CancelEditingClass => {
                if let Some(mut editor) = self.class_editor.take() {
                    editor.cancel();
                    debug!(classroom = %editor.classroom(), "class edit cancelled");
                }
            }
            // Co-teacher modal
            Message::OpenCoTeacherModal(id) => {
                self.close_popovers();
                match self.store.get(id) {
                    Some(record) => {
                        self.roster_editor = Some(RosterEditor::open(
                            record,
                            self.store.roster(id),
                            self.config.co_teacher_limit,
                        ));
                    }
                    None => warn!(classroom = %id, "roster requested for unknown class"),
                }
            }
            Message::CloseCoTeacherModal => self.roster_editor = None,
            Message::StartAddingCoTeacher => {
                if let Some(editor) = self.roster_editor.as_mut() {
                    editor.begin_add();
                }
            }
            Message::NewCoTeacherNameChanged(name) => {
                if let Some(editor) = self.roster_editor.as_mut() {
                    editor.set_draft_name(name);
                }
            }
            Message::NewCoTeacherEmailChanged(email) => {
                if let Some(editor) = self.roster_editor.as_mut() {
                    editor.set_draft_email(email);
                }
            }
            Message::SubmitNewCoTeacher => {
                let Some(editor) = self.roster_editor.as_mut() else {
                    return Task::none();
                };
                match editor.commit_add(&mut self.co_teacher_ids) {
                    Ok(_) => self.sync_roster(),
                    Err(err) => debug!(%err, "co-teacher not added"),
                }
            }
            Message::CancelAddingCoTeacher => {
                if let Some(editor) = self.roster_editor.as_mut() {
                    editor.cancel_add();
                }
            }
            Message::RemoveCoTeacher(co_teacher) => {
                let Some(editor) = self.roster_editor.as_mut() else {
                    return Task::none();
                };
                match editor.remove(co_teacher) {
                    Ok(true) => self.sync_roster(),
                    Ok(false) => debug!(%co_teacher, "co-teacher already gone"),
                    Err(err) => warn!(%err, "co-teacher not removed"),
                }
            }
            // Settings
            Message::ThemeSelected(name) => {
                if let Some(theme) = theme_from_str(name) {
                    self.theme = theme;
                    self.config.theme_name = name.to_string();
                    self.persist_config();
                }
            }
            Message::DefaultSortSelected(key) => {
                self.config.default_sort = key;
                self.sort_key = key;
                self.persist_config();
            }
            Message::CardVariantSelected(variant) => {
                self.config.card_variant = variant;
                self.persist_config();
            }
            Message::CoTeacherLimitSelected(limit) => {
                self.config.co_teacher_limit = limit;
                self.persist_config();
            }
        }
        self.refresh_arrangement();
        Task::none()
    }

    /// Outside interaction for every exclusivity domain at once.
    fn close_popovers(&mut self) -> bool {
        let menus = self.card_menus.dismiss();
        let dropdown = self.sort_dropdown.dismiss();
        menus || dropdown
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.close_popovers();
        self.tooltips.clear();
        self.class_editor = None;
        self.roster_editor = None;
        self.current_screen = screen;
    }

    fn sync_roster(&mut self) {
        let Some(editor) = self.roster_editor.as_ref() else {
            return;
        };
        if let Err(err) = self
            .store
            .replace_roster(editor.classroom(), editor.entries().to_vec())
        {
            error!(%err, "roster change not applied");
        }
    }

    fn persist_config(&self) {
        if let Err(err) = save_config(&self.config) {
            warn!(%err, "settings not saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use iced::{Point, Rectangle};

    use super::*;
    use crate::app::state::{ClassroomId, Config, Grade, TooltipKey, TooltipKind};
    use crate::roster::AddDraft;
    use crate::sorting::{Arrangement, SortKey};

    const GEAR: Rectangle = Rectangle { x: 580.0, y: 180.0, width: 32.0, height: 28.0 };
    const SORT_BUTTON: Rectangle = Rectangle { x: 1150.0, y: 40.0, width: 140.0, height: 36.0 };

    fn app() -> App {
        App::new(Config::default())
    }

    // The runtime answers the bounds query with a measured message.
    fn press_card_menu(app: &mut App, id: ClassroomId, trigger: Option<Rectangle>) {
        let _ = app.update(Message::ToggleCardMenu(id));
        let _ = app.update(Message::CardMenuTriggerMeasured(id, trigger));
    }

    fn press_sort_button(app: &mut App) {
        let _ = app.update(Message::ToggleSortDropdown);
        let _ = app.update(Message::SortTriggerMeasured(Some(SORT_BUTTON)));
    }

    #[test]
    fn card_menus_are_exclusive() {
        let mut app = app();
        press_card_menu(&mut app, ClassroomId(1), Some(GEAR));
        press_card_menu(&mut app, ClassroomId(2), Some(GEAR));
        assert_eq!(app.card_menus.open_id(), Some(ClassroomId(2)));
        assert!(app.popovers_open());

        app.update(Message::OutsideClick);
        assert_eq!(app.card_menus.open_id(), None);
        assert!(!app.popovers_open());
    }

    #[test]
    fn pressing_the_open_gear_closes_its_menu() {
        let mut app = app();
        press_card_menu(&mut app, ClassroomId(3), Some(GEAR));
        let _ = app.update(Message::ToggleCardMenu(ClassroomId(3)));
        assert_eq!(app.card_menus.open_id(), None);
    }

    #[test]
    fn menu_anchor_follows_trigger_not_pointer() {
        let mut app = app();
        app.update(Message::CursorMoved(Point::new(600.0, 200.0)));
        press_card_menu(&mut app, ClassroomId(1), Some(GEAR));
        let first = app.card_menus.anchor();
        app.update(Message::OutsideClick);

        app.update(Message::CursorMoved(Point::new(612.0, 206.0)));
        press_card_menu(&mut app, ClassroomId(1), Some(GEAR));
        assert_eq!(app.card_menus.anchor(), first);
        assert_eq!(first, Some(Point::new(612.0 - 224.0, 216.0)));
    }

    #[test]
    fn unmeasured_trigger_falls_back_to_pointer() {
        let mut app = app();
        app.update(Message::CursorMoved(Point::new(600.0, 200.0)));
        press_card_menu(&mut app, ClassroomId(1), None);
        assert_eq!(app.card_menus.anchor(), Some(Point::new(376.0, 208.0)));
    }

    #[test]
    fn sort_dropdown_and_card_menu_dismiss_each_other() {
        let mut app = app();
        press_sort_button(&mut app);
        assert!(app.sort_dropdown.is_open());
        press_card_menu(&mut app, ClassroomId(4), Some(GEAR));
        assert!(!app.sort_dropdown.is_open());
        assert!(app.card_menus.is_open_for(ClassroomId(4)));
        press_sort_button(&mut app);
        assert!(app.sort_dropdown.is_open());
        assert_eq!(app.card_menus.open_id(), None);
        assert_eq!(app.sort_dropdown.anchor(), Some(Point::new(1098.0, 84.0)));
    }

    #[test]
    fn selecting_a_sort_key_closes_the_dropdown() {
        let mut app = app();
        press_sort_button(&mut app);
        app.update(Message::SortKeySelected(SortKey::DateCreated));
        assert!(!app.sort_dropdown.is_open());
        let Arrangement::Flat(records) = app.arrangement.arrangement() else {
            panic!("date created is not grouped");
        };
        assert_eq!(records[0].id, ClassroomId(9));
    }

    #[test]
    fn tooltips_survive_outside_clicks() {
        let mut app = app();
        let key = TooltipKey { classroom: ClassroomId(2), kind: TooltipKind::SsoProvider };
        press_card_menu(&mut app, ClassroomId(1), Some(GEAR));
        app.update(Message::TooltipEntered(key));
        app.update(Message::OutsideClick);
        assert_eq!(app.card_menus.open_id(), None);
        assert!(app.tooltips.is_visible(&key));

        app.update(Message::TooltipLeft(key));
        assert!(!app.tooltips.is_visible(&key));
    }

    #[test]
    fn unrelated_messages_do_not_resort() {
        let mut app = app();
        let before = app.arrangement.recomputations();
        app.update(Message::CursorMoved(Point::new(1.0, 2.0)));
        app.update(Message::ToggleHelp);
        assert_eq!(app.arrangement.recomputations(), before);
    }

    #[test]
    fn edit_class_save_writes_back_to_store() {
        let mut app = app();
        press_card_menu(&mut app, ClassroomId(1), Some(GEAR));
        app.update(Message::StartEditingClass(ClassroomId(1)));
        assert_eq!(app.card_menus.open_id(), None);
        assert_eq!(app.class_editor.as_ref().unwrap().draft().grade, "4th grade");

        app.update(Message::EditClassNameChanged("New Name".to_string()));
        app.update(Message::SubmitEditedClass);
        assert!(app.class_editor.is_none());

        let record = app.store.get(ClassroomId(1)).unwrap();
        assert_eq!(record.name, "New Name");
        assert_eq!(record.grade, Grade::Fourth);
        assert_eq!(record.school_year.as_str(), "2024-25");
        assert!(app.arrangement.arrangement().records().any(|r| r.name == "New Name"));
    }

    #[test]
    fn edit_class_cancel_discards_draft() {
        let mut app = app();
        app.update(Message::StartEditingClass(ClassroomId(1)));
        app.update(Message::EditClassNameChanged("New Name".to_string()));
        app.update(Message::CancelEditingClass);
        assert!(app.class_editor.is_none());
        assert_eq!(app.store.get(ClassroomId(1)).unwrap().name, "Homeroom (11A) - NILSSON");

        app.update(Message::StartEditingClass(ClassroomId(1)));
        assert_eq!(
            app.class_editor.as_ref().unwrap().draft().name,
            "Homeroom (11A) - NILSSON"
        );
    }

    #[test]
    fn blank_name_keeps_edit_modal_open() {
        let mut app = app();
        app.update(Message::StartEditingClass(ClassroomId(7)));
        app.update(Message::EditClassNameChanged(String::new()));
        app.update(Message::SubmitEditedClass);
        assert!(app.class_editor.is_some());
        assert_eq!(app.store.get(ClassroomId(7)).unwrap().name, "Advanced Math - NILSSON");
    }

    #[test]
    fn roster_changes_reach_the_store() {
        let mut app = app();
        app.update(Message::OpenCoTeacherModal(ClassroomId(1)));
        app.update(Message::StartAddingCoTeacher);
        app.update(Message::NewCoTeacherNameChanged("Jane Doe".to_string()));
        app.update(Message::NewCoTeacherEmailChanged("jane@example.com".to_string()));
        app.update(Message::SubmitNewCoTeacher);

        let roster = app.store.roster(ClassroomId(1)).to_vec();
        assert_eq!(roster.len(), 1);
        assert!(app.store.get(ClassroomId(1)).unwrap().has_co_teacher);
        assert_eq!(app.roster_editor.as_ref().unwrap().draft(), &AddDraft::Idle);

        app.update(Message::RemoveCoTeacher(roster[0].id));
        assert!(app.store.roster(ClassroomId(1)).is_empty());
        assert!(!app.store.get(ClassroomId(1)).unwrap().has_co_teacher);
    }

    #[test]
    fn empty_co_teacher_form_changes_nothing() {
        let mut app = app();
        app.update(Message::OpenCoTeacherModal(ClassroomId(2)));
        let before = app.store.roster(ClassroomId(2)).to_vec();
        app.update(Message::StartAddingCoTeacher);
        app.update(Message::NewCoTeacherEmailChanged("jane@example.com".to_string()));
        app.update(Message::SubmitNewCoTeacher);
        assert_eq!(app.store.roster(ClassroomId(2)), before.as_slice());
        assert!(!app.roster_editor.as_ref().unwrap().draft().can_commit());
    }

    #[test]
    fn switching_screens_closes_modals() {
        let mut app = app();
        app.update(Message::OpenCoTeacherModal(ClassroomId(2)));
        app.update(Message::GoToArchivedClasses);
        assert!(app.roster_editor.is_none());
        assert_eq!(app.current_screen, Screen::ArchivedClasses);
    }
}
