use iced::widget::{button, column, container, horizontal_space, row, text, text_input, Column, Container, Row};
use iced::{Alignment, Border, Color, Element, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::state::CoTeacherEntry;
use crate::app::{App, Message};
use crate::roster::{initials, AddDraft, CoTeacherLimit, RosterEditor};
use crate::screens::overlay::modal;

const MODAL_WIDTH: f32 = 560.0;
const READ_ONLY_NOTE: &str =
    "You're a co-teacher in this class. Only the primary teacher can add or remove co-teachers.";
const MANAGE_NOTE: &str =
    "Co-teachers can view and manage this class, its students and assignments.";

fn avatar<'a>(name: &str) -> Container<'a, Message> {
    Container::new(text(initials(name)).size(14).color(Color::WHITE))
        .center(Length::Fixed(36.0))
        .style(|_| container::Style {
            background: Some(Color::from_rgb8(13, 148, 136).into()),
            border: Border::default().rounded(18.0),
            ..container::Style::default()
        })
}

fn person_row<'a>(name: &str, email: &str, trailing: Option<Element<'a, Message>>) -> Row<'a, Message> {
    let mut person = row![
        avatar(name),
        column![text(name.to_string()), text(email.to_string()).size(13)].spacing(2),
        horizontal_space(),
    ]
        .spacing(12)
        .align_y(Alignment::Center);
    if let Some(trailing) = trailing {
        person = person.push(trailing);
    }
    person
}

fn primary_teacher(editor: &RosterEditor) -> Column<'_, Message> {
    let name = editor.primary_teacher.as_deref().unwrap_or("You");
    let email = editor.primary_teacher_email.as_deref().unwrap_or_default();
    column![text("Primary teacher").size(14), person_row(name, email, None)].spacing(8)
}

fn add_form(draft: &AddDraft) -> Option<Column<'_, Message>> {
    let AddDraft::Editing { name, email } = draft else {
        return None;
    };
    let form = column![
        text_input("Full name", name)
            .on_input(Message::NewCoTeacherNameChanged)
            .padding(10),
        text_input("Email address", email)
            .on_input(Message::NewCoTeacherEmailChanged)
            .on_submit(Message::SubmitNewCoTeacher)
            .padding(10),
        row![
            horizontal_space(),
            button(text("Cancel"))
                .style(button::secondary)
                .on_press(Message::CancelAddingCoTeacher),
            button(text("Add Co-teacher"))
                .on_press_maybe(draft.can_commit().then_some(Message::SubmitNewCoTeacher)),
        ]
            .spacing(10),
    ]
        .spacing(8);
    Some(form)
}

fn entry_row<'a>(entry: &'a CoTeacherEntry, read_only: bool) -> Row<'a, Message> {
    let remove: Option<Element<'a, Message>> = (!read_only).then(|| {
        button(text("Remove"))
            .style(button::danger)
            .on_press(Message::RemoveCoTeacher(entry.id))
            .into()
    });
    person_row(&entry.name, &entry.email, remove)
}

pub fn co_teacher_modal(app: &App) -> Option<Element<'_, Message>> {
    let editor = app.roster_editor.as_ref()?;

    let header = row![
        text(editor.heading()).size(22),
        horizontal_space(),
        button(fa_icon_solid("xmark").size(16.0))
            .style(button::text)
            .on_press(Message::CloseCoTeacherModal),
    ]
        .spacing(10)
        .align_y(Alignment::Center);

    let note = if editor.is_read_only() { READ_ONLY_NOTE } else { MANAGE_NOTE };
    let mut content = column![header, text(note).size(14), primary_teacher(editor)].spacing(16);

    let mut roster = Column::new().spacing(10).push(text(editor.count_line()).size(16));

    if editor.can_add_more() && !editor.draft().is_editing() {
        roster = roster.push(
            button(
                row![fa_icon_solid("user-plus").size(14.0), text("Add a co-teacher")]
                    .spacing(8)
                    .align_y(Alignment::Center),
            )
                .style(button::secondary)
                .on_press(Message::StartAddingCoTeacher),
        );
    } else if !editor.is_read_only() && !editor.can_add_more() {
        if let CoTeacherLimit::AtMost(max) = app.config.co_teacher_limit {
            roster = roster.push(text(format!("This class already has the maximum of {max}.")).size(13));
        }
    }

    if let Some(form) = add_form(editor.draft()) {
        roster = roster.push(form);
    }

    if editor.is_read_only() {
        roster = roster.push(person_row(
            &format!("{} (You)", app.viewer.name),
            &app.viewer.email,
            None,
        ));
    }

    if editor.entries().is_empty() {
        if !editor.is_read_only() {
            roster = roster.push(text("No co-teachers added yet").size(14));
        }
    } else {
        roster = editor
            .entries()
            .iter()
            .fold(roster, |roster, entry| roster.push(entry_row(entry, editor.is_read_only())));
    }

    content = content.push(roster);
    Some(modal(content, Message::CloseCoTeacherModal, MODAL_WIDTH))
}
