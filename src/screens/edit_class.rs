use iced::widget::{button, column, horizontal_space, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::state::{Grade, SchoolYear};
use crate::app::{App, Message};
use crate::screens::overlay::modal;

const MODAL_WIDTH: f32 = 480.0;

pub fn edit_class_modal(app: &App) -> Option<Element<'_, Message>> {
    let editor = app.class_editor.as_ref()?;
    let draft = editor.draft();

    let header = row![
        text("Edit Class").size(24),
        horizontal_space(),
        button(fa_icon_solid("xmark").size(16.0))
            .style(button::text)
            .on_press(Message::CancelEditingClass),
    ]
        .align_y(Alignment::Center);

    let form = column![
        text("Class name"),
        text_input("Class name", &draft.name)
            .on_input(Message::EditClassNameChanged)
            .on_submit(Message::SubmitEditedClass)
            .padding(10),
        text("Grade"),
        pick_list(Grade::ALL.to_vec(), draft.selected_grade(), Message::EditClassGradeSelected)
            .placeholder("Select a grade")
            .width(Length::Fill),
        text("School year"),
        pick_list(
            SchoolYear::options(),
            Some(draft.school_year.clone()),
            Message::EditClassSchoolYearSelected,
        )
            .width(Length::Fill),
    ]
        .spacing(8);

    let actions = row![
        horizontal_space(),
        button(text("Cancel"))
            .style(button::secondary)
            .on_press(Message::CancelEditingClass),
        button(text("Save Changes")).on_press_maybe(editor.can_save().then_some(Message::SubmitEditedClass)),
    ]
        .spacing(10);

    let content = column![header, form, actions].spacing(20);
    Some(modal(content, Message::CancelEditingClass, MODAL_WIDTH))
}
