use iced::{widget::{column, text, Container, vertical_space}, Length, Center, Theme};
use iced::widget::pick_list;
use crate::app::state::CardVariant;
use crate::app::{App, Message};
use crate::config::theme_to_str;
use crate::roster::CoTeacherLimit;
use crate::sorting::SortKey;

pub fn settings_screen(app: &App) -> Container<'_, Message> {
    let current_name = theme_to_str(&app.theme);
    let theme_names: Vec<&'static str> = Theme::ALL.iter().map(theme_to_str).collect();
    let content = column![
        text("Settings").size(30),
        vertical_space().height(Length::Fixed(20.0)),
        text("Theme"),
        pick_list(theme_names, Some(current_name), Message::ThemeSelected)
            .placeholder("Choose a theme"),
        text("Default sort order"),
        pick_list(SortKey::ALL.to_vec(), Some(app.config.default_sort), Message::DefaultSortSelected),
        text("Class cards"),
        pick_list(CardVariant::ALL.to_vec(), Some(app.config.card_variant), Message::CardVariantSelected),
        text("Co-teachers per class"),
        pick_list(
            CoTeacherLimit::CHOICES.to_vec(),
            Some(app.config.co_teacher_limit),
            Message::CoTeacherLimitSelected,
        ),
    ]
        .spacing(15)
        .align_x(Center);

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(40)
}
