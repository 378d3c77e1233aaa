use iced::widget::{column, text, Container};
use iced::{Center, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::{App, Message};

pub fn archived_screen(_app: &App) -> Container<'_, Message> {
    let content = column![
        fa_icon_solid("box-archive").size(48.0),
        text("No archived classes").size(24),
        text("Classes you archive will show up here."),
    ]
        .spacing(15)
        .align_x(Center);

    Container::new(content)
        .center(Length::Fill)
        .padding(40)
}
