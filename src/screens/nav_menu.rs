use iced::{widget::{button, column}, Alignment, Element, Length, Renderer, Theme};
use iced::widget::{text, vertical_space, Button, Container, Row};
use iced_font_awesome::fa_icon_solid;
use crate::app::state::Screen;
use crate::app::{Message, App};

const HELP_TEXT: &str = "Need a hand? Visit the help center or contact your school's support team.";

fn icon_button_content<'a>(
    icon_element: impl Into<Element<'a, Message, Theme, Renderer>>,
    label: impl text::IntoFragment<'a>,
) -> Row<'a, Message> {
    Row::new()
        .align_y(Alignment::Center)
        .spacing(8)
        .push(icon_element)
        .push(text(label))
}

fn nav_button<'a>(
    app: &'a App,
    icon: &'static str,
    label: &'static str,
    target: Screen,
    on_press: Message,
) -> Button<'a, Message> {
    let style = if app.current_screen == target { button::primary } else { button::text };
    button(icon_button_content(
        fa_icon_solid(icon).style(move |_| text::base(&app.theme)),
        label,
    ))
        .style(style)
        .on_press(on_press)
        .width(Length::Fill)
}

fn chevron(expanded: bool) -> &'static str {
    if expanded { "chevron-up" } else { "chevron-down" }
}

pub fn nav_menu(app: &App) -> Container<'_, Message> {
    let mut content = column![
        text("prodigy").size(26),
        nav_button(app, "building", "Active classes", Screen::ActiveClasses, Message::GoToActiveClasses),
        nav_button(app, "folder-open", "Archived classes", Screen::ArchivedClasses, Message::GoToArchivedClasses),
        vertical_space(),
        button(icon_button_content(
            fa_icon_solid(chevron(app.help_expanded)).style(move |_| text::base(&app.theme)),
            "Help",
        ))
            .style(button::text)
            .on_press(Message::ToggleHelp)
            .width(Length::Fill),
    ]
        .spacing(10);

    if app.help_expanded {
        content = content.push(text(HELP_TEXT).size(13));
    }

    content = content.push(
        button(icon_button_content(
            fa_icon_solid("circle-user").style(move |_| text::base(&app.theme)),
            app.viewer.short_name(),
        ))
            .style(button::text)
            .on_press(Message::ToggleAccount)
            .width(Length::Fill),
    );

    if app.account_expanded {
        content = content
            .push(text(&app.viewer.email).size(13))
            .push(nav_button(app, "gear", "Settings", Screen::Settings, Message::GoToSettings));
    }

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
}
