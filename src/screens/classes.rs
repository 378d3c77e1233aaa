use iced::widget::{button, horizontal_space, row, text, Button, Column, Container, Row, Rule, Scrollable};
use iced::{Alignment, Element, Length};
use iced_font_awesome::fa_icon_solid;
use crate::app::state::ClassroomRecord;
use crate::app::{App, Message};
use crate::screens::class_card::classroom_card;
use crate::screens::overlay::{anchored, menu_frame};
use crate::selection::{sort_dropdown_trigger, SORT_MENU_SIZE};
use crate::sorting::{Arrangement, SortKey};

const CARDS_PER_ROW: usize = 3;

fn headerbar(app: &App) -> Row<'_, Message> {
    let sort_button = button(
        row![
            fa_icon_solid("up-down").size(14.0),
            text(app.sort_key.label()),
            fa_icon_solid("caret-down").size(14.0),
        ]
            .spacing(8)
            .align_y(Alignment::Center),
    )
        .style(button::secondary)
        .on_press(Message::ToggleSortDropdown);

    // No class creation in this dashboard yet
    let create_button: Button<'_, Message> = button(
        row![fa_icon_solid("plus").size(14.0), text("Create class")]
            .spacing(8)
            .align_y(Alignment::Center),
    );

    row![
        text("Classes").size(30),
        horizontal_space(),
        Container::new(sort_button).id(sort_dropdown_trigger()),
        create_button,
    ]
        .spacing(16)
        .align_y(Alignment::Center)
        .width(Length::Fill)
}

fn card_grid<'a>(app: &'a App, records: &'a [ClassroomRecord]) -> Column<'a, Message> {
    records
        .chunks(CARDS_PER_ROW)
        .fold(Column::new().spacing(24), |grid, chunk| {
            let cards = chunk.iter().fold(
                Row::new().spacing(24).align_y(Alignment::Start),
                |cards, record| cards.push(classroom_card(app, record)),
            );
            grid.push(cards)
        })
}

pub fn classes_screen(app: &App) -> Container<'_, Message> {
    let mut content = Column::new()
        .spacing(32)
        .padding(32)
        .width(Length::Fill)
        .push(headerbar(app));

    let arrangement = app.arrangement.arrangement();
    if arrangement.is_empty() {
        content = content.push(text("No active classes yet.").size(18));
    }
    match arrangement {
        Arrangement::Flat(records) => {
            content = content.push(card_grid(app, records));
        }
        Arrangement::Grouped(groups) => {
            for (index, group) in groups.iter().enumerate() {
                if index > 0 {
                    content = content.push(Rule::horizontal(1));
                }
                content = content.push(
                    Column::new()
                        .spacing(20)
                        .push(text(&group.heading).size(22))
                        .push(card_grid(app, &group.classrooms)),
                );
            }
        }
    }

    Container::new(Scrollable::new(content).width(Length::Fill).height(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
}

pub fn sort_dropdown_overlay(app: &App) -> Option<Element<'_, Message>> {
    let anchor = app.sort_dropdown.anchor()?;
    let options = SortKey::ALL.into_iter().fold(Column::new(), |options, key| {
        let style = if key == app.sort_key { button::secondary } else { button::text };
        options.push(
            button(text(key.label()))
                .width(Length::Fill)
                .padding([8, 16])
                .style(style)
                .on_press(Message::SortKeySelected(key)),
        )
    });
    Some(anchored(menu_frame(options, SORT_MENU_SIZE.width), anchor))
}
