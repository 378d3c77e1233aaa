use iced::{Element, Length};
use iced::widget::{Container, Row, Stack};
use crate::app::state::Screen;
use crate::screens::{
    archived_screen, card_menu_overlay, classes_screen, co_teacher_modal, edit_class_modal, nav_menu,
    settings_screen, sort_dropdown_overlay,
};
use super::{App, Message};

const NAV_WIDTH: f32 = 240.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let page = Row::new()
            .spacing(20)
            .push(
                Container::new(nav_menu(self))
                    .width(Length::Fixed(NAV_WIDTH))
                    .height(Length::Fill)
                    .padding(10),
            )
            .push(
                match &self.current_screen {
                    Screen::ActiveClasses => classes_screen(self),
                    Screen::ArchivedClasses => archived_screen(self),
                    Screen::Settings => settings_screen(self),
                }
                    .width(Length::Fill),
            );

        // Floating layers, bottom to top
        [
            sort_dropdown_overlay(self),
            card_menu_overlay(self),
            edit_class_modal(self),
            co_teacher_modal(self),
        ]
            .into_iter()
            .flatten()
            .fold(Stack::new().width(Length::Fill).height(Length::Fill).push(page), |stack, layer| {
                stack.push(layer)
            })
            .into()
    }
}
